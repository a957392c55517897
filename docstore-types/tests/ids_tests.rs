use docstore_types::{EntityId, IdStrategy};
use proptest::prelude::*;
use std::str::FromStr;

// ── EntityId ──────────────────────────────────────────────────────

#[test]
fn entity_id_first_is_one() {
    assert_eq!(EntityId::FIRST.get(), 1);
}

#[test]
fn entity_id_next_increments() {
    assert_eq!(EntityId::new(41).next(), Some(EntityId::new(42)));
}

#[test]
fn entity_id_next_is_none_at_max() {
    assert_eq!(EntityId::new(u64::MAX).next(), None);
    assert_eq!(EntityId::new(u64::MAX - 1).next(), Some(EntityId::new(u64::MAX)));
}

#[test]
fn entity_id_display_and_parse() {
    let id = EntityId::new(17);
    let s = id.to_string();
    assert_eq!(s, "17");
    assert_eq!(EntityId::parse(&s).unwrap(), id);
}

#[test]
fn entity_id_from_str() {
    let parsed = EntityId::from_str(" 9 ").unwrap();
    assert_eq!(parsed, EntityId::new(9));
}

#[test]
fn entity_id_parse_invalid() {
    assert!(EntityId::parse("not-a-number").is_err());
    assert!(EntityId::parse("-3").is_err());
}

#[test]
fn entity_id_parse_error_display() {
    let err = EntityId::parse("x").unwrap_err();
    assert!(format!("{err}").contains("invalid entity id"));
}

#[test]
fn entity_id_serializes_as_plain_integer() {
    let json = serde_json::to_string(&EntityId::new(5)).unwrap();
    assert_eq!(json, "5");
    let back: EntityId = serde_json::from_str("5").unwrap();
    assert_eq!(back, EntityId::new(5));
}

#[test]
fn entity_id_rejects_non_integer_json() {
    assert!(serde_json::from_str::<EntityId>("\"5\"").is_err());
    assert!(serde_json::from_str::<EntityId>("1.5").is_err());
}

#[test]
fn entity_id_into_json_value() {
    let v: serde_json::Value = EntityId::new(3).into();
    assert_eq!(v, serde_json::json!(3));
}

// ── IdStrategy ────────────────────────────────────────────────────

fn ids(raw: &[u64]) -> Vec<EntityId> {
    raw.iter().copied().map(EntityId::new).collect()
}

#[test]
fn empty_collection_starts_at_one() {
    assert_eq!(IdStrategy::LastPlusOne.next_id(ids(&[])), Some(EntityId::FIRST));
    assert_eq!(IdStrategy::MaxPlusOne.next_id(ids(&[])), Some(EntityId::FIRST));
}

#[test]
fn last_plus_one_uses_final_element() {
    assert_eq!(IdStrategy::LastPlusOne.next_id(ids(&[1, 2, 3])), Some(EntityId::new(4)));
}

#[test]
fn last_plus_one_can_reuse_ids_when_out_of_order() {
    // Final element is not the maximum: the next id collides with 5.
    let next = IdStrategy::LastPlusOne.next_id(ids(&[5, 2, 4]));
    assert_eq!(next, Some(EntityId::new(5)));
}

#[test]
fn max_plus_one_scans_all() {
    assert_eq!(IdStrategy::MaxPlusOne.next_id(ids(&[5, 2, 4])), Some(EntityId::new(6)));
}

#[test]
fn exhausted_basis_yields_none() {
    // Both rules refuse to wrap or repeat u64::MAX.
    assert_eq!(IdStrategy::LastPlusOne.next_id(ids(&[1, u64::MAX])), None);
    assert_eq!(IdStrategy::MaxPlusOne.next_id(ids(&[u64::MAX, 3])), None);
    // The last-element rule only looks at the final id.
    assert_eq!(
        IdStrategy::LastPlusOne.next_id(ids(&[u64::MAX, 3])),
        Some(EntityId::new(4))
    );
}

#[test]
fn default_strategy_is_last_plus_one() {
    assert_eq!(IdStrategy::default(), IdStrategy::LastPlusOne);
}

#[test]
fn strategy_serde_names() {
    let json = serde_json::to_string(&IdStrategy::MaxPlusOne).unwrap();
    assert_eq!(json, "\"max_plus_one\"");
    let back: IdStrategy = serde_json::from_str("\"last_plus_one\"").unwrap();
    assert_eq!(back, IdStrategy::LastPlusOne);
}

proptest! {
    /// Appending ids assigned by either strategy yields 1, 2, 3, ...
    #[test]
    fn sequential_assignment_counts_up(n in 1usize..64) {
        for strategy in [IdStrategy::LastPlusOne, IdStrategy::MaxPlusOne] {
            let mut stored = Vec::new();
            for _ in 0..n {
                let next = strategy.next_id(stored.iter().copied());
                prop_assert!(next.is_some());
                stored.extend(next);
            }
            let expected: Vec<EntityId> = (1..=n as u64).map(EntityId::new).collect();
            prop_assert_eq!(stored, expected);
        }
    }

    /// Max-based assignment never collides with an existing id.
    #[test]
    fn max_plus_one_is_fresh(raw in proptest::collection::vec(0u64..10_000, 0..32)) {
        let stored = ids(&raw);
        let next = IdStrategy::MaxPlusOne.next_id(stored.iter().copied()).unwrap();
        prop_assert!(!stored.contains(&next));
    }
}
