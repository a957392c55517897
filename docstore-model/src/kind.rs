/// A concrete record type sharing the generic persistence behaviour.
///
/// Kinds only supply a name; field shapes stay open. The name decides the
/// collection file, so two kinds with names differing only in case share
/// one collection.
///
/// ```
/// use docstore_model::EntityKind;
///
/// struct User;
/// impl EntityKind for User {
///     const NAME: &'static str = "User";
/// }
///
/// assert_eq!(User::collection_name(), "user");
/// ```
pub trait EntityKind {
    /// Display name of the kind, e.g. `"User"`.
    const NAME: &'static str;

    /// Lowercased name used as the collection file stem.
    fn collection_name() -> String {
        Self::NAME.to_lowercase()
    }
}
