//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// A generational key: once an entity is destroyed its key never refers to
    /// another entity, so stored keys behave as weak references.
    pub struct Entity;
}
