use super::shell::ShellId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the topology store.
    pub struct SolidId;
}

/// A bounded volume enclosed by one outer shell and optional void shells.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// The outer shell of the solid.
    pub outer_shell: ShellId,
    /// Inner shells representing voids within the solid.
    pub inner_shells: Vec<ShellId>,
}
