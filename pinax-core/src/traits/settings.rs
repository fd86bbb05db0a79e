//! Persistent settings trait

/// Trait for the persistent-settings subsystem
///
/// The panel controller only ever asks for a full save or a factory reset;
/// what gets written where is the implementation's business.
pub trait SettingsStore {
    /// Persist the current machine settings
    fn save(&mut self);

    /// Restore factory defaults (does not persist by itself)
    fn factory_reset(&mut self);
}
