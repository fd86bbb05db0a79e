//! SD-card / print media trait

use pinax_protocol::vp::FILE_NAME_LEN;

/// Trait for the SD-card and file-print subsystem
///
/// File indexes address the flat directory listing; names are delivered as
/// fixed 26-byte fields the way the panel consumes them.
pub trait PrintMedia {
    /// (Re)initialize the card
    fn init(&mut self);

    /// Whether a card is present and mounted
    fn is_ready(&self) -> bool;

    /// Whether a file print is currently active
    fn is_printing(&self) -> bool;

    /// Number of files in the work directory
    fn file_count(&mut self) -> u16;

    /// Copy the display name of a file into `out`
    ///
    /// Names shorter than the field are blank padded; out-of-range indexes
    /// yield an all-blank field.
    fn file_name(&mut self, index: u16, out: &mut [u8; FILE_NAME_LEN]);

    /// Open the file at `index` and begin printing it
    fn open_and_start(&mut self, index: u16);

    /// Abort the active file print
    fn stop_print(&mut self);

    /// Pause the active file print
    fn pause_print(&mut self);

    /// Resume a paused file print
    fn resume_print(&mut self);

    /// Progress of the active print as a 0-100 percentage
    fn progress_percent(&self) -> u8;
}
