//! Panel byte transport trait

/// Trait for the serial link to the touch panel
///
/// Reads are non-blocking; writes are fire-and-forget. Flow control and
/// baud-rate pacing belong to the UART layer behind the implementation.
pub trait PanelPort {
    /// Take the next received byte, if one is buffered
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue bytes for transmission
    fn write(&mut self, bytes: &[u8]);
}
