//! Periodic status broadcast and temperature-graph throttle
//!
//! Every status period the panel receives one fixed-shape frame with the
//! live temperatures, fan duty and print progress. The temperature graph is
//! fed through an independent three-state throttle so opening and closing
//! the graph screen never disturbs the status cadence's phase.

use pinax_protocol::frame::{curve, Frame, FrameError};
use pinax_protocol::vp::VP_STATUS;

use crate::traits::{PrintMedia, ThermalControl};

/// Interval between status frames
pub const STATUS_PERIOD_MS: u32 = 100;

/// Gate for the temperature-graph push
///
/// Wire values 0/1/2: while armed, every other status fire appends one
/// curve sample, halving the graph rate against the status rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphThrottle {
    /// Graph closed; no samples flow
    #[default]
    Off,
    /// Sample pushed on the previous status fire
    Updated,
    /// Next status fire pushes a sample
    Armed,
}

impl GraphThrottle {
    /// Start pushing samples (graph or print screen opened)
    pub fn arm(&mut self) {
        *self = GraphThrottle::Armed;
    }

    /// Stop pushing samples (graph closed or print stopped)
    pub fn off(&mut self) {
        *self = GraphThrottle::Off;
    }

    /// Advance one status fire; true when a sample should be pushed now
    pub fn step(&mut self) -> bool {
        match self {
            GraphThrottle::Armed => {
                *self = GraphThrottle::Updated;
                true
            }
            GraphThrottle::Updated => {
                *self = GraphThrottle::Armed;
                false
            }
            GraphThrottle::Off => false,
        }
    }
}

/// Build the periodic status frame
///
/// Layout at VP 0x0000: big-endian pairs for target hotend, hotend, target
/// bed, bed, then `[0, fan %]` and `[0, progress %]`. Temperatures clamp at
/// zero on the wire.
pub fn status_frame<M>(machine: &M) -> Result<Frame, FrameError>
where
    M: ThermalControl + PrintMedia,
{
    let words = [
        machine.hotend_target_c().max(0) as u16,
        machine.hotend_c().max(0) as u16,
        machine.bed_target_c().max(0) as u16,
        machine.bed_c().max(0) as u16,
        machine.fan_percent() as u16,
        machine.progress_percent() as u16,
    ];

    let mut payload = [0u8; 12];
    for (chunk, word) in payload.chunks_exact_mut(2).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }

    Frame::var_write(VP_STATUS, &payload)
}

/// Build one temperature-graph sample frame
pub fn graph_frame<M: ThermalControl>(machine: &M) -> [u8; 9] {
    curve(
        machine.hotend_c().max(0) as u16,
        machine.bed_c().max(0) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinax_protocol::vp::FILE_NAME_LEN;

    struct Snapshot;

    impl ThermalControl for Snapshot {
        fn hotend_c(&self) -> i16 {
            198
        }
        fn hotend_target_c(&self) -> i16 {
            210
        }
        fn set_hotend_target(&mut self, _target_c: i16) {}
        fn bed_c(&self) -> i16 {
            -2
        }
        fn bed_target_c(&self) -> i16 {
            60
        }
        fn set_bed_target(&mut self, _target_c: i16) {}
        fn disable_all_heaters(&mut self) {}
        fn fan_percent(&self) -> u8 {
            74
        }
        fn set_fan_percent(&mut self, _percent: u8) {}
        fn is_cold_extrude(&self) -> bool {
            false
        }
        fn start_hotend_autotune(&mut self, _target_c: u16) {}
    }

    impl PrintMedia for Snapshot {
        fn init(&mut self) {}
        fn is_ready(&self) -> bool {
            true
        }
        fn is_printing(&self) -> bool {
            true
        }
        fn file_count(&mut self) -> u16 {
            0
        }
        fn file_name(&mut self, _index: u16, _out: &mut [u8; FILE_NAME_LEN]) {}
        fn open_and_start(&mut self, _index: u16) {}
        fn stop_print(&mut self) {}
        fn pause_print(&mut self) {}
        fn resume_print(&mut self) {}
        fn progress_percent(&self) -> u8 {
            42
        }
    }

    #[test]
    fn test_status_frame_layout() {
        let encoded = status_frame(&Snapshot).unwrap().encode_to_vec().unwrap();
        assert_eq!(
            &encoded[..],
            &[
                0x5A, 0xA5, 0x0F, 0x82, 0x00, 0x00, // header, VP 0x0000
                0x00, 0xD2, // target hotend 210
                0x00, 0xC6, // hotend 198
                0x00, 0x3C, // target bed 60
                0x00, 0x00, // bed clamped from -2
                0x00, 74,   // fan
                0x00, 42,   // progress
            ]
        );
    }

    #[test]
    fn test_graph_frame_uses_current_temps() {
        let bytes = graph_frame(&Snapshot);
        assert_eq!(bytes[5..7], [0x00, 0xC6]); // hotend 198
        assert_eq!(bytes[7..9], [0x00, 0x00]); // bed clamped
    }

    #[test]
    fn test_throttle_alternates_while_armed() {
        let mut throttle = GraphThrottle::Off;
        assert!(!throttle.step());

        throttle.arm();
        assert!(throttle.step());
        assert!(!throttle.step());
        assert!(throttle.step());

        throttle.off();
        assert!(!throttle.step());
        assert!(!throttle.step());
    }
}
