//! Panel-side configuration types and fixed machine constants
//!
//! Preheat presets are the only panel-owned values that survive a power
//! cycle; they are persisted by the settings subsystem as a
//! postcard-serialized blob.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hotend temperature preloaded into the filament/autotune entry fields
pub const DEFAULT_FILAMENT_TEMP_C: u16 = 200;

/// Jog distance of the X/Y move buttons
pub const JOG_XY_MM: i16 = 5;
/// Jog distance of the Z move buttons
pub const JOG_Z_MM: i16 = 2;

/// Z clearance while traveling between leveling points
pub const LEVEL_LIFT_MM: u16 = 10;
/// Z clearance when leaving the leveling screen
pub const LEVEL_PARK_LIFT_MM: u16 = 30;

/// Bed calibration points in the order the leveling screen numbers them:
/// front-left, rear-right, front-right, rear-left, center
pub const LEVEL_POINTS: [(u16, u16); 5] = [(35, 35), (165, 170), (165, 35), (35, 165), (100, 100)];

/// One preheat preset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreheatPreset {
    /// Hotend target in °C
    pub hotend_c: u16,
    /// Bed target in °C
    pub bed_c: u8,
}

/// The three preset slots offered by the preheat screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreheatPresets {
    pub slots: [PreheatPreset; 3],
}

impl Default for PreheatPresets {
    fn default() -> Self {
        Self {
            slots: [
                PreheatPreset {
                    hotend_c: 185,
                    bed_c: 60,
                },
                PreheatPreset {
                    hotend_c: 240,
                    bed_c: 100,
                },
                PreheatPreset {
                    hotend_c: 230,
                    bed_c: 85,
                },
            ],
        }
    }
}

#[cfg(feature = "serde")]
impl PreheatPresets {
    /// Maximum serialized size of the preset blob
    pub const MAX_BLOB_LEN: usize = 16;

    /// Serialize into `buf`, returning the written slice
    pub fn to_blob<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize from a blob written by [`Self::to_blob`]
    pub fn from_blob(blob: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(blob)
    }
}
