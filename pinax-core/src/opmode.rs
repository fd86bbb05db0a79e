//! Timed operation state machine
//!
//! Multi-tick physical operations (waiting out a homing cycle, feeding
//! filament) run as a small state machine polled once per loop tick, so the
//! host loop never blocks on motion or heat-up.

use crate::page::Page;
use crate::traits::{MotionControl, ThermalControl, LINEAR_AXES};

/// Poll interval while waiting for the leveling home to finish
pub const LEVEL_POLL_MS: u32 = 200;
/// Interval between filament feed/retract increments
pub const FILAMENT_FEED_MS: u32 = 500;
/// Extruder distance per filament increment
pub const FILAMENT_FEED_MM: i16 = 1;
/// Feedrate of filament increments
pub const FILAMENT_FEEDRATE_MM_MIN: u16 = 120;
/// The feed gate opens this far below the hotend target
pub const FILAMENT_TEMP_MARGIN_C: i16 = 10;

/// Background operation driven by the timer
///
/// `Move` and `AutoPid` identify their screens' modal state but are never
/// advanced by the timer; their screens act through direct commands only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpMode {
    #[default]
    None,
    LevelInit,
    LoadFilament,
    UnloadFilament,
    Move,
    AutoPid,
}

/// Deadline-driven operation state
///
/// While the mode is not `None`, exactly one deadline is pending; firing it
/// either transitions the mode or re-arms the same mode with a fresh
/// deadline. Modes never end on their own except `LevelInit` completing on
/// the homed condition.
#[derive(Debug, Clone, Copy)]
pub struct TimedOp {
    mode: OpMode,
    since_ms: u32,
    duration_ms: u32,
}

impl Default for TimedOp {
    fn default() -> Self {
        Self::new()
    }
}

impl TimedOp {
    /// Create an idle operation timer
    pub fn new() -> Self {
        Self {
            mode: OpMode::None,
            since_ms: 0,
            duration_ms: 0,
        }
    }

    /// Current mode
    pub fn mode(&self) -> OpMode {
        self.mode
    }

    /// Enter `mode` with a deadline `duration_ms` from `now_ms`
    pub fn arm(&mut self, mode: OpMode, now_ms: u32, duration_ms: u32) {
        self.mode = mode;
        self.since_ms = now_ms;
        self.duration_ms = duration_ms;
    }

    /// Drop back to `None` without touching the machine
    pub fn cancel(&mut self) {
        self.mode = OpMode::None;
    }

    /// Advance the operation if its deadline has elapsed
    ///
    /// Returns a page to navigate to when a transition calls for one.
    pub fn tick<M>(&mut self, now_ms: u32, machine: &mut M) -> Option<Page>
    where
        M: MotionControl + ThermalControl,
    {
        if self.mode == OpMode::None {
            return None;
        }
        if now_ms.wrapping_sub(self.since_ms) < self.duration_ms {
            return None;
        }

        match self.mode {
            OpMode::LevelInit => {
                if LINEAR_AXES.iter().all(|&a| machine.is_axis_homed(a)) {
                    self.mode = OpMode::None;
                    return Some(Page::Level2);
                }
                self.since_ms = now_ms;
                self.duration_ms = LEVEL_POLL_MS;
            }
            OpMode::LoadFilament => {
                self.feed_when_hot(machine, FILAMENT_FEED_MM);
                self.since_ms = now_ms;
                self.duration_ms = FILAMENT_FEED_MS;
            }
            OpMode::UnloadFilament => {
                self.feed_when_hot(machine, -FILAMENT_FEED_MM);
                self.since_ms = now_ms;
                self.duration_ms = FILAMENT_FEED_MS;
            }
            _ => {}
        }

        None
    }

    fn feed_when_hot<M>(&self, machine: &mut M, distance_mm: i16)
    where
        M: MotionControl + ThermalControl,
    {
        if machine.hotend_c() >= machine.hotend_target_c() - FILAMENT_TEMP_MARGIN_C {
            machine.feed_filament(distance_mm, FILAMENT_FEEDRATE_MM_MIN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Axis;

    struct TestRig {
        homed: [bool; 3],
        hotend_c: i16,
        hotend_target_c: i16,
        feeds: heapless::Vec<i16, 16>,
    }

    impl TestRig {
        fn new() -> Self {
            Self {
                homed: [false; 3],
                hotend_c: 25,
                hotend_target_c: 0,
                feeds: heapless::Vec::new(),
            }
        }
    }

    impl MotionControl for TestRig {
        fn home_all(&mut self) {}
        fn home_axis(&mut self, _axis: Axis) {}
        fn is_axis_homed(&self, axis: Axis) -> bool {
            match axis {
                Axis::X => self.homed[0],
                Axis::Y => self.homed[1],
                Axis::Z => self.homed[2],
                Axis::E => false,
            }
        }
        fn clear_homed(&mut self) {
            self.homed = [false; 3];
        }
        fn jog(&mut self, _axis: Axis, _distance_mm: i16) {}
        fn rapid_to(&mut self, _x_mm: u16, _y_mm: u16) {}
        fn rapid_z(&mut self, _z_mm: u16) {}
        fn feed_filament(&mut self, distance_mm: i16, _feedrate_mm_min: u16) {
            let _ = self.feeds.push(distance_mm);
        }
        fn set_relative_mode(&mut self, _relative: bool) {}
        fn clear_queue(&mut self) {}
        fn quickstop(&mut self) {}
        fn disable_steppers(&mut self) {}
        fn steps_per_mm(&self, _axis: Axis) -> f32 {
            80.0
        }
        fn set_steps_per_mm(&mut self, _axis: Axis, _steps: f32) {}
        fn feedrate_percent(&self) -> u16 {
            100
        }
        fn set_feedrate_percent(&mut self, _percent: u16) {}
    }

    impl ThermalControl for TestRig {
        fn hotend_c(&self) -> i16 {
            self.hotend_c
        }
        fn hotend_target_c(&self) -> i16 {
            self.hotend_target_c
        }
        fn set_hotend_target(&mut self, target_c: i16) {
            self.hotend_target_c = target_c;
        }
        fn bed_c(&self) -> i16 {
            25
        }
        fn bed_target_c(&self) -> i16 {
            0
        }
        fn set_bed_target(&mut self, _target_c: i16) {}
        fn disable_all_heaters(&mut self) {
            self.hotend_target_c = 0;
        }
        fn fan_percent(&self) -> u8 {
            0
        }
        fn set_fan_percent(&mut self, _percent: u8) {}
        fn is_cold_extrude(&self) -> bool {
            self.hotend_c < 170
        }
        fn start_hotend_autotune(&mut self, _target_c: u16) {}
    }

    #[test]
    fn test_idle_never_acts() {
        let mut op = TimedOp::new();
        let mut rig = TestRig::new();
        assert_eq!(op.tick(10_000, &mut rig), None);
        assert_eq!(op.mode(), OpMode::None);
    }

    #[test]
    fn test_level_init_polls_until_homed() {
        let mut op = TimedOp::new();
        let mut rig = TestRig::new();
        op.arm(OpMode::LevelInit, 0, LEVEL_POLL_MS);

        // Deadline not reached yet.
        assert_eq!(op.tick(100, &mut rig), None);
        assert_eq!(op.mode(), OpMode::LevelInit);

        // Unhomed: re-arms and stays in LevelInit.
        assert_eq!(op.tick(200, &mut rig), None);
        assert_eq!(op.mode(), OpMode::LevelInit);
        assert_eq!(op.tick(400, &mut rig), None);
        assert_eq!(op.mode(), OpMode::LevelInit);

        // All homed: transitions out and asks for the result page, once.
        rig.homed = [true; 3];
        assert_eq!(op.tick(600, &mut rig), Some(Page::Level2));
        assert_eq!(op.mode(), OpMode::None);
        assert_eq!(op.tick(800, &mut rig), None);
    }

    #[test]
    fn test_level_init_needs_every_axis() {
        let mut op = TimedOp::new();
        let mut rig = TestRig::new();
        rig.homed = [true, true, false];
        op.arm(OpMode::LevelInit, 0, LEVEL_POLL_MS);

        assert_eq!(op.tick(200, &mut rig), None);
        assert_eq!(op.mode(), OpMode::LevelInit);
    }

    #[test]
    fn test_load_feeds_only_near_target() {
        let mut op = TimedOp::new();
        let mut rig = TestRig::new();
        rig.hotend_target_c = 200;
        rig.hotend_c = 150;
        op.arm(OpMode::LoadFilament, 0, FILAMENT_FEED_MS);

        // Too cold: no feed, but the mode free-runs.
        op.tick(500, &mut rig);
        assert!(rig.feeds.is_empty());
        assert_eq!(op.mode(), OpMode::LoadFilament);

        // Within the margin below target: feeds one increment per period.
        rig.hotend_c = 191;
        op.tick(1000, &mut rig);
        op.tick(1500, &mut rig);
        assert_eq!(&rig.feeds[..], &[FILAMENT_FEED_MM, FILAMENT_FEED_MM]);
    }

    #[test]
    fn test_unload_retracts() {
        let mut op = TimedOp::new();
        let mut rig = TestRig::new();
        rig.hotend_target_c = 200;
        rig.hotend_c = 200;
        op.arm(OpMode::UnloadFilament, 0, FILAMENT_FEED_MS);

        op.tick(500, &mut rig);
        assert_eq!(&rig.feeds[..], &[-FILAMENT_FEED_MM]);
        assert_eq!(op.mode(), OpMode::UnloadFilament);
    }

    #[test]
    fn test_cancel_stops_free_run() {
        let mut op = TimedOp::new();
        let mut rig = TestRig::new();
        rig.hotend_target_c = 200;
        rig.hotend_c = 200;
        op.arm(OpMode::LoadFilament, 0, FILAMENT_FEED_MS);

        op.tick(500, &mut rig);
        op.cancel();
        op.tick(1000, &mut rig);
        assert_eq!(rig.feeds.len(), 1);
    }
}
