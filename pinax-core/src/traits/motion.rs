//! Motion subsystem trait
//!
//! Abstracts the kinematics/planner side of the firmware: homing, jogging,
//! queued moves and the per-axis steps-per-mm calibration.

/// Machine axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
    /// Extruder
    E,
}

/// Linear axes in display order
pub const LINEAR_AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

/// All axes in display order
pub const ALL_AXES: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

/// Trait for the motion/kinematics subsystem
///
/// Move requests are queued by the implementation; the panel controller
/// never waits for motion completion. Homed flags are owned by the motion
/// side but may be cleared by the controller before it re-homes.
pub trait MotionControl {
    /// Request homing of all axes
    fn home_all(&mut self);

    /// Request homing of a single axis
    fn home_axis(&mut self, axis: Axis);

    /// Check whether an axis has been homed
    fn is_axis_homed(&self, axis: Axis) -> bool;

    /// Clear the homed flag of every linear axis
    fn clear_homed(&mut self);

    /// Queue a relative move of one axis by the given distance
    fn jog(&mut self, axis: Axis, distance_mm: i16);

    /// Queue a rapid move to an XY position (leveling calibration points)
    fn rapid_to(&mut self, x_mm: u16, y_mm: u16);

    /// Queue a rapid move of the Z axis to an absolute height
    fn rapid_z(&mut self, z_mm: u16);

    /// Queue an extruder move at the given feedrate
    ///
    /// Positive distances feed filament, negative distances retract.
    fn feed_filament(&mut self, distance_mm: i16, feedrate_mm_min: u16);

    /// Switch the coordinate interpretation of queued moves
    fn set_relative_mode(&mut self, relative: bool);

    /// Drop all queued but unexecuted move requests
    fn clear_queue(&mut self);

    /// Stop the steppers as fast as mechanically safe
    fn quickstop(&mut self);

    /// De-energize all stepper motors
    fn disable_steppers(&mut self);

    /// Steps-per-mm calibration of an axis
    fn steps_per_mm(&self, axis: Axis) -> f32;

    /// Update the steps-per-mm calibration of an axis
    fn set_steps_per_mm(&mut self, axis: Axis, steps: f32);

    /// Global feedrate override percentage (100 = nominal)
    fn feedrate_percent(&self) -> u16;

    /// Set the global feedrate override percentage
    fn set_feedrate_percent(&mut self, percent: u16);
}
