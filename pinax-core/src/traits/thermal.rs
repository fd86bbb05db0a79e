//! Thermal subsystem trait

/// Trait for the heater/fan side of the firmware
///
/// Temperatures are whole degrees Celsius; fan duty is a 0-100 percentage.
/// Unit conversions (ADC counts, PWM scales) live behind the implementation.
pub trait ThermalControl {
    /// Current hotend temperature
    fn hotend_c(&self) -> i16;

    /// Hotend target temperature
    fn hotend_target_c(&self) -> i16;

    /// Set the hotend target temperature
    fn set_hotend_target(&mut self, target_c: i16);

    /// Current bed temperature
    fn bed_c(&self) -> i16;

    /// Bed target temperature
    fn bed_target_c(&self) -> i16;

    /// Set the bed target temperature
    fn set_bed_target(&mut self, target_c: i16);

    /// Zero every heater target and cut heater outputs
    fn disable_all_heaters(&mut self);

    /// Part-cooling fan duty (0-100)
    fn fan_percent(&self) -> u8;

    /// Set the part-cooling fan duty (0-100)
    fn set_fan_percent(&mut self, percent: u8);

    /// Whether the hotend is below the minimum extrusion temperature
    fn is_cold_extrude(&self) -> bool;

    /// Kick off a hotend PID autotune cycle toward the given target
    fn start_hotend_autotune(&mut self, target_c: u16);
}
