//! Print job timer and statistics trait

/// Lifetime print statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrintStatistics {
    /// Total prints started (including aborted)
    pub total_prints: u16,
    /// Prints that ran to completion
    pub finished_prints: u16,
    /// Accumulated print time in seconds
    pub total_print_time_s: u32,
    /// Longest single print in seconds
    pub longest_print_s: u32,
    /// Total filament extruded in millimeters
    pub filament_used_mm: u32,
}

/// Trait for the print job timer
pub trait PrintTimer {
    /// Start (or restart) the job timer
    fn start(&mut self);

    /// Stop the job timer and fold the run into the statistics
    fn stop(&mut self);

    /// Pause the job timer
    fn pause(&mut self);

    /// Lifetime statistics snapshot
    fn statistics(&self) -> PrintStatistics;
}
