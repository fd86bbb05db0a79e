//! Shared mocks for panel-level tests

use core::fmt::Write as _;

use heapless::{String, Vec};

use pinax_protocol::vp::FILE_NAME_LEN;

use crate::traits::{
    Axis, MotionControl, PanelPort, PrintMedia, PrintStatistics, PrintTimer, SettingsStore,
    ThermalControl,
};

/// A nine-byte inbound touch frame for `code`/`value`
pub(crate) fn touch(code: u8, value: u8) -> [u8; 9] {
    [0x5A, 0xA5, 0x06, 0x83, 0x04, code, 0x01, 0x00, value]
}

/// Recorded homing requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HomeRequest {
    All,
    One(Axis),
}

/// Recorded rapid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rapid {
    Z(u16),
    Xy(u16, u16),
}

/// Full-machine mock recording every request the controller issues
pub(crate) struct MockMachine {
    pub homed: [bool; 3],
    pub homes: Vec<HomeRequest, 8>,
    pub homed_cleared: u32,
    pub jogs: Vec<(Axis, i16), 8>,
    pub rapids: Vec<Rapid, 16>,
    pub feeds: Vec<(i16, u16), 8>,
    pub relative_mode: Option<bool>,
    pub queue_clears: u32,
    pub quickstops: u32,
    pub steppers_disabled: u32,
    pub steps: [f32; 4],
    pub feedrate: u16,

    pub hotend_c: i16,
    pub hotend_target_c: i16,
    pub bed_c: i16,
    pub bed_target_c: i16,
    pub fan: u8,
    pub cold: bool,
    pub heater_disables: u32,
    pub autotune: Option<u16>,

    pub card_ready: bool,
    pub printing: bool,
    pub files: u16,
    pub progress: u8,
    pub started: Vec<u16, 4>,
    pub print_stopped: u32,
    pub print_paused: u32,
    pub print_resumed: u32,

    pub timer_starts: u32,
    pub timer_stops: u32,
    pub timer_pauses: u32,
    pub stats: PrintStatistics,

    pub saves: u32,
    pub factory_resets: u32,
}

impl MockMachine {
    pub fn new() -> Self {
        Self {
            homed: [false; 3],
            homes: Vec::new(),
            homed_cleared: 0,
            jogs: Vec::new(),
            rapids: Vec::new(),
            feeds: Vec::new(),
            relative_mode: None,
            queue_clears: 0,
            quickstops: 0,
            steppers_disabled: 0,
            steps: [80.0, 80.0, 400.0, 93.0],
            feedrate: 100,

            hotend_c: 25,
            hotend_target_c: 0,
            bed_c: 24,
            bed_target_c: 0,
            fan: 0,
            cold: false,
            heater_disables: 0,
            autotune: None,

            card_ready: true,
            printing: false,
            files: 12,
            progress: 0,
            started: Vec::new(),
            print_stopped: 0,
            print_paused: 0,
            print_resumed: 0,

            timer_starts: 0,
            timer_stops: 0,
            timer_pauses: 0,
            stats: PrintStatistics::default(),

            saves: 0,
            factory_resets: 0,
        }
    }
}

impl MotionControl for MockMachine {
    fn home_all(&mut self) {
        let _ = self.homes.push(HomeRequest::All);
    }
    fn home_axis(&mut self, axis: Axis) {
        let _ = self.homes.push(HomeRequest::One(axis));
    }
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
        self.homed_cleared += 1;
    }
    fn jog(&mut self, axis: Axis, distance_mm: i16) {
        let _ = self.jogs.push((axis, distance_mm));
    }
    fn rapid_to(&mut self, x_mm: u16, y_mm: u16) {
        let _ = self.rapids.push(Rapid::Xy(x_mm, y_mm));
    }
    fn rapid_z(&mut self, z_mm: u16) {
        let _ = self.rapids.push(Rapid::Z(z_mm));
    }
    fn feed_filament(&mut self, distance_mm: i16, feedrate_mm_min: u16) {
        let _ = self.feeds.push((distance_mm, feedrate_mm_min));
    }
    fn set_relative_mode(&mut self, relative: bool) {
        self.relative_mode = Some(relative);
    }
    fn clear_queue(&mut self) {
        self.queue_clears += 1;
    }
    fn quickstop(&mut self) {
        self.quickstops += 1;
    }
    fn disable_steppers(&mut self) {
        self.steppers_disabled += 1;
    }
    fn steps_per_mm(&self, axis: Axis) -> f32 {
        self.steps[axis_slot(axis)]
    }
    fn set_steps_per_mm(&mut self, axis: Axis, steps: f32) {
        self.steps[axis_slot(axis)] = steps;
    }
    fn feedrate_percent(&self) -> u16 {
        self.feedrate
    }
    fn set_feedrate_percent(&mut self, percent: u16) {
        self.feedrate = percent;
    }
}

fn axis_slot(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
        Axis::E => 3,
    }
}

impl ThermalControl for MockMachine {
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
        self.bed_c
    }
    fn bed_target_c(&self) -> i16 {
        self.bed_target_c
    }
    fn set_bed_target(&mut self, target_c: i16) {
        self.bed_target_c = target_c;
    }
    fn disable_all_heaters(&mut self) {
        self.hotend_target_c = 0;
        self.bed_target_c = 0;
        self.heater_disables += 1;
    }
    fn fan_percent(&self) -> u8 {
        self.fan
    }
    fn set_fan_percent(&mut self, percent: u8) {
        self.fan = percent;
    }
    fn is_cold_extrude(&self) -> bool {
        self.cold
    }
    fn start_hotend_autotune(&mut self, target_c: u16) {
        self.autotune = Some(target_c);
    }
}

impl PrintMedia for MockMachine {
    fn init(&mut self) {}
    fn is_ready(&self) -> bool {
        self.card_ready
    }
    fn is_printing(&self) -> bool {
        self.printing
    }
    fn file_count(&mut self) -> u16 {
        self.files
    }
    fn file_name(&mut self, index: u16, out: &mut [u8; FILE_NAME_LEN]) {
        out.fill(b' ');
        if index < self.files {
            let mut name: String<12> = String::new();
            let _ = write!(name, "FILE{:03}.GCO", index);
            out[..name.len()].copy_from_slice(name.as_bytes());
        }
    }
    fn open_and_start(&mut self, index: u16) {
        let _ = self.started.push(index);
        self.printing = true;
    }
    fn stop_print(&mut self) {
        self.printing = false;
        self.print_stopped += 1;
    }
    fn pause_print(&mut self) {
        self.print_paused += 1;
    }
    fn resume_print(&mut self) {
        self.print_resumed += 1;
    }
    fn progress_percent(&self) -> u8 {
        self.progress
    }
}

impl PrintTimer for MockMachine {
    fn start(&mut self) {
        self.timer_starts += 1;
    }
    fn stop(&mut self) {
        self.timer_stops += 1;
    }
    fn pause(&mut self) {
        self.timer_pauses += 1;
    }
    fn statistics(&self) -> PrintStatistics {
        self.stats
    }
}

impl SettingsStore for MockMachine {
    fn save(&mut self) {
        self.saves += 1;
    }
    fn factory_reset(&mut self) {
        self.factory_resets += 1;
    }
}

/// Byte-transport mock: injected bytes are read back one at a time, writes
/// accumulate in `tx`
pub(crate) struct MockPort {
    pub tx: Vec<u8, 1024>,
    rx: Vec<u8, 128>,
    rx_pos: usize,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            tx: Vec::new(),
            rx: Vec::new(),
            rx_pos: 0,
        }
    }

    /// Queue bytes for the controller to receive
    pub fn inject(&mut self, bytes: &[u8]) {
        let _ = self.rx.extend_from_slice(bytes);
    }
}

impl PanelPort for MockPort {
    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.rx.get(self.rx_pos)?;
        self.rx_pos += 1;
        Some(byte)
    }

    fn write(&mut self, bytes: &[u8]) {
        let _ = self.tx.extend_from_slice(bytes);
    }
}
