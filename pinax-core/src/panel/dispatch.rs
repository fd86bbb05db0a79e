//! Touch command dispatch
//!
//! Maps the inbound touch code to its handler. Handlers either push data to
//! the panel, start a request/response round trip, or forward requests to
//! the machine subsystems. Unknown codes are no-ops.

use heapless::Vec;

use pinax_protocol::frame::{var_write_header, Frame};
use pinax_protocol::touch::TouchReport;
use pinax_protocol::vp::{
    self, FILE_NAME_LEN, FILE_PAGE_SLOTS, VP_FILAMENT_TEMP, VP_FILE_LIST, VP_MOTOR_CONFIG,
    VP_PREHEAT, VP_PRINT_CONFIG, VP_SELECTED_FILE, VP_STATS_COUNTS, VP_STATS_FILAMENT,
    VP_STATS_LONGEST, VP_STATS_TIME,
};

use crate::config::{
    DEFAULT_FILAMENT_TEMP_C, JOG_XY_MM, JOG_Z_MM, LEVEL_LIFT_MM, LEVEL_PARK_LIFT_MM, LEVEL_POINTS,
};
use crate::opmode::{OpMode, LEVEL_POLL_MS};
use crate::page::Page;
use crate::stats::{format_duration, format_filament};
use crate::traits::{Axis, Machine, PanelPort, ALL_AXES};

use super::roundtrip::{PendingAction, PendingRead};
use super::{write_frame, write_text_field, PanelController};

impl PanelController {
    /// Dispatch one decoded touch report
    pub(super) fn dispatch<M, P>(
        &mut self,
        report: TouchReport,
        now_ms: u32,
        machine: &mut M,
        port: &mut P,
    ) where
        M: Machine,
        P: PanelPort,
    {
        let value = report.value;
        match report.code {
            vp::TOUCH_JOG_X_PLUS => jog(machine, Axis::X, JOG_XY_MM),
            vp::TOUCH_JOG_X_MINUS => jog(machine, Axis::X, -JOG_XY_MM),
            vp::TOUCH_JOG_Y_PLUS => jog(machine, Axis::Y, JOG_XY_MM),
            vp::TOUCH_JOG_Y_MINUS => jog(machine, Axis::Y, -JOG_XY_MM),
            vp::TOUCH_JOG_Z_PLUS => jog(machine, Axis::Z, JOG_Z_MM),
            vp::TOUCH_JOG_Z_MINUS => jog(machine, Axis::Z, -JOG_Z_MM),
            vp::TOUCH_EXTRUDE => self.manual_extrude(machine, 1),
            vp::TOUCH_RETRACT => self.manual_extrude(machine, -1),
            vp::TOUCH_HOME_ALL => machine.home_all(),
            vp::TOUCH_HOME_X => machine.home_axis(Axis::X),
            vp::TOUCH_HOME_Y => machine.home_axis(Axis::Y),
            vp::TOUCH_HOME_Z => machine.home_axis(Axis::Z),
            vp::TOUCH_FILE_NAV => self.file_nav(value, machine, port),
            vp::TOUCH_FILE_SELECT => self.file_select(value, machine, port),
            vp::TOUCH_COOL_DOWN => machine.disable_all_heaters(),
            vp::TOUCH_PRINT_STOP => self.print_stop(machine, port),
            vp::TOUCH_PRINT_PAUSE => {
                machine.pause_print();
                machine.pause();
            }
            vp::TOUCH_PRINT_RESUME => {
                machine.resume_print();
                machine.start();
            }
            vp::TOUCH_PREHEAT => self.preheat(value, machine, port),
            vp::TOUCH_GRAPH => self.graph_screen(value, port),
            vp::TOUCH_MOTOR_OPEN => self.motor_open(value, machine, port),
            vp::TOUCH_MOTOR_SAVE => {
                self.start_roundtrip(
                    port,
                    VP_MOTOR_CONFIG,
                    vp::motor::WORDS,
                    PendingAction::MotorSave,
                    vp::motor::RESPONSE_LEN,
                );
            }
            vp::TOUCH_PRINT_CONFIG_OPEN => self.print_config_open(machine, port),
            vp::TOUCH_PRINT_CONFIG_SAVE => {
                self.start_roundtrip(
                    port,
                    VP_PRINT_CONFIG,
                    vp::print_config::WORDS,
                    PendingAction::PrintConfigSave,
                    vp::print_config::RESPONSE_LEN,
                );
            }
            vp::TOUCH_FACTORY_RESET => {
                machine.factory_reset();
                machine.save();
            }
            vp::TOUCH_FILAMENT_BACK => self.filament_back(machine, port),
            vp::TOUCH_LEVEL => self.level(value, now_ms, machine, port),
            vp::TOUCH_FILAMENT => self.filament(value, port),
            vp::TOUCH_MOTORS_OFF => {
                machine.disable_steppers();
                machine.clear_homed();
            }
            vp::TOUCH_PRINT_SCREEN => self.print_screen(machine, port),
            vp::TOUCH_STATS => self.statistics(machine, port),
            vp::TOUCH_AUTOTUNE => self.autotune(value, port),
            _ => {}
        }
    }

    fn manual_extrude<M: Machine>(&mut self, machine: &mut M, direction: i16) {
        if machine.is_cold_extrude() {
            return;
        }
        machine.clear_queue();
        machine.feed_filament(direction, crate::opmode::FILAMENT_FEEDRATE_MM_MIN);
    }

    /// 0x32: directory navigation; value 0 = fresh load, 1 = up, 2 = down
    fn file_nav<M, P>(&mut self, value: u8, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        if machine.is_printing() {
            self.show_page(Page::Print, port);
            return;
        }

        let mut file_count = 0;
        if value == 0 {
            machine.init();
            if machine.is_ready() {
                file_count = machine.file_count();
                self.cursor.reset(file_count);
            }
        }

        if !machine.is_ready() {
            return;
        }
        let file_count = if file_count != 0 {
            file_count
        } else {
            machine.file_count()
        };

        match value {
            1 => self.cursor.page_up(file_count),
            2 => self.cursor.page_down(file_count),
            _ => {}
        }

        port.write(&var_write_header(
            VP_FILE_LIST,
            (FILE_PAGE_SLOTS * FILE_NAME_LEN) as u8,
        ));
        let mut name = [0u8; FILE_NAME_LEN];
        for slot in 0..FILE_PAGE_SLOTS as u16 {
            machine.file_name(self.cursor.index().wrapping_sub(slot), &mut name);
            port.write(&name);
        }

        self.show_page(Page::SdCard, port);
    }

    /// 0x33: select a file slot and start printing it
    fn file_select<M, P>(&mut self, value: u8, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        if !machine.is_ready() {
            return;
        }
        let Some(index) = self.cursor.select(value) else {
            return;
        };

        let mut name = [0u8; FILE_NAME_LEN];
        machine.file_name(index, &mut name);
        port.write(&var_write_header(VP_SELECTED_FILE, FILE_NAME_LEN as u8));
        port.write(&name);

        machine.open_and_start(index);
        machine.start();
        self.graph.arm();
        self.show_page(Page::Print, port);
    }

    /// 0x35: abort the print and quiesce the machine
    fn print_stop<M, P>(&mut self, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        machine.stop_print();
        machine.clear_queue();
        machine.quickstop();
        machine.stop();
        machine.disable_all_heaters();
        machine.set_fan_percent(0);
        self.graph.off();
        self.show_page(Page::MainMenu, port);
    }

    /// 0x3C: preheat screen; value 0 opens it, 1-3 saves and applies a slot
    fn preheat<M, P>(&mut self, value: u8, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        if value == 0 {
            let mut payload: Vec<u8, 12> = Vec::new();
            for preset in &self.presets.slots {
                let _ = payload.extend_from_slice(&preset.hotend_c.to_be_bytes());
                let _ = payload.extend_from_slice(&[0, preset.bed_c]);
            }
            if let Ok(frame) = Frame::var_write(VP_PREHEAT, &payload) {
                write_frame(port, &frame);
            }
            self.show_page(Page::Preheat, port);
        } else {
            self.start_roundtrip(
                port,
                VP_PREHEAT,
                vp::preheat::WORDS,
                PendingAction::PreheatSave { slot: value - 1 },
                vp::preheat::RESPONSE_LEN,
            );
        }

        // Both preheat paths end in the cool-down tail; the saved slot's
        // targets are applied when the response arrives.
        machine.disable_all_heaters();
    }

    /// 0x3D: temperature graph screen; value 1 is the back button
    fn graph_screen<P: PanelPort>(&mut self, value: u8, port: &mut P) {
        if value == 1 {
            self.graph.off();
            let last = self.nav.last();
            self.show_page(last, port);
        } else {
            self.graph.arm();
            self.show_page(Page::TemperatureGraph, port);
        }
    }

    /// 0x3E: push motor calibration (and PID placeholders) to the panel
    fn motor_open<M, P>(&mut self, value: u8, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        let mut payload: Vec<u8, 14> = Vec::new();
        for axis in ALL_AXES {
            let steps_x10 = (machine.steps_per_mm(axis) * 10.0 + 0.5) as u16;
            let _ = payload.extend_from_slice(&steps_x10.to_be_bytes());
        }
        // PID gains are tuned at build time; the panel fields stay zero.
        for _ in 0..3 {
            let _ = payload.extend_from_slice(&0u16.to_be_bytes());
        }

        if let Ok(frame) = Frame::var_write(VP_MOTOR_CONFIG, &payload) {
            write_frame(port, &frame);
        }
        self.show_page(if value != 0 { Page::Pid } else { Page::Motor }, port);
    }

    /// 0x47: push the live print configuration to the panel
    fn print_config_open<M, P>(&mut self, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        let words = [
            machine.feedrate_percent(),
            machine.hotend_target_c().max(0) as u16,
            machine.bed_target_c().max(0) as u16,
            machine.fan_percent() as u16,
        ];
        let mut payload: Vec<u8, 8> = Vec::new();
        for word in words {
            let _ = payload.extend_from_slice(&word.to_be_bytes());
        }

        if let Ok(frame) = Frame::var_write(VP_PRINT_CONFIG, &payload) {
            write_frame(port, &frame);
        }
        self.show_page(Page::PrintConfig, port);
    }

    /// 0x4A: leave the filament screen, cancelling any load/unload
    fn filament_back<M, P>(&mut self, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        self.op.cancel();
        machine.clear_queue();
        machine.set_relative_mode(false);
        machine.set_hotend_target(0);
        self.show_page(Page::Filament, port);
    }

    /// 0x4C: leveling screen; value 0 homes, 1-5 visit points, 6 leaves
    fn level<M, P>(&mut self, value: u8, now_ms: u32, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        match value {
            0 => {
                self.show_page(Page::Level1, port);
                // Stale homed flags must not complete the wait early.
                machine.clear_homed();
                machine.home_all();
                self.op.arm(OpMode::LevelInit, now_ms, LEVEL_POLL_MS);
            }
            1..=5 => {
                let (x, y) = LEVEL_POINTS[(value - 1) as usize];
                machine.rapid_z(LEVEL_LIFT_MM);
                machine.rapid_to(x, y);
                machine.rapid_z(0);
            }
            6 => {
                machine.rapid_z(LEVEL_PARK_LIFT_MM);
                self.show_page(Page::ToolMenu, port);
            }
            _ => {}
        }
    }

    /// 0x51: filament screen; value 0 opens it, 1 loads, 2 unloads
    fn filament<P: PanelPort>(&mut self, value: u8, port: &mut P) {
        match value {
            0 => {
                if let Ok(frame) =
                    Frame::var_write(VP_FILAMENT_TEMP, &DEFAULT_FILAMENT_TEMP_C.to_be_bytes())
                {
                    write_frame(port, &frame);
                }
                self.show_page(Page::Filament, port);
            }
            1 | 2 => {
                self.start_roundtrip(
                    port,
                    VP_FILAMENT_TEMP,
                    vp::temp_entry::WORDS,
                    PendingAction::FilamentTemp { unload: value == 2 },
                    vp::temp_entry::RESPONSE_LEN,
                );
            }
            _ => {}
        }
    }

    /// 0x55: enter the print screen without selecting a file
    fn print_screen<M, P>(&mut self, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        self.graph.arm();
        if !machine.is_printing() {
            // The name field keeps its declared width; the text is shorter
            // and the panel renders the residue, as it always has.
            port.write(&var_write_header(VP_SELECTED_FILE, FILE_NAME_LEN as u8));
            port.write(b"No SD print");
        }
        self.show_page(Page::Print, port);
    }

    /// 0x5B: push lifetime statistics and open their screen
    fn statistics<M, P>(&mut self, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        let stats = machine.statistics();

        let mut counts: Vec<u8, 4> = Vec::new();
        let _ = counts.extend_from_slice(&stats.total_prints.to_be_bytes());
        let _ = counts.extend_from_slice(&stats.finished_prints.to_be_bytes());
        if let Ok(frame) = Frame::var_write(VP_STATS_COUNTS, &counts) {
            write_frame(port, &frame);
        }

        write_text_field(port, VP_STATS_TIME, &format_duration(stats.total_print_time_s));
        write_text_field(port, VP_STATS_LONGEST, &format_duration(stats.longest_print_s));
        write_text_field(port, VP_STATS_FILAMENT, &format_filament(stats.filament_used_mm));

        self.show_page(Page::Statistics, port);
    }

    /// 0x5C: autotune screen; value 0 opens it, 1 starts the cycle
    fn autotune<P: PanelPort>(&mut self, value: u8, port: &mut P) {
        match value {
            0 => {
                if let Ok(frame) =
                    Frame::var_write(VP_FILAMENT_TEMP, &DEFAULT_FILAMENT_TEMP_C.to_be_bytes())
                {
                    write_frame(port, &frame);
                }
                self.show_page(Page::AutoPid, port);
            }
            1 => {
                self.start_roundtrip(
                    port,
                    VP_FILAMENT_TEMP,
                    vp::temp_entry::WORDS,
                    PendingAction::AutotuneTemp,
                    vp::temp_entry::RESPONSE_LEN,
                );
            }
            _ => {}
        }
    }

    /// Send a variable read request and wait for its response
    fn start_roundtrip<P: PanelPort>(
        &mut self,
        port: &mut P,
        vp_addr: u16,
        words: u8,
        action: PendingAction,
        response_len: usize,
    ) {
        write_frame(port, &Frame::var_read(vp_addr, words));
        self.pending = Some(PendingRead::new(action, response_len));
    }
}

fn jog<M: Machine>(machine: &mut M, axis: Axis, distance_mm: i16) {
    machine.clear_queue();
    machine.jog(axis, distance_mm);
}
