//! Two-phase variable-read round trips
//!
//! A handler that needs user-entered values sends a VAR_READ request and
//! parks a `PendingRead`; subsequent polls feed response bytes into it until
//! the expected count is reached. Validation and abort semantics match the
//! wire contract: a response with bad sync is dropped with no further side
//! effects (whatever the handler already did at request time stands), and a
//! short response never completes; the system watchdog is the only guard.

use heapless::Vec;

use pinax_protocol::frame::{SYNC0, SYNC1};
use pinax_protocol::vp::{self, word_at};

use crate::config::PreheatPreset;
use crate::opmode::{OpMode, FILAMENT_FEED_MS};
use crate::page::Page;
use crate::traits::{Machine, PanelPort, ALL_AXES};

use super::PanelController;

/// Largest round-trip response in the protocol
const MAX_RESPONSE_LEN: usize = 24;

/// What to do with a completed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PendingAction {
    /// Store all three preheat slots, persist, heat to `slot`
    PreheatSave { slot: u8 },
    /// Apply steps-per-mm for all axes, persist
    MotorSave,
    /// Apply feedrate/targets/fan from the print-config screen
    PrintConfigSave,
    /// Heat the hotend and arm the load/unload operation
    FilamentTemp { unload: bool },
    /// Start a hotend autotune at the entered temperature
    AutotuneTemp,
}

/// An in-flight round-trip read
#[derive(Debug)]
pub(super) struct PendingRead {
    action: PendingAction,
    expect: usize,
    buf: Vec<u8, MAX_RESPONSE_LEN>,
}

impl PendingRead {
    pub(super) fn new(action: PendingAction, expect: usize) -> Self {
        Self {
            action,
            expect: expect.min(MAX_RESPONSE_LEN),
            buf: Vec::new(),
        }
    }

    /// Move available bytes into the response buffer
    ///
    /// Returns true once the expected byte count is present.
    pub(super) fn pump<P: PanelPort>(&mut self, port: &mut P) -> bool {
        while self.buf.len() < self.expect {
            match port.read_byte() {
                Some(byte) => {
                    let _ = self.buf.push(byte);
                }
                None => return false,
            }
        }
        true
    }

    fn is_valid(&self) -> bool {
        self.buf.len() == self.expect && self.buf[0] == SYNC0 && self.buf[1] == SYNC1
    }
}

impl PanelController {
    /// Apply a completed round-trip response
    pub(super) fn apply_pending<M, P>(
        &mut self,
        pending: PendingRead,
        now_ms: u32,
        machine: &mut M,
        port: &mut P,
    ) where
        M: Machine,
        P: PanelPort,
    {
        if !pending.is_valid() {
            return;
        }
        let buf = &pending.buf[..];

        match pending.action {
            PendingAction::PreheatSave { slot } => {
                for (i, preset) in self.presets.slots.iter_mut().enumerate() {
                    *preset = PreheatPreset {
                        hotend_c: word_at(buf, vp::preheat::HOTEND[i]),
                        bed_c: buf[vp::preheat::BED[i]],
                    };
                }
                machine.save();

                if let Some(preset) = self.presets.slots.get(slot as usize).copied() {
                    machine.set_hotend_target(preset.hotend_c as i16);
                    machine.set_bed_target(preset.bed_c as i16);
                }
            }
            PendingAction::MotorSave => {
                for (axis, offset) in ALL_AXES.into_iter().zip(vp::motor::STEPS) {
                    machine.set_steps_per_mm(axis, word_at(buf, offset) as f32 / 10.0);
                }
                machine.save();
                self.show_page(Page::SystemMenu, port);
            }
            PendingAction::PrintConfigSave => {
                machine.set_feedrate_percent(word_at(buf, vp::print_config::FEEDRATE));
                machine.set_hotend_target(word_at(buf, vp::print_config::HOTEND) as i16);
                machine.set_bed_target(buf[vp::print_config::BED] as i16);
                machine.set_fan_percent(buf[vp::print_config::FAN]);
                self.show_page(Page::Print, port);
            }
            PendingAction::FilamentTemp { unload } => {
                machine.set_hotend_target(word_at(buf, vp::temp_entry::TEMP) as i16);
                machine.set_relative_mode(true);
                let mode = if unload {
                    OpMode::UnloadFilament
                } else {
                    OpMode::LoadFilament
                };
                self.op.arm(mode, now_ms, FILAMENT_FEED_MS);
            }
            PendingAction::AutotuneTemp => {
                machine.set_fan_percent(100);
                machine.start_hotend_autotune(word_at(buf, vp::temp_entry::TEMP));
                self.graph.arm();
            }
        }
    }
}
