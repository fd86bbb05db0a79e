//! Panel controller
//!
//! One owned struct holds every piece of mutable panel state (navigation,
//! file cursor, timed operation, status cadence, graph throttle, preheat
//! presets, parser and any in-flight round trip). The host loop calls
//! [`PanelController::poll`] repeatedly; nothing in here blocks.

mod dispatch;
mod roundtrip;

#[cfg(test)]
pub(crate) mod testkit;

use pinax_protocol::frame::Frame;
use pinax_protocol::touch::{TouchParser, TouchReport};
use pinax_protocol::vp::VP_VERSION;

use crate::clock::PeriodicTimer;
use crate::config::PreheatPresets;
use crate::cursor::FileCursor;
use crate::opmode::{OpMode, TimedOp};
use crate::page::{Navigator, Page};
use crate::stats::STATS_TEXT_LEN;
use crate::status::{graph_frame, status_frame, GraphThrottle, STATUS_PERIOD_MS};
use crate::traits::{Machine, PanelPort};
use crate::FIRMWARE_VERSION;

use self::roundtrip::PendingRead;

/// Touch-panel controller state
///
/// Created once at system start and mutated only from the polling entry
/// point; all collaborators arrive as arguments, so instances are fully
/// deterministic under test.
pub struct PanelController {
    parser: TouchParser,
    nav: Navigator,
    cursor: FileCursor,
    op: TimedOp,
    status: PeriodicTimer,
    graph: GraphThrottle,
    presets: PreheatPresets,
    pending: Option<PendingRead>,
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelController {
    /// Create a controller resting on the main menu
    pub fn new() -> Self {
        Self {
            parser: TouchParser::new(),
            nav: Navigator::new(),
            cursor: FileCursor::new(),
            op: TimedOp::new(),
            status: PeriodicTimer::new(STATUS_PERIOD_MS),
            graph: GraphThrottle::Off,
            presets: PreheatPresets::default(),
            pending: None,
        }
    }

    /// Replace the preheat presets (restored from the settings blob at boot)
    pub fn load_presets(&mut self, presets: PreheatPresets) {
        self.presets = presets;
    }

    /// Current preheat presets
    pub fn preheat_presets(&self) -> &PreheatPresets {
        &self.presets
    }

    /// The page currently shown
    pub fn current_page(&self) -> Page {
        self.nav.current()
    }

    /// Current timed-operation mode
    pub fn op_mode(&self) -> OpMode {
        self.op.mode()
    }

    /// Send the startup frames: firmware version and boot animation page
    pub fn init<P: PanelPort>(&mut self, port: &mut P) {
        write_text_field(port, VP_VERSION, FIRMWARE_VERSION);
        self.show_page(Page::BootAnimation, port);
    }

    /// One tick of the cooperative loop
    ///
    /// Order per invocation: finish an in-flight round trip (while a
    /// response is outstanding nothing else runs, which keeps the link
    /// serialized), else decode and dispatch at most one touch report; then
    /// advance the timed operation; then the status broadcaster.
    pub fn poll<M, P>(&mut self, now_ms: u32, machine: &mut M, port: &mut P)
    where
        M: Machine,
        P: PanelPort,
    {
        if let Some(mut pending) = self.pending.take() {
            if pending.pump(port) {
                self.apply_pending(pending, now_ms, machine, port);
            } else {
                self.pending = Some(pending);
                return;
            }
        } else if let Some(report) = self.read_report(port) {
            self.dispatch(report, now_ms, machine, port);
            if self.pending.is_some() {
                return;
            }
        }

        if let Some(page) = self.op.tick(now_ms, machine) {
            self.show_page(page, port);
        }

        if self.status.fire(now_ms) {
            if let Ok(frame) = status_frame(machine) {
                write_frame(port, &frame);
            }
            if self.graph.step() {
                port.write(&graph_frame(machine));
            }
        }
    }

    /// Select a page and emit its frame
    pub fn show_page<P: PanelPort>(&mut self, page: Page, port: &mut P) {
        let raw = self.nav.select(page);
        write_frame(port, &Frame::show_page(raw));
    }

    fn read_report<P: PanelPort>(&mut self, port: &mut P) -> Option<TouchReport> {
        while let Some(byte) = port.read_byte() {
            if let Some(report) = self.parser.feed(byte) {
                return Some(report);
            }
        }
        None
    }
}

/// Encode and send a frame; encoding failures are silently dropped
pub(crate) fn write_frame<P: PanelPort>(port: &mut P, frame: &Frame) {
    if let Ok(bytes) = frame.encode_to_vec() {
        port.write(&bytes);
    }
}

/// Send a fixed 15-byte text field, zero padded, silently truncated
pub(crate) fn write_text_field<P: PanelPort>(port: &mut P, vp: u16, text: &str) {
    let mut field = [0u8; STATS_TEXT_LEN];
    let bytes = text.as_bytes();
    let len = bytes.len().min(field.len());
    field[..len].copy_from_slice(&bytes[..len]);

    if let Ok(frame) = Frame::var_write(vp, &field) {
        write_frame(port, &frame);
    }
}
