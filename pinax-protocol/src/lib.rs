//! Touch-panel communication protocol for Pinax
//!
//! This crate defines the serial protocol between the motion controller and
//! the resistive touch panel. The panel is a memory-mapped terminal: the
//! controller writes values into the panel's variable space ("VPs") and the
//! panel reports touches as small fixed-shape frames.
//!
//! # Protocol Overview
//!
//! All messages use a sync-delimited binary frame format:
//! ```text
//! ┌───────┬───────┬────────┬────────┬─────────┬─────────────┐
//! │ 0x5A  │ 0xA5  │ LENGTH │ OPCODE │ ADDRESS │ PAYLOAD     │
//! │ 1B    │ 1B    │ 1B     │ 1B     │ 2B      │ 0–n B       │
//! └───────┴───────┴────────┴────────┴─────────┴─────────────┘
//! ```
//!
//! LENGTH counts everything after itself (opcode + address + payload).
//! There is no checksum in this protocol generation; frames whose sync
//! bytes mismatch are dropped without a resynchronization scan.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod touch;
pub mod vp;

pub use frame::{curve, var_write_header, Frame, FrameError, MAX_PAYLOAD_SIZE, SYNC0, SYNC1};
pub use touch::{TouchParser, TouchReport};
