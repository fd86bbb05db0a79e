//! Incremental parser for inbound touch reports.
//!
//! The panel reports every touch as a nine-byte frame:
//!
//! ```text
//! [5A][A5][len][instr][04][code][words][key_hi][key_lo]
//! ```
//!
//! Only the sync bytes and the VP high byte (0x04) are validated; the
//! length, instruction, word-count and key high bytes are consumed without
//! inspection, exactly as the panel emits them today. A mismatch drops the
//! frame and returns the parser to the start state without re-examining the
//! offending byte; there is no resynchronization scan in this protocol
//! generation.

use crate::frame::{SYNC0, SYNC1};
use crate::vp::TOUCH_VP_HI;

/// One decoded touch report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchReport {
    /// Command code (VP low byte)
    pub code: u8,
    /// Key value (low byte of the touched control's word)
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the first sync byte
    Sync0,
    /// Got 0x5A, waiting for 0xA5
    Sync1,
    /// Consuming length/instruction, then validating the VP high byte
    Header { remaining: u8 },
    /// Consuming code, word count and key value
    Tail { remaining: u8 },
}

/// State machine for parsing inbound touch frames
///
/// Feed bytes as they arrive; a completed report is returned from the call
/// that consumed its final byte. Malformed frames are silently dropped.
#[derive(Debug, Clone)]
pub struct TouchParser {
    state: ParseState,
    code: u8,
}

impl Default for TouchParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchParser {
    /// Create a new parser at the start state
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync0,
            code: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Sync0;
        self.code = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(report)` when this byte completes a valid frame.
    pub fn feed(&mut self, byte: u8) -> Option<TouchReport> {
        match self.state {
            ParseState::Sync0 => {
                if byte == SYNC0 {
                    self.state = ParseState::Sync1;
                }
                // Silently ignore non-sync bytes while waiting
                None
            }
            ParseState::Sync1 => {
                if byte == SYNC1 {
                    self.state = ParseState::Header { remaining: 3 };
                } else {
                    self.state = ParseState::Sync0;
                }
                None
            }
            ParseState::Header { remaining } => {
                if remaining > 1 {
                    // Length and instruction bytes are not validated
                    self.state = ParseState::Header {
                        remaining: remaining - 1,
                    };
                } else if byte == TOUCH_VP_HI {
                    self.state = ParseState::Tail { remaining: 4 };
                } else {
                    self.state = ParseState::Sync0;
                }
                None
            }
            ParseState::Tail { remaining } => {
                match remaining {
                    4 => self.code = byte,
                    // Word count and key high byte are not validated
                    3 | 2 => {}
                    _ => {
                        self.state = ParseState::Sync0;
                        return Some(TouchReport {
                            code: self.code,
                            value: byte,
                        });
                    }
                }
                self.state = ParseState::Tail {
                    remaining: remaining - 1,
                };
                None
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete report found, if any.
    /// Remaining bytes after a complete report are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<TouchReport> {
        for &byte in bytes {
            if let Some(report) = self.feed(byte) {
                return Some(report);
            }
        }
        None
    }
}
