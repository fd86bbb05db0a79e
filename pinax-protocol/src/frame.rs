//! Frame encoding for the touch-panel link.
//!
//! Frame format:
//! - SYNC (2 bytes): 0x5A 0xA5
//! - LENGTH (1 byte): opcode + address + payload length (payload + 3)
//! - OPCODE (1 byte): register/variable access command
//! - ADDRESS (2 bytes): big-endian register or variable pointer
//! - PAYLOAD (0-n bytes): opcode-specific data
//!
//! The curve opcode (0x84) deviates from this shape: its body is a channel
//! mask followed by raw samples, with no address word. It gets a dedicated
//! builder rather than a `Frame`.

use heapless::Vec;

/// First frame synchronization byte
pub const SYNC0: u8 = 0x5A;
/// Second frame synchronization byte
pub const SYNC1: u8 = 0xA5;

/// Write a panel register (page select lives in register space)
pub const OP_REGISTER_WRITE: u8 = 0x80;
/// Write words into the panel's variable memory
pub const OP_VAR_WRITE: u8 = 0x82;
/// Request a block of the panel's variable memory
pub const OP_VAR_READ: u8 = 0x83;
/// Append samples to the temperature graph curve
pub const OP_CURVE_WRITE: u8 = 0x84;

/// Maximum payload carried inside a single frame
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Maximum complete frame size (SYNC + LENGTH + OPCODE + ADDRESS + payload)
pub const MAX_FRAME_SIZE: usize = 2 + 1 + 1 + 2 + MAX_PAYLOAD_SIZE;

/// Errors that can occur during frame encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// An outbound frame addressed at panel memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Access opcode
    pub opcode: u8,
    /// Register or variable pointer (big-endian on the wire)
    pub addr: u16,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given opcode, address and payload
    pub fn new(opcode: u8, addr: u16, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            opcode,
            addr,
            payload: payload_vec,
        })
    }

    /// Frame writing `payload` into variable memory at `vp`
    pub fn var_write(vp: u16, payload: &[u8]) -> Result<Self, FrameError> {
        Self::new(OP_VAR_WRITE, vp, payload)
    }

    /// Frame requesting `words` 16-bit words of variable memory from `vp`
    pub fn var_read(vp: u16, words: u8) -> Self {
        let mut payload = Vec::new();
        // One byte always fits
        let _ = payload.push(words);
        Self {
            opcode: OP_VAR_READ,
            addr: vp,
            payload,
        }
    }

    /// Frame selecting a panel page by raw id
    ///
    /// The page id lands in register 0x03; the id byte is emitted verbatim.
    pub fn show_page(raw: u8) -> Self {
        let mut payload = Vec::new();
        let _ = payload.push(raw);
        Self {
            opcode: OP_REGISTER_WRITE,
            addr: crate::vp::REG_PAGE,
            payload,
        }
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 6 + self.payload.len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = SYNC0;
        buffer[1] = SYNC1;
        buffer[2] = (self.payload.len() + 3) as u8;
        buffer[3] = self.opcode;
        buffer[4] = (self.addr >> 8) as u8;
        buffer[5] = self.addr as u8;
        buffer[6..6 + self.payload.len()].copy_from_slice(&self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Header of a variable write whose payload is streamed separately
///
/// The file list and selected-file pushes declare their data length up front
/// and stream the name bytes right behind the header.
pub fn var_write_header(vp: u16, data_len: u8) -> [u8; 6] {
    [
        SYNC0,
        SYNC1,
        data_len.wrapping_add(3),
        OP_VAR_WRITE,
        (vp >> 8) as u8,
        vp as u8,
    ]
}

/// Curve frame appending one hotend and one bed sample
///
/// Body shape is `[channel_mask][sample…]`; channels 0 and 1 are the hotend
/// and bed traces.
pub fn curve(hotend: u16, bed: u16) -> [u8; 9] {
    [
        SYNC0,
        SYNC1,
        0x06,
        OP_CURVE_WRITE,
        0x03, // channels 0 and 1
        (hotend >> 8) as u8,
        hotend as u8,
        (bed >> 8) as u8,
        bed as u8,
    ]
}
