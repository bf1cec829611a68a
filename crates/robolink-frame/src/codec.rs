use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: length (1) + kind (1) = 2 bytes.
pub const HEADER_SIZE: usize = 2;

/// Maximum payload size representable by the 1-byte length field.
pub const MAX_PAYLOAD: usize = 253;

/// Length declared by the placeholder frame emitted for empty payloads.
const PLACEHOLDER_LEN: usize = 2;

/// Payload kind carried in the second header byte.
///
/// The device rejects any other value, so decoding is strict about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameKind {
    /// ASCII command text.
    Command = 0,
    /// Raw binary payload (USB only).
    Data = 1,
}

impl FrameKind {
    /// The wire value of this kind.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for FrameKind {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(FrameKind::Command),
            1 => Ok(FrameKind::Data),
            other => Err(FrameError::BadKind {
                kind: other,
                expected: FrameKind::Command.as_byte(),
            }),
        }
    }
}

/// A decoded frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Payload kind from the header.
    pub kind: FrameKind,
    /// The payload bytes.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(kind: FrameKind, payload: impl Into<Bytes>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a payload into the wire envelope.
///
/// Wire format:
/// ```text
/// byte 0: payload length (0-253)
/// byte 1: kind (0 = ASCII command, 1 = raw binary)
/// byte 2..2+length: payload
/// ```
///
/// An empty payload encodes as the minimal placeholder `[2, kind, 0, 0]`.
/// Payload bytes are copied only when the declared length exceeds the
/// header size: 1- and 2-byte payloads go out with the correct length byte
/// but zeroed content. Deployed firmware depends on that envelope shape, so
/// it is kept as-is rather than corrected here.
pub fn encode(kind: FrameKind, payload: &[u8]) -> Result<Bytes> {
    let len = if payload.is_empty() {
        PLACEHOLDER_LEN
    } else {
        payload.len()
    };

    if len > MAX_PAYLOAD {
        return Err(FrameError::Malformed(format!(
            "payload of {len} bytes exceeds the {MAX_PAYLOAD}-byte frame limit"
        )));
    }

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + len);
    buf.put_u8(len as u8);
    buf.put_u8(kind.as_byte());

    if !payload.is_empty() && len > HEADER_SIZE {
        buf.put_slice(payload);
    } else {
        buf.put_bytes(0, len);
    }

    Ok(buf.freeze())
}

/// Encode an ASCII command string as a command-kind frame.
pub fn encode_command(text: &str) -> Result<Bytes> {
    if !text.is_ascii() {
        return Err(FrameError::Malformed(format!(
            "command text is not ASCII: {text:?}"
        )));
    }
    encode(FrameKind::Command, text.as_bytes())
}

/// Encode raw bytes as a data-kind frame.
pub fn encode_data(payload: &[u8]) -> Result<Bytes> {
    encode(FrameKind::Data, payload)
}

/// Decode the payload of a frame, validating the header against `expected`.
pub fn decode(buffer: &[u8], expected: FrameKind) -> Result<&[u8]> {
    if buffer.len() < HEADER_SIZE {
        return Err(FrameError::TooShort { len: buffer.len() });
    }

    if buffer[1] != expected.as_byte() {
        return Err(FrameError::BadKind {
            kind: buffer[1],
            expected: expected.as_byte(),
        });
    }

    let declared = buffer[0] as usize;
    if declared + HEADER_SIZE > buffer.len() {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: buffer.len(),
        });
    }

    Ok(&buffer[HEADER_SIZE..HEADER_SIZE + declared])
}

/// Decode a command-kind frame into display text.
///
/// Display-layer callers want a string no matter what arrived, so every
/// decode failure and the empty payload collapse to `""`.
pub fn decode_string(buffer: &[u8]) -> String {
    match decode(buffer, FrameKind::Command) {
        Ok(payload) if !payload.is_empty() => String::from_utf8_lossy(payload).into_owned(),
        Ok(_) => String::new(),
        Err(err) => {
            tracing::debug!(error = %err, "dropping undecodable command frame");
            String::new()
        }
    }
}
