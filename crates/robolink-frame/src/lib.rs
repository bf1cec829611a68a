//! Length-prefixed command/data framing shared by the USB and wireless links.
//!
//! Every exchange with the peripheral is wrapped in the same 2-byte envelope:
//! - A 1-byte payload length
//! - A 1-byte kind (0 = ASCII command, 1 = raw binary)
//!
//! The codec is pure and stateless; transports own the buffers and the
//! record boundaries.

pub mod codec;
pub mod error;

pub use codec::{
    decode, decode_string, encode, encode_command, encode_data, Frame, FrameKind, HEADER_SIZE,
    MAX_PAYLOAD,
};
pub use error::{FrameError, Result};
