use robolink_frame::{encode_command, encode_data, Result};

use crate::message::{
    ControlTransferInfo, Direction, TransferType, UsbCommand, UsbMessage, DESCRIPTOR_TYPE_STRING,
    REQUEST_GET_DESCRIPTOR,
};

/// Pluggable translation from command text to device payload bytes.
///
/// This is the seam for alternate command languages: the default path frames
/// the ASCII text itself, while e.g. the wireless directional bridge plugs
/// in an interpreter that emits a pin bitmask.
pub trait CommandInterpreter {
    fn interpret(&self, text: &str) -> Vec<u8>;
}

impl<F> CommandInterpreter for F
where
    F: Fn(&str) -> Vec<u8>,
{
    fn interpret(&self, text: &str) -> Vec<u8> {
        self(text)
    }
}

/// Build an outbound vendor command carrying framed ASCII text.
pub fn command(text: &str) -> Result<UsbMessage> {
    Ok(UsbMessage {
        ctrl: ControlTransferInfo::vendor(Direction::Out),
        command: None,
        raw_buffer: encode_command(text)?.to_vec(),
        device_info: None,
    })
}

/// Build an outbound vendor command whose payload is produced by a
/// [`CommandInterpreter`] and framed as raw data.
pub fn command_with<I: CommandInterpreter>(interpreter: &I, text: &str) -> Result<UsbMessage> {
    let mut msg = command(text)?;
    msg.raw_buffer = encode_data(&interpreter.interpret(text))?.to_vec();
    Ok(msg)
}

/// Build an outbound vendor message around a caller-supplied pre-framed buffer.
pub fn raw(buffer: Vec<u8>) -> UsbMessage {
    UsbMessage {
        ctrl: ControlTransferInfo::vendor(Direction::Out),
        command: None,
        raw_buffer: buffer,
        device_info: None,
    }
}

/// Build an inbound vendor read request with a zeroed buffer for the device
/// to fill.
pub fn input_request(flag: UsbCommand, capacity: usize) -> UsbMessage {
    UsbMessage {
        ctrl: ControlTransferInfo::vendor(Direction::In),
        command: Some(flag),
        raw_buffer: vec![0; capacity],
        device_info: None,
    }
}

/// Build a standard GET_DESCRIPTOR string query.
pub fn descriptor_query(capacity: usize, value: u8, index: u16, timeout_ms: u32) -> UsbMessage {
    UsbMessage {
        ctrl: ControlTransferInfo {
            direction: Direction::In,
            transfer_type: TransferType::Standard,
            request: REQUEST_GET_DESCRIPTOR,
            value: (u16::from(DESCRIPTOR_TYPE_STRING) << 8) | u16::from(value),
            index,
            timeout_ms,
        },
        command: None,
        raw_buffer: vec![0; capacity],
        device_info: None,
    }
}
