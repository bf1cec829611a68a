//! USB control-transfer message model for the robot peripheral.
//!
//! Outbound messages come in four shapes: plain framed command, interpreted
//! command, pre-sized read request, and standard descriptor query. Inbound
//! buffers decode into device status, ADC samples, or descriptor text.
//!
//! The transport collaborator owns the device handle and performs the actual
//! control transfer; this crate only builds and interprets the buffers.

pub mod builder;
pub mod decode;
pub mod message;

pub use builder::{
    command, command_with, descriptor_query, input_request, raw, CommandInterpreter,
};
pub use decode::{decode_adc_samples, decode_descriptor_string, decode_status, sensor_line};
pub use message::{
    ControlTransferInfo, Direction, TransferType, UsbCommand, UsbDeviceInfo, UsbMessage,
    DEFAULT_TIMEOUT_MS, DESCRIPTOR_TYPE_STRING, REQUEST_GET_DESCRIPTOR,
};
