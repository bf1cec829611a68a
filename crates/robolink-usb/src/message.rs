use serde::Serialize;

/// Standard GET_DESCRIPTOR request code.
pub const REQUEST_GET_DESCRIPTOR: u8 = 0x06;

/// String descriptor type, per the USB descriptor tables.
pub const DESCRIPTOR_TYPE_STRING: u8 = 0x03;

/// Default control-transfer timeout.
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;

/// Control-transfer direction from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to host.
    In,
    /// Host to device.
    Out,
}

/// Control-transfer request type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    /// Vendor-defined request (the device's command protocol).
    Vendor,
    /// Standard USB request (descriptor queries).
    Standard,
}

/// Device operations addressed by vendor requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbCommand {
    Broadcast,
    UpdateOutput,
    GetSensorInfo,
    GetCmdResult,
    AdcStart,
    AdcRead,
    AdcStop,
    RunTest,
}

/// Addressing and timing fields for one control transfer.
#[derive(Debug, Clone, Copy)]
pub struct ControlTransferInfo {
    pub direction: Direction,
    pub transfer_type: TransferType,
    /// bRequest; meaningful for standard transfers only.
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub timeout_ms: u32,
}

impl ControlTransferInfo {
    pub fn vendor(direction: Direction) -> Self {
        Self {
            direction,
            transfer_type: TransferType::Vendor,
            request: 0,
            value: 0,
            index: 0,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// One control-transfer exchange, built fresh per request or response.
///
/// Immutable once handed to the transport; never shared across concurrent
/// transfers.
#[derive(Debug, Clone)]
pub struct UsbMessage {
    pub ctrl: ControlTransferInfo,
    pub command: Option<UsbCommand>,
    /// The encoded frame actually placed on the wire (or the buffer the
    /// device is expected to fill, for IN transfers).
    pub raw_buffer: Vec<u8>,
    /// Populated only after a status frame is decoded.
    pub device_info: Option<UsbDeviceInfo>,
}

/// Decoded device status and ADC configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsbDeviceInfo {
    pub adc_available: bool,
    pub control_available: bool,
    pub adc_started: bool,
    pub num_adc_channels: u8,
    pub adc_sample_rate_hz: f64,
    pub adc_resolution: u8,
}
