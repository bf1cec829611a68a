//! Translation between the wireless text protocol and USB messages.

use robolink_usb::{builder, sensor_line, UsbCommand, UsbMessage};

use crate::message::{WirelessCommand, WirelessMessage};

/// Length of a direction payload: [pin group, reserved, bitmask].
pub const DIRECTION_PAYLOAD_LEN: usize = 3;

/// Maps a movement token to the device's output pin payload.
///
/// The first byte selects pin group 1, the second is reserved, the third
/// carries the pin bitmask. Matching is case-insensitive; an unrecognized
/// token yields an all-clear mask.
pub fn direction_mask(token: &str) -> [u8; DIRECTION_PAYLOAD_LEN] {
    let bits: u8 = match token.to_ascii_lowercase().as_str() {
        "w" | "up" => 0x01,
        "s" | "down" => 0x02,
        "d" | "right" => 0x04,
        "a" | "left" => 0x08,
        "q" => 0x10,
        "e" => 0x20,
        "r" => 0x40,
        "f" => 0x80,
        _ => 0x00,
    };
    [1, 0, bits]
}

/// Translates an inbound wireless message into a USB transfer, if the
/// command has a device-side effect.
///
/// Only directional and character commands reach the device; everything
/// else stays on the wireless side and yields `None`.
pub fn wireless_to_usb(msg: &WirelessMessage) -> Option<UsbMessage> {
    match msg.command {
        WirelessCommand::Dir | WirelessCommand::Char => {
            let payload = direction_mask(&msg.body);
            let mut usb = builder::raw(payload.to_vec());
            usb.command = Some(UsbCommand::UpdateOutput);
            usb.ctrl.value = u16::from(payload[2]);
            Some(usb)
        }
        _ => None,
    }
}

/// Packages one ADC sample row as an outbound sensor report.
pub fn usb_to_wireless(timestamp_ns: i64, samples: &[u16]) -> WirelessMessage {
    let line = sensor_line(timestamp_ns, samples);
    WirelessMessage::new(WirelessCommand::Sensor, line.trim_end())
}
