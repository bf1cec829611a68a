//! Wireless text protocol and its bridge onto the USB command channel.
//!
//! The wireless side speaks newline-delimited `name#body` text. This crate
//! parses that vocabulary, translates device-affecting commands into USB
//! transfers, packages sensor rows for the return path, and provides the
//! link self-test probe.

pub mod bridge;
pub mod message;
pub mod probe;

pub use bridge::{direction_mask, usb_to_wireless, wireless_to_usb, DIRECTION_PAYLOAD_LEN};
pub use message::{WirelessCommand, WirelessMessage, SEPARATOR};
pub use probe::{
    matches_test_request, matches_test_response, test_request, test_response, LinkProbe, ProbeMode,
    ProbeReport, ProbeTransport, TEST_REQUEST, TEST_RESPONSE,
};
