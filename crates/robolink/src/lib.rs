//! Robot peripheral communication layer.
//!
//! robolink packages the host side of a small robot platform: a byte-frame
//! codec for the device link, USB control-transfer message building, a
//! wireless text protocol bridged onto the USB channel, and a quad actuator
//! controller.
//!
//! # Crate Structure
//!
//! - [`frame`] — `[length, kind, payload]` frame codec
//! - [`usb`] — Control-transfer message model and inbound decoders
//! - [`wireless`] — `name#body` text protocol, USB bridge, link probe
//! - [`control`] — Proportional quad actuator controller

/// Re-export frame codec types.
pub mod frame {
    pub use robolink_frame::*;
}

/// Re-export USB message types.
pub mod usb {
    pub use robolink_usb::*;
}

/// Re-export wireless protocol types.
pub mod wireless {
    pub use robolink_wireless::*;
}

/// Re-export controller types.
pub mod control {
    pub use robolink_control::*;
}
