use serde::Serialize;

use robolink_wireless::{wireless_to_usb, WirelessMessage};

use crate::cmd::BridgeArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_payload, OutputFormat};

#[derive(Serialize)]
struct NoTransfer<'a> {
    command: &'a str,
    body: &'a str,
    usb_transfer: Option<()>,
}

pub fn run(args: BridgeArgs, format: OutputFormat) -> CliResult<i32> {
    let msg = WirelessMessage::decode(&args.line);
    match wireless_to_usb(&msg) {
        Some(usb) => {
            print_payload("usb", &usb.raw_buffer, format);
        }
        None => {
            // Not a device-side command; report the parse instead.
            match format {
                OutputFormat::Json => {
                    let out = NoTransfer {
                        command: msg.command.name(),
                        body: &msg.body,
                        usb_transfer: None,
                    };
                    println!(
                        "{}",
                        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                    );
                }
                _ => {
                    println!(
                        "command={} body={} (no device transfer)",
                        msg.command.name(),
                        msg.body
                    );
                }
            }
        }
    }
    Ok(SUCCESS)
}
