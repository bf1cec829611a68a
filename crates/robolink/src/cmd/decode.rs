use robolink_frame::{decode, FrameKind};
use robolink_usb::{decode_adc_samples, decode_status};

use crate::cmd::{encode::parse_hex, DecodeArgs, DecodeAs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_device_info, print_payload, print_samples, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let buffer = parse_hex(&args.frame)?;
    match args.decode_as {
        DecodeAs::String => {
            let payload = decode(&buffer, FrameKind::Command)
                .map_err(|err| frame_error("decode failed", err))?;
            print_payload("payload", payload, format);
        }
        DecodeAs::Adc => {
            let samples =
                decode_adc_samples(&buffer).map_err(|err| frame_error("decode failed", err))?;
            print_samples(&samples, format);
        }
        DecodeAs::Status => {
            let info = decode_status(&buffer).map_err(|err| frame_error("decode failed", err))?;
            print_device_info(&info, format);
        }
    }
    Ok(SUCCESS)
}
