use robolink_frame::{encode_command, encode_data};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_payload, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = match (&args.data, &args.raw) {
        (Some(text), None) => {
            encode_command(text).map_err(|err| frame_error("encode failed", err))?
        }
        (None, Some(hex_payload)) => {
            let payload = parse_hex(hex_payload)?;
            encode_data(&payload).map_err(|err| frame_error("encode failed", err))?
        }
        _ => {
            return Err(CliError::new(USAGE, "exactly one of --data or --raw is required"));
        }
    };
    print_payload("frame", &frame, format);
    Ok(SUCCESS)
}

pub(crate) fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    hex::decode(input.trim())
        .map_err(|err| CliError::new(USAGE, format!("invalid hex payload: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_even_length_hex() {
        assert_eq!(parse_hex("0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(parse_hex(" ff \n").unwrap(), vec![0xff]);
    }

    #[test]
    fn parse_hex_rejects_odd_or_invalid_input() {
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn requires_exactly_one_payload_source() {
        let err = run(
            EncodeArgs {
                data: None,
                raw: None,
            },
            OutputFormat::Json,
        )
        .expect_err("empty args should fail");
        assert_eq!(err.code, USAGE);
    }
}
