use robolink_frame::{decode, FrameError, FrameKind, Result};

use crate::message::UsbDeviceInfo;

/// Payload bytes a status frame must carry: state bits, channel count,
/// source frequency, prescaler, resolution.
const STATUS_PAYLOAD_LEN: usize = 5;

/// Decode the fixed-layout status/ADC-configuration frame.
///
/// Layout after the frame header:
/// ```text
/// byte 2: status bits — bit0 adc_available, bit2 control_available,
///         bit3 adc_started
/// byte 3: number of ADC channels
/// byte 4: ADC source frequency (MHz)
/// byte 5: ADC prescaler
/// byte 6: ADC resolution (bits)
/// ```
pub fn decode_status(buffer: &[u8]) -> Result<UsbDeviceInfo> {
    let payload = decode(buffer, FrameKind::Command)?;
    if payload.len() < STATUS_PAYLOAD_LEN {
        return Err(FrameError::Malformed(format!(
            "status frame needs {STATUS_PAYLOAD_LEN} payload bytes, got {}",
            payload.len()
        )));
    }

    let state = payload[0];
    let src_freq_mhz = payload[2];
    let prescaler = payload[3];
    if prescaler == 0 {
        return Err(FrameError::Malformed(
            "status frame declares ADC prescaler 0".to_string(),
        ));
    }

    Ok(UsbDeviceInfo {
        adc_available: state & 0x01 != 0,
        control_available: state & 0x04 != 0,
        adc_started: state & 0x08 != 0,
        num_adc_channels: payload[1],
        adc_sample_rate_hz: f64::from(src_freq_mhz) * 1e6 / f64::from(prescaler),
        adc_resolution: payload[4],
    })
}

/// Decode an ADC sample frame into 16-bit readings.
///
/// Two bytes per reading, big-endian (high byte first in wire order).
pub fn decode_adc_samples(buffer: &[u8]) -> Result<Vec<u16>> {
    let payload = decode(buffer, FrameKind::Command)?;
    Ok(payload
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

/// Decode a string-descriptor response buffer.
///
/// The text starts at offset 2 (after bLength and bDescriptorType) and is
/// UTF-16LE, not the ASCII used on the command path.
pub fn decode_descriptor_string(buffer: &[u8]) -> String {
    if buffer.len() < 2 {
        return String::new();
    }
    let units: Vec<u16> = buffer[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Render a timestamped CSV line from decoded ADC samples, as written to
/// sensor logs: `"<ts>, v1, v2, ...\n"`.
pub fn sensor_line(timestamp_ns: i64, samples: &[u16]) -> String {
    let mut line = timestamp_ns.to_string();
    for sample in samples {
        line.push_str(", ");
        line.push_str(&sample.to_string());
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_frame_unpacks_bits_and_rate() {
        // bits: adc_available | adc_started; 4 channels; 16 MHz / 128.
        let buffer = [5, 0, 0b0000_1001, 4, 16, 128, 10];
        let info = decode_status(&buffer).unwrap();

        assert!(info.adc_available);
        assert!(!info.control_available);
        assert!(info.adc_started);
        assert_eq!(info.num_adc_channels, 4);
        assert_eq!(info.adc_sample_rate_hz, 125_000.0);
        assert_eq!(info.adc_resolution, 10);
    }

    #[test]
    fn status_control_bit_is_bit_two() {
        let buffer = [5, 0, 0b0000_0100, 0, 8, 64, 12];
        let info = decode_status(&buffer).unwrap();
        assert!(info.control_available);
        assert!(!info.adc_available);
        assert!(!info.adc_started);
    }

    #[test]
    fn status_rejects_bad_frames() {
        assert!(decode_status(&[5]).is_err());
        // Data kind instead of command kind.
        assert!(matches!(
            decode_status(&[5, 1, 1, 4, 16, 128, 10]),
            Err(FrameError::BadKind { .. })
        ));
        // Declared length larger than buffer.
        assert!(matches!(
            decode_status(&[9, 0, 1, 4, 16]),
            Err(FrameError::LengthMismatch { .. })
        ));
        // Too few payload bytes for the status layout.
        assert!(matches!(
            decode_status(&[2, 0, 1, 4]),
            Err(FrameError::Malformed(_))
        ));
    }

    #[test]
    fn status_rejects_zero_prescaler() {
        let buffer = [5, 0, 1, 4, 16, 0, 10];
        assert!(matches!(
            decode_status(&buffer),
            Err(FrameError::Malformed(_))
        ));
    }

    #[test]
    fn adc_samples_pair_big_endian() {
        let buffer = [4, 0, 0x01, 0x02, 0x03, 0x04];
        assert_eq!(decode_adc_samples(&buffer).unwrap(), vec![0x0102, 0x0304]);
    }

    #[test]
    fn adc_samples_drop_odd_trailing_byte() {
        let buffer = [3, 0, 0x01, 0x02, 0x03];
        assert_eq!(decode_adc_samples(&buffer).unwrap(), vec![0x0102]);
    }

    #[test]
    fn adc_samples_reject_malformed_frames() {
        assert!(decode_adc_samples(&[]).is_err());
        assert!(decode_adc_samples(&[4, 1, 0, 0, 0, 0]).is_err());
        assert!(decode_adc_samples(&[8, 0, 0, 0]).is_err());
    }

    #[test]
    fn descriptor_string_is_utf16le() {
        // bLength, bDescriptorType, then "Robo" in UTF-16LE.
        let buffer = [10, 3, b'R', 0, b'o', 0, b'b', 0, b'o', 0];
        assert_eq!(decode_descriptor_string(&buffer), "Robo");
    }

    #[test]
    fn descriptor_string_tolerates_short_and_odd_buffers() {
        assert_eq!(decode_descriptor_string(&[]), "");
        assert_eq!(decode_descriptor_string(&[10]), "");
        // Odd trailing byte is dropped.
        let buffer = [6, 3, b'A', 0, b'B'];
        assert_eq!(decode_descriptor_string(&buffer), "A");
    }

    #[test]
    fn sensor_line_format() {
        assert_eq!(sensor_line(42, &[100, 200]), "42, 100, 200\n");
        assert_eq!(sensor_line(7, &[]), "7\n");
    }
}
