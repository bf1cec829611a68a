use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use robolink_usb::UsbDeviceInfo;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PayloadOutput {
    size: usize,
    hex: String,
    text: String,
}

/// Prints a raw byte buffer (an encoded frame or a decoded payload).
pub fn print_payload(label: &str, data: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PayloadOutput {
                size: data.len(),
                hex: hex::encode(data),
                text: payload_preview(data),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "SIZE", "HEX", "TEXT"])
                .add_row(vec![
                    label.to_string(),
                    data.len().to_string(),
                    hex::encode(data),
                    payload_preview(data),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{label}: size={} hex={} text={}",
                data.len(),
                hex::encode(data),
                payload_preview(data)
            );
        }
        OutputFormat::Raw => print_raw(data),
    }
}

pub fn print_device_info(info: &UsbDeviceInfo, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(info),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec![
                    "adc_available".to_string(),
                    info.adc_available.to_string(),
                ])
                .add_row(vec![
                    "control_available".to_string(),
                    info.control_available.to_string(),
                ])
                .add_row(vec!["adc_started".to_string(), info.adc_started.to_string()])
                .add_row(vec![
                    "num_adc_channels".to_string(),
                    info.num_adc_channels.to_string(),
                ])
                .add_row(vec![
                    "adc_sample_rate_hz".to_string(),
                    format!("{:.1}", info.adc_sample_rate_hz),
                ])
                .add_row(vec![
                    "adc_resolution".to_string(),
                    info.adc_resolution.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!(
                "adc={} control={} started={} channels={} rate={:.1}Hz resolution={}bit",
                info.adc_available,
                info.control_available,
                info.adc_started,
                info.num_adc_channels,
                info.adc_sample_rate_hz,
                info.adc_resolution
            );
        }
    }
}

pub fn print_samples(samples: &[u16], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&samples),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "VALUE"]);
            for (i, sample) in samples.iter().enumerate() {
                table.add_row(vec![i.to_string(), sample.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            let values: Vec<String> = samples.iter().map(|s| s.to_string()).collect();
            println!("{}", values.join(", "));
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
