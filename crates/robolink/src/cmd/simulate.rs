use std::fs;

use serde::{Deserialize, Serialize};

use robolink_control::QuadController;

use crate::cmd::SimulateArgs;
use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::OutputFormat;

/// Events applied before one controller tick.
#[derive(Debug, Default, Deserialize)]
struct TickEvent {
    input: Option<[f32; 4]>,
    accel: Option<Vec<[f32; 3]>>,
    gyro: Option<Vec<[f32; 3]>>,
}

#[derive(Serialize)]
struct TickOutput {
    tick: u32,
    state: [u8; 4],
    throttle: f32,
}

pub fn run(args: SimulateArgs, format: OutputFormat) -> CliResult<i32> {
    let script = load_script(&args)?;
    let controller = QuadController::new();

    for tick in 0..args.ticks {
        if let Some(event) = script.get(tick as usize) {
            if let Some(input) = event.input {
                controller.update_input(input);
            }
            for sample in event.accel.iter().flatten() {
                controller.update_sensor(*sample);
            }
            for rate in event.gyro.iter().flatten() {
                controller.update_gyro(*rate);
            }
        }
        let state = controller.last_state();
        match format {
            OutputFormat::Json => {
                let out = TickOutput {
                    tick,
                    state,
                    throttle: controller.throttle(),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            _ => {
                println!(
                    "{tick}, {}, {}, {}, {}",
                    state[0], state[1], state[2], state[3]
                );
            }
        }
    }
    Ok(SUCCESS)
}

fn load_script(args: &SimulateArgs) -> CliResult<Vec<TickEvent>> {
    if let Some(path) = &args.script {
        let text = fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return serde_json::from_str(&text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("invalid tick script: {err}")));
    }
    if let Some(input) = &args.input {
        let stick = parse_stick(input)?;
        // A constant stick applies on the first tick and holds after.
        return Ok(vec![TickEvent {
            input: Some(stick),
            ..TickEvent::default()
        }]);
    }
    Ok(Vec::new())
}

fn parse_stick(input: &str) -> CliResult<[f32; 4]> {
    let values: Vec<f32> = input
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|err| CliError::new(USAGE, format!("invalid stick input: {err}")))?;
    let stick: [f32; 4] = values
        .try_into()
        .map_err(|_| CliError::new(USAGE, "stick input needs exactly 4 values"))?;
    Ok(stick)
}
