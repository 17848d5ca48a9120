mod sim;

use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, bail};
use clap::Parser;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use fdc_core::utils::{
    Action, Button, Glyph, Recorder, RecorderConfig, RecorderState,
    catalog::encode_row,
    controllers::{BUTTON_CHANNEL, ChannelButtons, CsvLog},
    session::Peripherals,
};
use sim::{ConsoleDisplay, ConsoleSound, SimAccelerometer, SimDelay};
use tracing::{info, warn};

/// Longest button script accepted on the command line.
const MAX_SCRIPT_STEPS: usize = 256;

type SimRecorder = Recorder<
    ConsoleDisplay,
    ChannelButtons<'static, CriticalSectionRawMutex, 16>,
    SimAccelerometer,
    CsvLog,
    ConsoleSound,
    SimDelay,
>;

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Seed the data log with this file, e.g. a log from an earlier session
    #[clap(long, conflicts_with = "actions")]
    catalog: Option<PathBuf>,
    /// Start a dataset with a custom catalog: name:glyph pairs, comma-separated
    #[clap(long, value_delimiter = ',')]
    actions: Vec<String>,
    /// Button script: a, b, ab, logo, or a number of idle ticks, comma-separated
    #[clap(long, default_value = "ab")]
    script: String,
    /// Data log capacity in bytes
    #[clap(long, default_value_t = 128 * 1024)]
    capacity: usize,
    /// Recorder configuration (JSON)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Sleep for real instead of skipping delays
    #[clap(long)]
    realtime: bool,
    /// Write the final data log to this file
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Press(Button),
    Idle(u32),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = match s.trim().to_ascii_lowercase().as_str() {
            "a" => Step::Press(Button::A),
            "b" => Step::Press(Button::B),
            "ab" => Step::Press(Button::AB),
            "logo" => Step::Press(Button::Logo),
            other => Step::Idle(
                other
                    .parse()
                    .with_context(|| format!("unknown script step {other:?}"))?,
            ),
        };
        Ok(step)
    }
}

fn parse_script(script: &str) -> anyhow::Result<heapless::Vec<Step, MAX_SCRIPT_STEPS>> {
    let mut steps = heapless::Vec::new();
    for token in script.split(',').filter(|t| !t.trim().is_empty()) {
        if steps.push(token.parse()?).is_err() {
            bail!("button script longer than {MAX_SCRIPT_STEPS} steps");
        }
    }
    Ok(steps)
}

fn parse_action(pair: &str) -> anyhow::Result<Action> {
    let (name, storage) = pair
        .rsplit_once(':')
        .with_context(|| format!("expected name:glyph, got {pair:?}"))?;
    let glyph = Glyph::parse_storage(storage)
        .with_context(|| format!("glyph for {name:?} must be 25 characters of 0/1"))?;
    Ok(Action::new(name, glyph))
}

fn initial_log(opts: &Opts) -> anyhow::Result<CsvLog> {
    if let Some(path) = &opts.catalog {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        return Ok(CsvLog::with_preamble(opts.capacity, &bytes));
    }
    if opts.actions.is_empty() {
        return Ok(CsvLog::new(opts.capacity));
    }
    let actions = opts
        .actions
        .iter()
        .map(|pair| parse_action(pair))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let row = encode_row(&actions).context("action names may not contain ';' or newlines")?;
    Ok(CsvLog::with_preamble(opts.capacity, row.as_bytes()))
}

fn load_config(opts: &Opts) -> anyhow::Result<RecorderConfig> {
    let Some(path) = &opts.config else {
        return Ok(RecorderConfig::default());
    };
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    RecorderConfig::from_json(&bytes)
        .map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))
}

/// One tick; failures are reported and the loop carries on.
fn tick(recorder: &mut SimRecorder) -> RecorderState {
    match recorder.tick() {
        Ok(state) => state,
        Err(e) => {
            warn!(?e, "tick failed");
            recorder.state()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts: Opts = Opts::parse();
    let script = parse_script(&opts.script)?;
    let config = load_config(&opts)?;
    let log = initial_log(&opts)?;

    let io = Peripherals {
        display: ConsoleDisplay,
        buttons: ChannelButtons::new(&BUTTON_CHANNEL),
        accel: SimAccelerometer::default(),
        log,
        sound: ConsoleSound,
        delay: SimDelay::new(opts.realtime),
    };
    let mut recorder: SimRecorder = match Recorder::new(io, config) {
        Ok(recorder) => recorder,
        Err(e) => bail!("recorder start-up failed: {e:?}"),
    };

    for step in script {
        match step {
            Step::Press(button) => {
                if BUTTON_CHANNEL.try_send(button).is_err() {
                    warn!(?button, "button channel full, press dropped");
                }
                tick(&mut recorder);
            }
            Step::Idle(ticks) => {
                for _ in 0..ticks {
                    tick(&mut recorder);
                }
            }
        }
        if recorder.state() == RecorderState::Exited {
            break;
        }
    }
    // let an in-flight recording complete
    while tick(&mut recorder) == RecorderState::Recording {}

    let io = recorder.into_peripherals();
    info!(
        bytes = io.log.as_bytes().len(),
        rows = io.log.rows().count(),
        skipped_ms = io.delay.skipped_ms(),
        "simulation finished"
    );
    match &opts.output {
        Some(path) => fs::write(path, io.log.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", String::from_utf8_lossy(io.log.as_bytes())),
    }
    Ok(())
}
