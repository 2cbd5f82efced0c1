use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use glow_core::{load_settings, save_settings, GlowSettings, SharedTilt};
use glow_runtime::{
    ConsoleDiagnostics, GlowPipeline, LogDiagnostics, NullSink, RenderLoop, SinkPair,
    TerminalStrip,
};
use glow_sensor::{NoSensor, SyntheticWave, SystemClock, TiltProducer, TiltSource};

#[derive(Parser, Debug)]
#[command(name = "tiltglow")]
#[command(about = "Tilt-driven liquid glow for an LED strip, previewed in the terminal", long_about = None)]
struct Args {
    /// JSON settings file. Missing fields use the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to this path and exit.
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Stop after this many rendered frames (runs forever when omitted).
    #[arg(long)]
    frames: Option<u64>,

    /// Override the number of LEDs.
    #[arg(long)]
    strip_length: Option<usize>,

    /// Print only the diagnostic line, without the colored strip preview.
    #[arg(long, default_value_t = false)]
    no_preview: bool,

    /// Log filter, e.g. "debug" or "glow_sensor=trace". Defaults to RUST_LOG or "info".
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    if let Err(e) = builder.try_init() {
        eprintln!("logger already initialized: {}", e);
    }
}

fn resolve_settings(args: &Args) -> Result<GlowSettings, String> {
    let mut settings = match &args.config {
        Some(path) => load_settings(path)
            .map_err(|e| format!("Failed to load settings from {}: {}", path.display(), e))?,
        None => GlowSettings::default(),
    };
    if let Some(n) = args.strip_length {
        settings.strip_length = n;
    }
    settings.validate()?;
    Ok(settings)
}

fn run(args: Args) -> Result<(), String> {
    let settings = resolve_settings(&args)?;

    if let Some(path) = &args.write_config {
        save_settings(path, &settings)
            .map_err(|e| format!("Failed to write settings to {}: {}", path.display(), e))?;
        log::info!("Settings written to {}", path.display());
        return Ok(());
    }

    log::info!(
        "Starting: {} LEDs, tilt every {} ms, render every {} ms",
        settings.strip_length,
        settings.timing.tilt_period_ms,
        settings.timing.render_period_ms
    );

    let shared = Arc::new(SharedTilt::default());

    // Hosts have no I2C accelerometer; board builds hand an `Mpu6050` built
    // with `Mpu6050::from_config` to the tilt source instead.
    let source = TiltSource::new(
        NoSensor,
        SystemClock::start(),
        SyntheticWave::from_config(&settings.sensor),
    );
    let mut producer =
        TiltProducer::start(source, shared.clone(), settings.timing.tilt_period())?;

    let pipeline = GlowPipeline::new(&settings);
    let period = settings.timing.render_period();
    let mut render = if !io::stdout().is_terminal() {
        // Piped or redirected: status lines go to the log at trace level.
        let sink = SinkPair::new(NullSink, LogDiagnostics);
        RenderLoop::start(pipeline, shared, sink, period, args.frames)?
    } else if args.no_preview {
        let sink = SinkPair::new(NullSink, ConsoleDiagnostics::new(io::stdout()));
        RenderLoop::start(pipeline, shared, sink, period, args.frames)?
    } else {
        let sink = TerminalStrip::new(io::stdout(), settings.brightness);
        RenderLoop::start(pipeline, shared, sink, period, args.frames)?
    };

    render.wait();
    producer.stop();

    println!();
    log::info!("Rendered {} frames", render.frames_rendered());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
