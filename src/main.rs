use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use matrix_serial::config::SessionConfig;
use matrix_serial::mapping::IndexMapping;
use matrix_serial::monitor::spawn_monitor;
use matrix_serial::renderer::Renderer;
use matrix_serial::run::{run_program, Program, RunControl};
use matrix_serial::session::{self, SerialBackend};

#[derive(Parser)]
#[command(name = "matrix_serial")]
#[command(about = "Find a 12x6 LED matrix controller on USB serial and animate it.", long_about = None)]
struct Cli {
    /// Animation to play
    #[arg(long, value_enum, default_value_t = Program::Ambient)]
    mode: Program,

    /// Probe only this serial port instead of scanning USB devices
    #[arg(long)]
    port: Option<String>,

    /// Log everything the device sends back
    #[arg(long)]
    monitor: bool,

    /// Stop after this many frames (0 runs until Ctrl-C)
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dumps every frame)
    #[arg(long)]
    ddebug: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.ddebug {
        "trace"
    } else if cli.debug {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = SessionConfig::default().with_port(cli.port.clone());
    debug!("Session settings: {}", config.to_log_line());

    let channel = match session::connect(&SerialBackend, &config) {
        Ok(channel) => channel,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let control = RunControl::new().with_frame_limit(cli.frames);

    // Set up Ctrl-C handler with graceful shutdown
    let running = control.running_flag();
    let result = ctrlc::set_handler(move || {
        running.store(false, std::sync::atomic::Ordering::Relaxed);
    });

    if let Err(e) = result {
        warn!("Could not set Ctrl-C handler: {}", e);
    }

    let monitor = if cli.monitor {
        Some(spawn_monitor(channel.try_clone_reader()?, control.running_flag()))
    } else {
        None
    };

    let mut renderer = Renderer::new(IndexMapping::matrix_12x6(), channel.into_port());
    let outcome = run_program(cli.mode, &mut renderer, &control);

    // Turn the panel off on the way out (best effort)
    control.stop();
    renderer.blank();
    if let Err(e) = renderer.draw() {
        debug!("Could not blank panel: {:#}", e);
    }

    if let Some(handle) = monitor {
        let _ = handle.join();
    }

    outcome
}
