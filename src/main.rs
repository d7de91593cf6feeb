use anyhow::Result;
use clap::Parser;
use dogvision::{DogvisionApp, DogvisionConfig};
use std::path::Path;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "dogvision")]
#[command(about = "Live camera display that simulates how a dog sees colour")]
#[command(version)]
#[command(long_about = "Captures frames from a camera, rotates and mirrors them for the \
mounted screen, and shows them unfiltered, through a dichromatic dog-vision colour filter, \
or split between the two. Keys 1/2/3, touch presses or lines on stdin switch modes; \
q, Esc or Ctrl+C quits.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "dogvision.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without opening any device")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Dry run mode - open and release every device without rendering
    #[arg(long, help = "Perform dry run - open camera, display and inputs, then release them")]
    dry_run: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Write logs to a file instead of stdout
    #[arg(
        long,
        value_name = "PATH",
        help = "Write logs to this file (keeps the terminal clear for keyboard input)"
    )]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle special modes that don't require full initialization
    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    let guard = init_logging(&args)?;

    let exit_code = run(&args).await?;
    info!("Dog vision exited with code: {}", exit_code);

    // Flush buffered file logs before exiting
    drop(guard);
    std::process::exit(exit_code);
}

async fn run(args: &Args) -> Result<i32> {
    info!("Starting dog vision v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match DogvisionConfig::load_from_file(&args.config) {
        Ok(config) => {
            info!("Configuration loaded successfully from: {}", args.config);
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if args.validate_config {
        return match config.validate() {
            Ok(()) => {
                info!("Configuration validation successful");
                println!("✓ Configuration is valid");
                Ok(0)
            }
            Err(e) => {
                error!("Configuration validation failed: {}", e);
                eprintln!("✗ Configuration validation failed: {}", e);
                Ok(1)
            }
        };
    }

    let app = DogvisionApp::new(config).map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    if args.dry_run {
        app.dry_run().map_err(|e| {
            error!("Dry run failed: {}", e);
            e
        })?;
        println!("✓ Dry run completed successfully - all components opened and released");
        return Ok(0);
    }

    let summary = app.run().await.map_err(|e| {
        error!("System error during execution: {}", e);
        e
    })?;

    Ok(summary.exit.exit_code())
}

fn init_logging(args: &Args) -> Result<WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dogvision={}", log_level)));

    let (writer, guard) = match &args.log_file {
        Some(path) => {
            let path = Path::new(path);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                anyhow::anyhow!("Log file path has no file name: {}", path.display())
            })?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            tracing_appender::non_blocking(appender)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };
    let ansi = args.log_file.is_none();

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .with_thread_ids(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_thread_ids(args.debug)
                .with_file(args.debug)
                .with_line_number(args.debug)
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();

    Ok(guard)
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# Dog vision configuration file");
    println!("# Every option with its default value. Environment variables such as");
    println!("# DOGVISION_CAMERA__INDEX=1 override individual keys.");
    println!();

    let rendered = toml::to_string_pretty(&DogvisionConfig::default())?;
    println!("{}", rendered);
    Ok(())
}
