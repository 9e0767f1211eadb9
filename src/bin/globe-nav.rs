//! globe-nav - Command-line interface for Gesture Globe
//!
//! Commands:
//! - replay: Run recorded frames through the controller against a dry-run executor
//! - validate: Validate recorded frames
//! - doctor: Diagnose configuration and environment
//! - config: Print the default configuration
//! - behaviors: List the registered behaviors

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

use gesture_globe::{
    Action, ControllerConfig, Frame, FrameReader, GestureController, GestureError, ManualClock,
    RecordingExecutor, StaticGate, PRODUCER_NAME, VERSION,
};

/// globe-nav - Hand-gesture navigation for a desktop globe viewer
#[derive(Parser)]
#[command(name = "globe-nav")]
#[command(version = VERSION)]
#[command(about = "Turn hand-tracking frames into globe navigation input", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded frames and print the resulting input actions
    Replay {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Behavior to select (defaults to hand-slide)
        #[arg(short, long)]
        behavior: Option<String>,

        /// Load configuration from a JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat the target application as inactive for every frame
        #[arg(long)]
        inactive: bool,
    },

    /// Validate recorded frames
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON
    Config,

    /// List available behaviors
    Behaviors,
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one frame per line)
    Ndjson,
    /// JSON array of frames
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one record per frame)
    Ndjson,
    /// JSON array of records
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), NavCliError> {
    match cli.command {
        Commands::Replay {
            input,
            output,
            input_format,
            output_format,
            behavior,
            config,
            inactive,
        } => cmd_replay(
            &input,
            &output,
            input_format,
            output_format,
            behavior.as_deref(),
            config.as_deref(),
            inactive,
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),

        Commands::Config => cmd_config(),

        Commands::Behaviors => cmd_behaviors(),
    }
}

fn cmd_replay(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    behavior: Option<&str>,
    config_path: Option<&Path>,
    inactive: bool,
) -> Result<(), NavCliError> {
    let frames = read_frames(input, input_format)?;
    if frames.is_empty() {
        return Err(NavCliError::NoFrames);
    }

    let config = load_config(config_path)?;
    let start = frames
        .iter()
        .find_map(|f| f.timestamp)
        .unwrap_or_default();

    let (cx, cy) = config.screen.center();
    let mut controller = GestureController::standard(
        &config,
        RecordingExecutor::with_pointer(cx, cy),
        ManualClock::new(start),
        StaticGate(!inactive),
    )?;
    if let Some(name) = behavior {
        controller.select_behavior(name)?;
    }
    info!(frames = frames.len(), "replaying frames");

    let mut records = Vec::with_capacity(frames.len());
    for frame in &frames {
        if let Some(ts) = frame.timestamp {
            controller.clock_mut().set(ts);
        }
        let dispatched = controller.on_frame(frame);
        let actions = controller.executor_mut().take_actions();
        debug!(frame = frame.id, dispatched, actions = actions.len(), "frame replayed");
        records.push(ReplayRecord {
            frame_id: frame.id,
            dispatched,
            actions,
        });
    }

    let output_data = format_output(&records, &output_format)?;
    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), NavCliError> {
    let frames = read_frames(input, input_format)?;
    let results = FrameReader::validate_frames(&frames);

    let report = ValidationReport {
        total_frames: frames.len(),
        valid_frames: frames.len() - results.len(),
        invalid_frames: results.len(),
        errors: results
            .iter()
            .map(|r| ValidationErrorDetail {
                index: r.index,
                frame_id: r.frame_id,
                error: r.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total frames:   {}", report.total_frames);
        println!("Valid frames:   {}", report.valid_frames);
        println!("Invalid frames: {}", report.invalid_frames);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Frame {} (index {}): {}",
                    err.frame_id, err.index, err.error
                );
            }
        }
    }

    if report.invalid_frames > 0 {
        Err(NavCliError::ValidationFailed(report.invalid_frames))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config_path: Option<&Path>, json: bool) -> Result<(), NavCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", PRODUCER_NAME, VERSION),
    });

    match config_path {
        Some(path) if !path.exists() => checks.push(DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: "Configuration file does not exist, defaults apply".to_string(),
        }),
        Some(path) => {
            let check = match fs::read_to_string(path) {
                Ok(content) => match ControllerConfig::from_json(&content) {
                    Ok(config) => DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Ok,
                        message: format!(
                            "Configuration valid (screen {}x{})",
                            config.screen.width, config.screen.height
                        ),
                    },
                    Err(e) => DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Error,
                        message: e.to_string(),
                    },
                },
                Err(e) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read configuration file: {}", e),
                },
            };
            checks.push(check);
        }
        None => checks.push(DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Ok,
            message: "Using built-in defaults".to_string(),
        }),
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (pass frames with --input)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (replay with --input -)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("globe-nav Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(NavCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_config() -> Result<(), NavCliError> {
    println!("{}", ControllerConfig::default().to_json_pretty()?);
    Ok(())
}

fn cmd_behaviors() -> Result<(), NavCliError> {
    let config = ControllerConfig::default();
    let controller = GestureController::standard(
        &config,
        RecordingExecutor::new(),
        ManualClock::default(),
        StaticGate(false),
    )?;
    let selected = controller.registry().selected_name();
    for name in controller.registry().names() {
        let marker = if Some(name) == selected { " (default)" } else { "" };
        println!("{}{}", name, marker);
    }
    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, NavCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn read_frames(input: &Path, input_format: InputFormat) -> Result<Vec<Frame>, NavCliError> {
    let input_data = read_input(input)?;
    let frames = match input_format {
        InputFormat::Ndjson => FrameReader::parse_ndjson(&input_data)?,
        InputFormat::Json => FrameReader::parse_array(&input_data)?,
    };
    Ok(frames)
}

fn load_config(path: Option<&Path>) -> Result<ControllerConfig, NavCliError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(ControllerConfig::from_json(&json)?)
        }
        None => Ok(ControllerConfig::default()),
    }
}

fn format_output(records: &[ReplayRecord], format: &OutputFormat) -> Result<String, NavCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for record in records {
                lines.push(serde_json::to_string(record)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(records)?),
    }
}

// Error types

#[derive(Debug)]
enum NavCliError {
    Io(io::Error),
    Gesture(GestureError),
    Json(serde_json::Error),
    NoFrames,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for NavCliError {
    fn from(e: io::Error) -> Self {
        NavCliError::Io(e)
    }
}

impl From<GestureError> for NavCliError {
    fn from(e: GestureError) -> Self {
        NavCliError::Gesture(e)
    }
}

impl From<serde_json::Error> for NavCliError {
    fn from(e: serde_json::Error) -> Self {
        NavCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<NavCliError> for CliError {
    fn from(e: NavCliError) -> Self {
        match e {
            NavCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            NavCliError::Gesture(e) => {
                let (code, hint) = match &e {
                    GestureError::InvalidConfig(_) => (
                        "CONFIG_ERROR",
                        "Run 'globe-nav config' for a valid starting point",
                    ),
                    GestureError::BehaviorNotFound(_) | GestureError::DuplicateBehavior(_) => (
                        "BEHAVIOR_ERROR",
                        "Run 'globe-nav behaviors' to list available behaviors",
                    ),
                    GestureError::ParseError(_) | GestureError::JsonError(_) => (
                        "PARSE_ERROR",
                        "Ensure input contains one frame object per line, or use --input-format json",
                    ),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            NavCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            NavCliError::NoFrames => CliError {
                code: "NO_FRAMES".to_string(),
                message: "No frames found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            NavCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} frames failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            NavCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ReplayRecord {
    frame_id: u64,
    dispatched: bool,
    actions: Vec<Action>,
}

#[derive(Serialize)]
struct ValidationReport {
    total_frames: usize,
    valid_frames: usize,
    invalid_frames: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(Serialize)]
struct ValidationErrorDetail {
    index: usize,
    frame_id: u64,
    error: String,
}

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
