use anyhow::{Context, Result};
use clap::Parser;
use logging::{AttachPolicy, Level, LoggingContext};
use output::OutputPath;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "epicli")]
#[command(about = "Writes log records to the console and to <output-dir>/log.json")]
struct Args {
    /// Minimum severity written to either sink
    #[arg(long, env = "EPICLI_LOG_LEVEL", default_value = "INFO")]
    log_level: Level,

    /// Directory holding log.json, defaults to ./build
    #[arg(long, env = "EPICLI_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Name of the logger the messages are emitted through
    #[arg(long, default_value = "epicli")]
    logger: String,

    /// Severity of the emitted messages
    #[arg(long, default_value = "INFO")]
    level: Level,

    /// Write a record once per attachment instead of once per logger
    #[arg(long)]
    attach_per_call: bool,

    /// Messages to log, read line by line from stdin when omitted
    message: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let output = OutputPath::resolve(args.output_dir).context("Failed to resolve output path")?;
    output
        .ensure_exists()
        .context("Failed to prepare output directory")?;

    let policy = if args.attach_per_call {
        AttachPolicy::PerCall
    } else {
        AttachPolicy::Once
    };
    let context = LoggingContext::builder(output.dir())
        .level(args.log_level)
        .attach_policy(policy)
        .build()
        .context("Failed to set up logging")?;
    context
        .install_global()
        .context("Failed to install logging")?;

    debug!(log_path = %context.log_path().display(), "logging set up");

    let log = context.get_logger(&args.logger);
    if args.message.is_empty() {
        for line in std::io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            if !line.trim().is_empty() {
                log.log(args.level, line);
            }
        }
    } else {
        log.log(args.level, args.message.join(" "));
    }

    Ok(())
}
