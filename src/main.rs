//! tdg - turn TODO comments into tasks
//!
//! Scans a source tree for `TODO:`, `FIXME:` and similar comments and prints
//! them as a JSON report.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use tdg::{Environment, Report, ScanConfig, TdgError, TodoGenerator};

#[derive(Parser)]
#[command(name = "tdg")]
#[command(version)]
#[command(about = "Extract TODO comments from a source tree as JSON tasks", long_about = None)]
struct Cli {
    /// Root directory to scan
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Regular expression for paths to scan; repeat to allow several.
    /// Without any, every file is scanned.
    #[arg(short, long = "include", value_name = "REGEX")]
    include: Vec<String>,

    /// Minimum number of words (longer than 2 characters) in a title
    #[arg(long, value_name = "N")]
    min_words: Option<usize>,

    /// Minimum number of characters in a title
    #[arg(long, value_name = "N")]
    min_chars: Option<usize>,

    /// Maximum number of files scanned concurrently
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log.as_deref())?;

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
    Ok(())
}

fn init_tracing(verbose: bool, log: Option<&std::path::Path>) -> anyhow::Result<()> {
    let filter = if verbose {
        "tdg=debug,warn"
    } else {
        "tdg=info,warn"
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), TdgError> {
    let mut config = ScanConfig::load(&cli.root)?;
    if !cli.include.is_empty() {
        config = config.with_include(cli.include);
    }
    if let Some(min_words) = cli.min_words {
        config = config.with_min_words(min_words);
    }
    if let Some(min_chars) = cli.min_chars {
        config = config.with_min_chars(min_chars);
    }
    if let Some(jobs) = cli.jobs {
        config = config.with_max_concurrency(jobs);
    }

    let generator = TodoGenerator::new(config)?;
    tracing::info!(
        "Scanning {} with up to {} files at once",
        generator.root().display(),
        generator.max_concurrency()
    );
    let env = Environment::new(generator.root());
    let comments = generator.generate().await?;
    env.log_summary();

    let report = Report::new(&env, comments);
    let pretty = !cli.compact;
    match cli.output {
        Some(path) => {
            report.write_file(&path, pretty)?;
            tracing::info!(
                "Wrote {} comments to {}",
                report.comments.len(),
                path.display()
            );
        }
        None => report.write_to(std::io::stdout().lock(), pretty)?,
    }
    Ok(())
}
