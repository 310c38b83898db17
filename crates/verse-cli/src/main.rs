mod controller;
mod presenter;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use verse_acquire::{FetchConfig, HttpTransport, Settled, DEFAULT_BASE_URL};
use verse_animate::Interpolator;
use verse_model::{ErrorState, Outcome, VerseQuery, VerseResult};

use controller::{parse_line, Controller, Flow, HELP};

#[derive(Parser)]
#[command(name = "verse")]
#[command(about = "Look up scripture verses from the terminal")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Verse API base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Milliseconds between animation frames
    #[arg(long, global = true, default_value_t = 16)]
    frame_ms: u64,

    /// Run without a tween backend; animations become no-ops
    #[arg(long, global = true)]
    no_animation: bool,

    /// Let a slow, older response overwrite a newer one
    #[arg(long, global = true)]
    allow_stale: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one reference and print it
    Lookup {
        /// Scripture reference (e.g., "John 3:16")
        reference: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a random verse and print it
    Random {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read references and commands from stdin (default)
    Interactive,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonReport<'a> {
    Verse {
        #[serde(flatten)]
        verse: &'a VerseResult,
        fetched_at: String,
    },
    Error {
        error: ErrorState,
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let interp = if cli.no_animation {
        Interpolator::disabled()
    } else {
        Interpolator::builtin().with_frame_interval(Duration::from_millis(cli.frame_ms))
    };
    let config = FetchConfig {
        base_url: cli.base_url.clone(),
        stale_guard: !cli.allow_stale,
        ..FetchConfig::default()
    };
    let transport = HttpTransport::new(&config.user_agent)?;
    let controller = Controller::new(transport, interp, config);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Lookup { reference, json } => {
            tracing::debug!(reference = %reference, "One-shot lookup");
            let query = VerseQuery::Reference(reference.trim().to_string());
            let settled = controller.fetcher().fetch_and_wait(query).await;
            report(&settled, json)?;
        }
        Commands::Random { json } => {
            tracing::debug!("One-shot random lookup");
            let settled = controller.fetcher().fetch_and_wait(VerseQuery::Random).await;
            report(&settled, json)?;
        }
        Commands::Interactive => interactive(controller).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    // Map log level, keeping HTTP client internals quiet at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,hyper_util=info,reqwest=info,rustls=info",
        LogLevel::Trace => "trace,hyper_util=info,reqwest=info,rustls=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // stdout belongs to the verse display
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(
                time_format.to_string(),
            ))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
                time_format.to_string(),
            ))
            .init();
    }
}

fn report(settled: &Settled, json: bool) -> Result<()> {
    let outcome = settled.outcome();

    if json {
        let report = match outcome {
            Outcome::Verse(verse) => JsonReport::Verse {
                verse,
                fetched_at: chrono::Utc::now().to_rfc3339(),
            },
            Outcome::Failed(error) => JsonReport::Error {
                error: *error,
                message: error.to_string(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Outcome::Verse(verse) = outcome {
        println!("{}", verse.text);
        if !verse.reference.is_empty() {
            println!("  — {}", verse.reference);
        }
        let version = verse.version_line();
        if !version.is_empty() {
            println!("  {version}");
        }
    }

    match outcome {
        Outcome::Verse(_) => Ok(()),
        Outcome::Failed(error) => anyhow::bail!("{error}"),
    }
}

async fn interactive(controller: Controller<HttpTransport>) -> Result<()> {
    // Display and prompt share one writer so their output never interleaves.
    let out = Arc::new(Mutex::new(std::io::stdout()));
    let display = tokio::spawn(presenter::present(
        controller.surface().subscribe(),
        Arc::clone(&out),
    ));
    presenter::prompt(&out, &format!("{HELP}\n"))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        presenter::prompt(&out, "> ")?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match controller.dispatch(parse_line(&line)) {
            Flow::Continue => {}
            Flow::Help => presenter::prompt(&out, &format!("{HELP}\n"))?,
            Flow::Quit => break,
        }
    }

    tracing::debug!("Input closed");
    display.abort();
    Ok(())
}
