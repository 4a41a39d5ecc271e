use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use floorloop_lib::command::execute_json_batch;
use floorloop_lib::event::RequestDispatcher;
use floorloop_lib::floor::{FloorBuilder, JsonProfileWriter};
use floorloop_lib::state::AppSettings;
use floorloop_lib::{FloorSession, RequestId, RequestQueue};

#[derive(Parser)]
#[command(name = "floorloop", about = "Check whether floor boundary lines form a closed loop")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Endpoint coincidence tolerance, overrides settings
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a tab-separated line table (x1, y1, x2, y2 per row)
    Check {
        /// Input file; stdin when omitted or "-"
        input: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the table and write the closed profile as JSON
    Floor {
        /// Input file; stdin when omitted or "-"
        input: Option<PathBuf>,
        /// Output profile path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Execute a JSON array of commands and print the responses
    Run {
        /// Command script
        script: PathBuf,
    },
    /// Write the effective settings (including --tolerance) as JSON
    SaveConfig {
        /// Destination; the user config directory when omitted
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floorloop=info,floorloop_lib=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether the requested operation succeeded.
fn run(cli: Cli) -> Result<bool, String> {
    let mut settings = match &cli.config {
        Some(path) => AppSettings::load_from(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => AppSettings::load(),
    };
    if let Some(tolerance) = cli.tolerance {
        settings.chain.tolerance = tolerance;
        settings.validate().map_err(|e| e.to_string())?;
    }

    match cli.command {
        Command::Check { input, json } => {
            let mut session = load_session(settings, input.as_deref())?;
            let mut builder = JsonProfileWriter::in_memory();
            submit_and_dispatch(&mut session, &mut builder, &[RequestId::CheckLoop]);

            if json {
                let report = session
                    .last_report()
                    .ok_or_else(|| "loop check did not run".to_string())?;
                let out = serde_json::to_string_pretty(report).map_err(|e| e.to_string())?;
                println!("{out}");
            } else {
                println!("{}", session.status_message());
            }
            Ok(session.is_curves_contiguous())
        }

        Command::Floor { input, out } => {
            let mut session = load_session(settings, input.as_deref())?;
            let mut builder = JsonProfileWriter::to_file(out);
            submit_and_dispatch(
                &mut session,
                &mut builder,
                &[RequestId::CheckLoop, RequestId::CreateFloor],
            );
            println!("{}", session.status_message());
            Ok(!builder.written().is_empty())
        }

        Command::Run { script } => {
            let json = std::fs::read_to_string(&script)
                .map_err(|e| format!("Failed to read {}: {e}", script.display()))?;
            let mut session = FloorSession::new(settings);
            let mut builder = JsonProfileWriter::in_memory();
            let responses = execute_json_batch(&mut session, &mut builder, &json)?;
            let all_ok = responses.iter().all(|r| r.success);
            let out = serde_json::to_string_pretty(&responses).map_err(|e| e.to_string())?;
            println!("{out}");
            Ok(all_ok)
        }

        Command::SaveConfig { path } => {
            let written = match path {
                Some(path) => settings.save_to(&path).map(|()| path),
                None => settings.save(),
            }
            .map_err(|e| e.to_string())?;
            println!("Saved settings to {}", written.display());
            Ok(true)
        }
    }
}

fn load_session(settings: AppSettings, input: Option<&Path>) -> Result<FloorSession, String> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            buf
        }
    };

    let mut session = FloorSession::new(settings);
    let report = session.paste(&text);
    tracing::info!(
        "Loaded {} lines ({} valid, {} rows skipped)",
        session.lines.len(),
        session.lines.valid_count(),
        report.skipped
    );
    Ok(session)
}

/// Submit requests from a producer thread, then handle them on this thread,
/// which owns the session.
fn submit_and_dispatch(session: &mut FloorSession, builder: &mut dyn FloorBuilder, requests: &[RequestId]) {
    let dispatcher = RequestDispatcher::new(Arc::new(RequestQueue::new()));
    let queue = dispatcher.queue();
    let requests = requests.to_vec();

    let producer = std::thread::spawn(move || {
        for request in requests {
            queue.enqueue(request);
        }
    });
    if producer.join().is_err() {
        tracing::error!("request producer panicked");
    }

    let handled = dispatcher.drain(session, builder);
    tracing::debug!("{} handled {:?}", dispatcher.name(), handled);
}
