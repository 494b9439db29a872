use clap::Parser;
use factree::FactTree;
use factree::shell::{Session, StdConsole};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Learning "20 questions" game on a binary fact tree.
#[derive(Parser, Debug)]
#[command(name = "factree", version, about)]
struct Args {
    /// Knowledge base to load at start and offered as default for load/save
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Write log records to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Disable colored prompts
    #[arg(long)]
    no_color: bool,
}

fn init_logging(args: &Args) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    match &args.log {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(&args) {
        eprintln!("Cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    let mut tree = FactTree::new();
    if let Some(db) = args.db.as_ref().filter(|path| path.exists()) {
        if let Err(err) = tree.load(db) {
            warn!(path = %db.display(), error = %err, "starting with a fresh knowledge base");
            eprintln!("Cannot load {}: {err}", db.display());
        }
    }
    info!(objects = tree.num_leaves(), "knowledge base ready");

    let console = StdConsole::new(!args.no_color);
    let mut session = Session::new(tree, console);
    if let Some(db) = args.db {
        session = session.with_db_path(db);
    }

    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "session aborted");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
