//! Entry point for the terminal reader.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load and paginate the book on a worker thread.
//! - Drive a [`ReaderSession`] from line commands on stdin.

use anyhow::{Context, Result, anyhow, bail};
use gutenberg_reader::book::book_id_for;
use gutenberg_reader::cache::BookmarkStore;
use gutenberg_reader::cancellation::CancellationToken;
use gutenberg_reader::command::{Command, parse_command};
use gutenberg_reader::config::{AppConfig, load_config};
use gutenberg_reader::loader::{LoadRequest, spawn_load};
use gutenberg_reader::session::ReaderSession;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";
const USAGE: &str =
    "Usage: gutenberg-reader <path-to-book.txt> [--config <path>] [--budget <n>] [--raw]";

#[derive(Debug)]
struct Args {
    book_path: PathBuf,
    config_path: PathBuf,
    budget: Option<usize>,
    raw: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let mut config = load_config(&args.config_path);
    apply_overrides(&mut config, &args);
    if env::var_os("RUST_LOG").is_none() {
        set_log_level(reload_handle, config.log_level.as_filter_str());
    }

    let book_id = book_id_for(&args.book_path)?;
    info!(
        path = %args.book_path.display(),
        book = %book_id,
        budget = config.page_budget,
        normalize = config.normalize,
        "Opening book"
    );

    let token = CancellationToken::new();
    let loaded = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(token.clone(), Arc::clone(&loaded));

    let request = LoadRequest {
        book_id: book_id.clone(),
        path: args.book_path.clone(),
        page_budget: config.page_budget,
        normalize: config.normalize,
    };
    let book = spawn_load(request, token)?
        .join()
        .map_err(|_| anyhow!("book loader thread panicked"))??
        .ok_or_else(|| anyhow!("Loading cancelled"))?;
    loaded.store(true, Ordering::Release);

    let store = BookmarkStore::new(config.cache_root());
    let mut session =
        ReaderSession::from_pages(book.book_id, book.text, config.page_budget, book.pages);
    if let Some(bookmark) = store.load(&book_id) {
        info!(page = bookmark.page, "Resuming from saved page");
        session.restore(bookmark);
    }

    read_loop(&mut session, &store)
}

fn read_loop(session: &mut ReaderSession, store: &BookmarkStore) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    render(&mut stdout, session)?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command from stdin")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(stdout, "{msg} (n, p, g <index>, b <budget>, s, q)")?;
                continue;
            }
        };

        let before = session.current_page();
        match command {
            Command::Quit => break,
            Command::Next => {
                session.next_page();
            }
            Command::Prev => {
                session.prev_page();
            }
            Command::Goto(page) => session.set_page_clamped(page),
            Command::Budget(budget) => session.rebudget(budget),
            Command::Show => {}
        }

        if session.current_page() != before || matches!(command, Command::Budget(_)) {
            if let Err(err) = store.save(session.book_id(), session.bookmark()) {
                warn!("Failed to save bookmark: {err:#}");
            }
        }
        render(&mut stdout, session)?;
    }
    Ok(())
}

fn render(out: &mut impl Write, session: &ReaderSession) -> Result<()> {
    writeln!(out, "----- {} -----", session.page_label())?;
    match session.current_text() {
        Some(text) => writeln!(out, "{text}")?,
        None => writeln!(out, "(empty book)")?,
    }
    out.flush()?;
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut book_path = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut budget = None;
    let mut raw = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                config_path = PathBuf::from(value);
            }
            "--budget" => {
                let value = args.next().ok_or_else(|| anyhow!("--budget needs a value"))?;
                let parsed: usize = value
                    .parse()
                    .with_context(|| format!("Invalid --budget value `{value}`"))?;
                if parsed == 0 {
                    bail!("--budget must be positive");
                }
                budget = Some(parsed);
            }
            "--raw" => raw = true,
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("Unknown flag {flag}\n{USAGE}"),
            _ if book_path.is_none() => book_path = Some(PathBuf::from(&arg)),
            _ => bail!("Unexpected argument {arg}\n{USAGE}"),
        }
    }

    let book_path = book_path.ok_or_else(|| anyhow!(USAGE))?;
    if !book_path.exists() {
        return Err(anyhow!("File not found: {}", book_path.display()));
    }
    Ok(Args {
        book_path,
        config_path,
        budget,
        raw,
    })
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(budget) = args.budget {
        config.page_budget = budget;
    }
    if args.raw {
        config.normalize = false;
    }
}

/// First Ctrl-C while loading abandons the load; afterwards it quits.
fn install_interrupt_handler(token: CancellationToken, loaded: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        if loaded.load(Ordering::Acquire) {
            std::process::exit(130);
        }
        warn!("Interrupt received; abandoning book load");
        token.cancel();
    });
    if let Err(err) = result {
        warn!("Failed to install Ctrl-C handler: {err}");
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
