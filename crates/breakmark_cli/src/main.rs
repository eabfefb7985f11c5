//! `breakmark` command-line host.
//!
//! # Responsibility
//! - Map each user-facing breakpoint operation to one subcommand.
//! - Act as a headless editor: `--open` files are the open buffers and marker
//!   updates are printed as Vim `:sign` commands.

mod host;

use breakmark_core::{
    flush_logs, init_logging, BreakpointService, CoreConfig, FileBreakpointRepository, LineCache,
    ServiceError,
};
use clap::{Parser, Subcommand};
use host::{resolve_path, FsHost};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "breakmark", about = "Manage debugger breakpoints from the editor", version)]
struct Cli {
    /// Breakpoint store file (defaults to BREAKMARK_STORE_PATH or the config dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Files to treat as open editor buffers
    #[arg(long = "open", global = true, value_name = "FILE")]
    open: Vec<PathBuf>,

    /// Output lists as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write rolling logs into this absolute directory
    #[arg(long, global = true, env = "BREAKMARK_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level used with --log-dir
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a breakpoint at FILE:LINE, or remove the existing one
    Toggle { file: PathBuf, line: u32 },
    /// Set the condition at FILE:LINE (empty text makes it unconditional)
    Condition {
        file: PathBuf,
        line: u32,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Remove every breakpoint
    Clear,
    /// Print breakpoints as file:line[:condition]
    List,
    /// Print quickfix entries as file:line:text
    Quickfix,
    /// Print location-list entries as file:line:text
    Loclist,
    /// Re-render markers for the open files
    Refresh,
}

#[derive(Serialize)]
struct ToggleView<'a> {
    action: &'static str,
    file: &'a str,
    line: u32,
}

#[derive(Serialize)]
struct ClearView {
    cleared: usize,
}

fn main() {
    let cli = Cli::parse();
    let result = run(cli);
    flush_logs();
    if let Err(message) = result {
        eprintln!("breakmark: {message}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    let mut config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let service = BreakpointService::with_style(
        FileBreakpointRepository::new(&config.store_path),
        config.marker_style,
    );
    let mut host = FsHost::new(&cli.open);

    match cli.command {
        Commands::Toggle { file, line } => {
            let outcome = service
                .toggle(&resolve_path(&file), line)
                .map_err(describe)?;
            let record = outcome.record();
            let action = if outcome.is_added() { "added" } else { "removed" };
            if cli.json {
                print_json(&ToggleView {
                    action,
                    file: &record.file,
                    line: record.line,
                })?;
            } else {
                println!("breakpoint {action}: {}", record.key());
            }
            refresh_if_open(&service, &mut host, !cli.open.is_empty())?;
        }
        Commands::Condition { file, line, text } => {
            let condition = text.join(" ");
            let outcome = service
                .edit_condition(&resolve_path(&file), line, &condition)
                .map_err(describe)?;
            if cli.json {
                print_json(&outcome.record)?;
            } else if !outcome.changed {
                println!("condition unchanged: {}", outcome.record.key());
            } else {
                match outcome.record.active_condition() {
                    Some(active) => println!("condition set: {} if {active}", outcome.record.key()),
                    None => println!("condition cleared: {}", outcome.record.key()),
                }
            }
            refresh_if_open(&service, &mut host, !cli.open.is_empty())?;
        }
        Commands::Clear => {
            let cleared = service.clear_all().map_err(describe)?;
            if cli.json {
                print_json(&ClearView { cleared })?;
            } else {
                println!("cleared {cleared} breakpoint(s)");
            }
            refresh_if_open(&service, &mut host, !cli.open.is_empty())?;
        }
        Commands::List => {
            let entries = service.list().map_err(describe)?;
            if cli.json {
                print_json(&entries)?;
            } else {
                entries.iter().for_each(|entry| println!("{entry}"));
            }
        }
        Commands::Quickfix | Commands::Loclist => {
            let mut lines = LineCache::new(host);
            let entries = service.locations(&mut lines).map_err(describe)?;
            if cli.json {
                print_json(&entries)?;
            } else {
                entries.iter().for_each(|entry| println!("{entry}"));
            }
        }
        Commands::Refresh => {
            refresh_if_open(&service, &mut host, true)?;
        }
    }

    Ok(())
}

fn refresh_if_open(
    service: &BreakpointService<FileBreakpointRepository>,
    host: &mut FsHost,
    enabled: bool,
) -> Result<(), String> {
    if !enabled {
        return Ok(());
    }
    service.refresh(host).map_err(describe)?;
    host.commands()
        .iter()
        .for_each(|command| println!("{command}"));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| format!("response encoding error: {err}"))?;
    println!("{text}");
    Ok(())
}

fn describe(err: ServiceError) -> String {
    err.to_string()
}
