//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Global flags override values loaded from config.xml.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Inspect, copy and move single files.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Inspect, copy and move single files (Rust)"
)]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Override the copy chunk size.
    #[arg(long, global = true, value_name = "BYTES", help = "Chunk size for copies (bytes)")]
    pub buffer_size: Option<usize>,

    /// Print where filetools will look for the config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a template config to the config location, then exit.
    #[arg(long, help = "Write a template config.xml and exit")]
    pub init_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print path parts, size, timestamps and owner of a file.
    Info {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Copy a file byte-for-byte (destination is created or truncated).
    Copy {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dst: PathBuf,
        /// fsync the destination before returning.
        #[arg(long)]
        sync: bool,
        /// Carry access/modification times over to the copy.
        #[arg(long)]
        preserve_times: bool,
    },
    /// Rename a file (same volume only).
    Move {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dst: PathBuf,
    },
    /// Hex-dump a byte range of a file.
    Dump {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 256)]
        length: usize,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(n) = self.buffer_size
            && n > 0
        {
            cfg.copy_buffer_size = n;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
