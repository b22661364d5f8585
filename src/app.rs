//! Application orchestrator.
//! Loads/merges config, initializes logging, and dispatches the subcommand
//! onto a `FileHandle`.

use anyhow::{Result, bail};
use std::error::Error as _;
use std::io;
use tracing::{debug, error};

use filetools::cli::{Args, Command};
use filetools::config::{load_config, write_template_config};
use filetools::helpers::os_hint;
use filetools::output as out;
use filetools::report::hex_dump;
use filetools::{
    Config, CopyOptions, DurabilityMode, FileHandle, FileHandleError, FileReport,
    default_config_path,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config location commands run before logging init
    if args.print_config {
        let p = default_config_path()?;
        out::print_info(&format!("filetools config path:\n  {}\n", p.display()));
        if p.exists() {
            out::print_info("A config file exists at that location.");
        } else {
            out::print_info("No config file there yet. Run with --init-config to create a template.");
        }
        return Ok(());
    }
    if args.init_config {
        let p = default_config_path()?;
        write_template_config(&p)?;
        out::print_success(&format!("A template filetools config was written to: {}", p.display()));
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        bail!("no subcommand given; try `filetools --help`");
    };

    let mut cfg = load_config().unwrap_or_else(|e| {
        out::print_warn(&format!("Ignoring config: {e:#}"));
        Config::default()
    });
    args.apply_overrides(&mut cfg);

    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!(?command, copy_buffer_size = cfg.copy_buffer_size, "starting filetools");

    execute(&cfg, command).map_err(|e| {
        error!(code = e.code(), error = %e, "command failed");
        if let Some(hint) = e.source().and_then(|s| s.downcast_ref::<io::Error>()).and_then(os_hint) {
            out::print_hint(hint);
        }
        anyhow::Error::new(e)
    })
}

fn execute(cfg: &Config, command: Command) -> Result<(), FileHandleError> {
    match command {
        Command::Info { path } => {
            let fh = FileHandle::open_path(path)?;
            out::print_user(&FileReport::from_handle(&fh)?.to_string());
        }
        Command::Copy {
            src,
            dst,
            sync,
            preserve_times,
        } => {
            let mut fh = FileHandle::open_path(src)?.with_copy_buffer_size(cfg.copy_buffer_size);
            let options = CopyOptions {
                durability: if sync { DurabilityMode::Full } else { DurabilityMode::Data },
                preserve_times,
            };
            let res = fh.copy_to_with(&dst, options)?;
            out::print_success(&format!(
                "Copied {} bytes '{}' -> '{}'",
                res.bytes,
                fh.resolved_path()?.display(),
                dst.display()
            ));
        }
        Command::Move { src, dst } => {
            let mut fh = FileHandle::open_path(&src)?;
            fh.move_to(&dst)?;
            out::print_success(&format!(
                "Moved '{}' -> '{}'",
                src.display(),
                fh.resolved_path()?.display()
            ));
        }
        Command::Dump {
            path,
            offset,
            length,
        } => {
            let mut fh = FileHandle::open_path(path)?;
            fh.seek_to(offset)?;
            let mut buf = vec![0u8; length];
            let n = fh.read_bytes(&mut buf)?;
            if n > 0 {
                out::print_user(&hex_dump(offset, &buf[..n]));
            }
        }
    }
    Ok(())
}
