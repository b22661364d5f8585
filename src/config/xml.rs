//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Notes:
//! - A missing file means "use defaults"; a malformed one is an error.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::helpers::io_error_with_help;
use crate::output as out;
use crate::transfer::DEFAULT_COPY_BUFFER_SIZE;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "copy_buffer_size", default, deserialize_with = "de_usize_trimmed_opt")]
    copy_buffer_size: Option<usize>,
}

// Trims surrounding whitespace; unparsable values become None.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        match s.trim().parse::<LogLevel>() {
            Ok(level) => cfg.log_level = level,
            // Logging is not initialized while the config is loading.
            Err(e) => out::print_warn(&format!("Ignoring log_level from config: {e}")),
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(trimmed.into());
        }
    }
    cfg.copy_buffer_size = match parsed.copy_buffer_size {
        Some(n) if n > 0 => n,
        _ => DEFAULT_COPY_BUFFER_SIZE,
    };

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(io_error_with_help("read config", path))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the config from the default location; defaults if the file does not exist.
pub fn load_config() -> Result<Config> {
    let path = default_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path)
}

/// Write a commented template to `path`. Refuses to overwrite or to follow
/// symlinked ancestors.
pub fn write_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error_with_help("create config dir", parent))?;
    }

    let content = format!(
        "<!--\n  filetools configuration (XML)\n\n    log_level         -> quiet | normal | info | debug\n    log_file          -> path to log file (optional; stderr still used)\n    copy_buffer_size  -> chunk size in bytes for copies (default {DEFAULT_COPY_BUFFER_SIZE})\n\n  CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <copy_buffer_size>{DEFAULT_COPY_BUFFER_SIZE}</copy_buffer_size>\n</config>\n"
    );

    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_error_with_help("create config", path))?;
    f.write_all(content.as_bytes())?;
    f.sync_all()?;

    info!("Created template config at {}", path.display());
    Ok(())
}
