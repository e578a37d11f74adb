//! Evaluation settings loaded from `config.toml`.
//!
//! The default file lives in the platform config dir
//! (`~/.config/csvgrid/config.toml` on Linux). A file given with `--config`
//! must load; problems with the default file only produce a warning.

use anyhow::{Context, bail};
use csvgrid_engine::engine::{CyclePolicy, EvalOptions, validate_max_depth};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    eval: Option<EvalSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EvalSection {
    max_depth: Option<usize>,
    cycles: Option<String>,
    memoize: Option<bool>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay the file's settings on `options`.
    pub fn apply(&self, options: &mut EvalOptions) -> anyhow::Result<()> {
        let Some(eval) = &self.eval else {
            return Ok(());
        };
        if let Some(depth) = eval.max_depth {
            options.max_depth = validate_max_depth(depth).map_err(anyhow::Error::msg)?;
        }
        if let Some(cycles) = &eval.cycles {
            options.cycle_policy = cycles.parse::<CyclePolicy>().map_err(anyhow::Error::msg)?;
        }
        if let Some(memoize) = eval.memoize {
            options.memoize = memoize;
        }
        Ok(())
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "csvgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

fn read_config(path: &Path) -> anyhow::Result<ConfigFile> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        bail!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        );
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ConfigFile::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Evaluation options from the config file, before command-line overrides.
pub fn load_options(explicit: Option<&Path>, no_config: bool) -> anyhow::Result<EvalOptions> {
    let mut options = EvalOptions::default();
    if no_config {
        return Ok(options);
    }

    if let Some(path) = explicit {
        read_config(path)?.apply(&mut options)?;
        return Ok(options);
    }

    let Some(path) = user_config_path() else {
        return Ok(options);
    };
    if !path.is_file() {
        return Ok(options);
    }
    match read_config(&path).and_then(|file| file.apply(&mut options)) {
        Ok(()) => {}
        Err(err) => {
            warn!("ignoring config file: {:#}", err);
            options = EvalOptions::default();
        }
    }
    Ok(options)
}
