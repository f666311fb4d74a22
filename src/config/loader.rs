use std::fs;
use std::path::{Path, PathBuf};

use super::core::WhatIfConfig;
use crate::errors::{Result, WhatIfError};

pub const CONFIG_FILE_NAME: &str = ".dsat-whatif.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path)
}

/// Parse a config and replace any invalid section with its defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<WhatIfConfig> {
    let mut config = toml::from_str::<WhatIfConfig>(contents)?;

    reset_if_invalid(&mut config.exam, |s| s.validate());
    reset_if_invalid(&mut config.thresholds, |s| s.validate());
    reset_if_invalid(&mut config.impact, |s| s.validate());
    reset_if_invalid(&mut config.scoring, |s| s.validate());
    reset_if_invalid(&mut config.output, |s| s.validate());

    Ok(config)
}

fn reset_if_invalid<T: Default>(
    section: &mut Option<T>,
    validate: impl Fn(&T) -> std::result::Result<(), String>,
) {
    if let Some(value) = section.as_mut() {
        if let Err(e) = validate(value) {
            log::warn!("Invalid configuration: {}. Using defaults for this section.", e);
            *value = T::default();
        }
    }
}

/// Load an explicitly requested config file. Unlike discovery, a missing or
/// unparsable file is an error.
pub fn load_config_from(path: &Path) -> Result<WhatIfConfig> {
    let contents =
        read_config_file(path).map_err(|e| WhatIfError::io_with_path(e, path.to_path_buf()))?;
    let config = parse_and_validate_config(&contents).map_err(|e| {
        WhatIfError::configuration(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<WhatIfConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Missing files are the normal case during discovery
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: &Path, max_depth: usize) -> Vec<PathBuf> {
    start
        .ancestors()
        .take(max_depth)
        .map(Path::to_path_buf)
        .collect()
}

/// Find the nearest config at or above `start`.
pub fn discover_config(start: PathBuf) -> WhatIfConfig {
    directory_ancestors(&start, MAX_TRAVERSAL_DEPTH)
        .into_iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            WhatIfConfig::default()
        })
}

pub fn load_config() -> WhatIfConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            WhatIfConfig::default()
        }
    }
}
