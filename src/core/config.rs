use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ledger::PlayerId;
use crate::renderer::Roster;
use crate::shared::constants;

/// Settings read from `playtime.config` (`key = value` lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tick_ms: u64,
    pub player_names: Vec<(PlayerId, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: constants::DEFAULT_TICK_MS,
            player_names: Vec::new(),
        }
    }
}

impl Config {
    /// Working directory first, then the user config directory.
    /// Missing files mean defaults.
    pub fn load() -> Result<Self> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn locate() -> Option<PathBuf> {
        let work_dir = std::env::current_dir().unwrap_or_default();
        Self::locate_in(&work_dir, dirs::config_dir().as_deref())
    }

    /// `work_dir/playtime.config`, else `config_dir/playtime/playtime.config`.
    pub fn locate_in(work_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
        let local = work_dir.join(constants::CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }

        config_dir
            .map(|dir| {
                dir.join(constants::CONFIG_DIR_NAME)
                    .join(constants::CONFIG_FILE)
            })
            .filter(|path| path.is_file())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        crate::utils::logger::info(&format!(
            "config loaded from {}: tick={}ms, {} named player(s)",
            path.display(),
            config.tick_ms,
            config.player_names.len()
        ));
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                bail!("line {}: expected 'key = value'", line_no + 1);
            };
            let key = key.trim();
            let value = value.trim();

            if key == "tick-ms" {
                config.tick_ms = parse_tick_ms(value)
                    .with_context(|| format!("line {}: bad value for tick-ms", line_no + 1))?;
            } else if let Some(number) = key.strip_prefix("player.") {
                let id = parse_player_number(number)
                    .with_context(|| format!("line {}: bad key '{}'", line_no + 1, key))?;
                if value.is_empty() {
                    bail!("line {}: empty name for {}", line_no + 1, key);
                }
                config.player_names.retain(|(pid, _)| *pid != id);
                config.player_names.push((id, value.to_string()));
            } else {
                crate::utils::logger::debug(&format!("ignoring unknown config key '{}'", key));
            }
        }

        config.player_names.sort_by_key(|(id, _)| *id);
        Ok(config)
    }

    /// Command-line `--tick-ms`, held to the same rule as the file value.
    pub fn override_tick_ms(&mut self, ms: u64) -> Result<()> {
        if ms == 0 {
            bail!("--tick-ms must be positive");
        }
        self.tick_ms = ms;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.player_names.clone())
    }
}

fn parse_tick_ms(value: &str) -> Result<u64> {
    let ms: u64 = value
        .parse()
        .with_context(|| format!("'{}' is not a whole number of milliseconds", value))?;
    if ms == 0 {
        bail!("tick interval must be positive");
    }
    Ok(ms)
}

fn parse_player_number(value: &str) -> Result<PlayerId> {
    let id: PlayerId = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a player number", value))?;
    if id == 0 || id > constants::ROSTER_SIZE {
        bail!("player number {} outside 1..={}", id, constants::ROSTER_SIZE);
    }
    Ok(id)
}
