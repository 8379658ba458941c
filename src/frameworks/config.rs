use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;

use crate::domain::CountdownTarget;
use crate::use_cases::CountdownSettings;
use crate::use_cases::countdown::DEFAULT_COMPLETION_MESSAGE;

// Runtime/session constants (not invitation content).

pub const RENDER_CHANNEL_CAPACITY: usize = 256;

pub const DEFAULT_TARGET: &str = "2025-09-07T19:00:00";
const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_HIGHLIGHT_MS: u64 = 200;
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid countdown target `{0}` (expected YYYY-MM-DDTHH:MM:SS or RFC 3339)")]
    InvalidTarget(String),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved settings for one page session.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    pub target: CountdownTarget,
    pub tick_interval: Duration,
    pub countdown: CountdownSettings,
    pub submit_delay: Duration,
}

// Optional TOML file named by INVITE_CONFIG.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    event: EventSection,
    #[serde(default)]
    rsvp: RsvpSection,
}

#[derive(Debug, Default, Deserialize)]
struct EventSection {
    target: Option<String>,
    completion_message: Option<String>,
    tick_ms: Option<u64>,
    highlight_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RsvpSection {
    submit_delay_ms: Option<u64>,
}

pub fn load() -> Result<InviteConfig, ConfigError> {
    load_with(|key| env::var(key).ok())
}

/// Environment values win over the file, the file over built-in defaults.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<InviteConfig, ConfigError> {
    let file = match lookup("INVITE_CONFIG") {
        Some(path) => read_file(Path::new(&path))?,
        None => FileConfig::default(),
    };

    let millis = |key: &str, from_file: Option<u64>, default: u64| {
        lookup(key)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .or(from_file)
            .unwrap_or(default)
    };

    let target_raw = lookup("INVITE_TARGET")
        .or(file.event.target)
        .unwrap_or_else(|| DEFAULT_TARGET.to_string());
    let target = parse_target(&target_raw)?;

    // A zero period would make the interval panic.
    let tick_ms = millis("COUNTDOWN_TICK_MS", file.event.tick_ms, DEFAULT_TICK_MS).max(1);
    let highlight_ms = millis(
        "COUNTDOWN_HIGHLIGHT_MS",
        file.event.highlight_ms,
        DEFAULT_HIGHLIGHT_MS,
    );
    let submit_delay_ms = millis(
        "RSVP_SUBMIT_DELAY_MS",
        file.rsvp.submit_delay_ms,
        DEFAULT_SUBMIT_DELAY_MS,
    );

    Ok(InviteConfig {
        target,
        tick_interval: Duration::from_millis(tick_ms),
        countdown: CountdownSettings {
            highlight_duration: Duration::from_millis(highlight_ms),
            completion_message: file
                .event
                .completion_message
                .unwrap_or_else(|| DEFAULT_COMPLETION_MESSAGE.to_string()),
        },
        submit_delay: Duration::from_millis(submit_delay_ms),
    })
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses an RFC 3339 timestamp, or a wall-clock date-time in the local zone.
pub fn parse_target(raw: &str) -> Result<CountdownTarget, ConfigError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(CountdownTarget::from_epoch_millis(instant.timestamp_millis()));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ConfigError::InvalidTarget(raw.to_string()))?;
    // Ambiguous local times (DST fold) resolve to the earlier instant.
    let local = naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| ConfigError::InvalidTarget(raw.to_string()))?;

    Ok(CountdownTarget::from_epoch_millis(local.timestamp_millis()))
}
