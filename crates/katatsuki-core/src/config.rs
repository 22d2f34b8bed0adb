//! Read configuration for the probe backend.

use serde::{Deserialize, Serialize};

pub const ENV_PARSING_MODE: &str = "KATATSUKI_PARSING_MODE";
pub const ENV_SKIP_PICTURES: &str = "KATATSUKI_SKIP_PICTURES";

/// How forgiving the parser is with malformed tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParsingMode {
    Strict,
    #[default]
    BestAttempt,
    Relaxed,
}

impl ParsingMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(ParsingMode::Strict),
            "best-attempt" | "best_attempt" | "bestattempt" => Some(ParsingMode::BestAttempt),
            "relaxed" => Some(ParsingMode::Relaxed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub parsing_mode: ParsingMode,
    /// When false, no pictures are collected and cover art is always absent.
    pub read_pictures: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            parsing_mode: ParsingMode::default(),
            read_pictures: true,
        }
    }
}

impl ReadOptions {
    /// Defaults overridden by `KATATSUKI_PARSING_MODE` and
    /// `KATATSUKI_SKIP_PICTURES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(value) = lookup(ENV_PARSING_MODE) {
            match ParsingMode::from_name(&value) {
                Some(mode) => options.parsing_mode = mode,
                None => log::warn!("katatsuki: ignoring unknown parsing mode {:?}", value),
            }
        }
        if let Some(value) = lookup(ENV_SKIP_PICTURES) {
            options.read_pictures = !matches!(value.trim(), "1" | "true" | "yes");
        }
        options
    }
}
