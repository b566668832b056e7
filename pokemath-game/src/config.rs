//! Runtime feature flags.
//!
//! Flags are resolved once at process start and handed to whichever layer
//! decides the stage layout. Nothing here is cached globally.
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{DEBUG_ENV_VAR, STAGE_LAYOUT_ENV_VAR};
use crate::stage_migration::{get_legacy_stage_count, get_new_stage_count, map_old_stage_to_new};

/// Which stage layout the game currently serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageLayoutPhase {
    /// Original stage counts, no remapping.
    Legacy,
    /// Three-stage layout for the affected regions.
    #[default]
    Reduced,
}

impl FromStr for StageLayoutPhase {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "off" | "0" | "false" => Ok(Self::Legacy),
            "reduced" | "on" | "1" | "true" => Ok(Self::Reduced),
            other => Err(FlagsError::UnknownPhase(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum FlagsError {
    #[error("unknown stage layout phase `{0}` (expected legacy or reduced)")]
    UnknownPhase(String),
    #[error("invalid feature flag document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub stage_layout: StageLayoutPhase,
    #[serde(default)]
    pub debug_logs: bool,
}

impl FeatureFlags {
    /// Resolve flags from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve flags through an arbitrary key lookup.
    ///
    /// Unparsable values are logged and replaced by their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stage_layout = match lookup(STAGE_LAYOUT_ENV_VAR) {
            Some(raw) => raw.parse::<StageLayoutPhase>().unwrap_or_else(|err| {
                log::warn!("{STAGE_LAYOUT_ENV_VAR}: {err}; using default layout");
                StageLayoutPhase::default()
            }),
            None => StageLayoutPhase::default(),
        };
        let debug_logs = matches!(lookup(DEBUG_ENV_VAR), Some(val) if val != "0");
        let flags = Self {
            stage_layout,
            debug_logs,
        };
        log::debug!("resolved feature flags: {flags:?}");
        flags
    }

    /// Parse flags from a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this shape.
    pub fn from_json(json: &str) -> Result<Self, FlagsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Stage layout view selected by the feature flags.
#[derive(Debug, Clone, Copy)]
pub struct StageLayout<'a> {
    flags: &'a FeatureFlags,
}

impl<'a> StageLayout<'a> {
    #[must_use]
    pub const fn new(flags: &'a FeatureFlags) -> Self {
        Self { flags }
    }

    #[must_use]
    pub const fn phase(&self) -> StageLayoutPhase {
        self.flags.stage_layout
    }

    /// Number of stages the region currently has.
    #[must_use]
    pub fn stage_count(&self, region_id: u32) -> u32 {
        match self.phase() {
            StageLayoutPhase::Legacy => get_legacy_stage_count(region_id),
            StageLayoutPhase::Reduced => get_new_stage_count(region_id),
        }
    }

    /// Stage to serve for a stored legacy stage number.
    #[must_use]
    pub fn resolve_stage(&self, region_id: u32, stored_stage: u32) -> u32 {
        match self.phase() {
            StageLayoutPhase::Legacy => stored_stage,
            StageLayoutPhase::Reduced => map_old_stage_to_new(region_id, stored_stage),
        }
    }
}
