// In: src/config.rs

//! The single source of truth for smoothpack packing configuration.
//!
//! `PackConfig` is created once at the application boundary (e.g. from a JSON
//! document) and passed by reference to the bridge. Window parameters live next to
//! their kernels (`kernels::window::{TransitionParams, BumpParams}`).

use serde::{Deserialize, Serialize};

use crate::error::SmoothpackError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Defines the trade-off between compression speed and final frame size.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompressionProfile {
    /// Prioritizes speed over size.
    Fast,

    /// A balance between speed and size. This is the recommended default.
    #[default]
    Balanced,

    /// Prioritizes the smallest possible frame at the cost of CPU time.
    HighCompression,
}

impl CompressionProfile {
    /// The Zstd level this profile maps to.
    pub fn zstd_level(&self) -> i32 {
        match self {
            Self::Fast => 1,
            Self::Balanced => 3,
            Self::HighCompression => 19,
        }
    }
}

//==================================================================================
// II. The Unified PackConfig
//==================================================================================

/// Configuration for packing a time series into a frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PackConfig {
    /// The profile guiding the compression/speed trade-off.
    #[serde(default)]
    pub profile: CompressionProfile,

    /// Apply the XOR delta pretreatment along the time axis before compressing.
    #[serde(default = "default_true")]
    pub xor_delta: bool,

    /// Store a Fletcher-32 checksum of the pretreated bytes and verify it on unpack.
    #[serde(default = "default_true")]
    pub checksum: bool,

    /// Explicit Zstd level; overrides the profile when set.
    #[serde(default)]
    pub zstd_level: Option<i32>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            profile: CompressionProfile::default(),
            xor_delta: true,
            checksum: true,
            zstd_level: None,
        }
    }
}

impl PackConfig {
    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SmoothpackError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The Zstd level actually used.
    pub fn effective_zstd_level(&self) -> i32 {
        self.zstd_level.unwrap_or_else(|| self.profile.zstd_level())
    }

    /// Rejects levels outside the range the `zstd` crate accepts.
    pub fn validate(&self) -> Result<(), SmoothpackError> {
        let level = self.effective_zstd_level();
        let range = zstd::compression_level_range();
        if !range.contains(&level) {
            return Err(SmoothpackError::InvalidArgument(format!(
                "zstd level {} outside supported range {:?}",
                level, range
            )));
        }
        Ok(())
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}
