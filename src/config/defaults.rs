//! Default values and named presets.

use super::types::{AppConfig, DiffConfig};

/// Default recursion bound for the diff engine.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default parallel fan-out threshold (disabled).
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 0;

/// Recursion bound used by the strict preset for untrusted input.
pub const STRICT_MAX_DEPTH: usize = 128;

/// Largest accepted recursion bound. Decoding and comparison both recurse
/// once per level on the calling thread's stack.
pub const MAX_SUPPORTED_DEPTH: usize = 2048;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Plain defaults: every difference counts, every node is reported
    Default,
    /// Numbers compare by value regardless of int/float representation
    Lenient,
    /// Only differing nodes appear in the output
    ChangesOnly,
    /// Defaults with a tighter nesting bound
    Strict,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Lenient => "lenient",
            Self::ChangesOnly => "changes-only",
            Self::Strict => "strict",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "lenient" | "loose" => Some(Self::Lenient),
            "changes-only" | "changes" | "diff-only" => Some(Self::ChangesOnly),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Report every node; numeric subtypes are distinct",
            Self::Lenient => "Treat 100, 100.0 and 1e2 as equal numbers",
            Self::ChangesOnly => "Omit equal nodes so only differences remain",
            Self::Strict => "Default comparison with a low nesting limit for untrusted input",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Lenient, Self::ChangesOnly, Self::Strict]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl DiffConfig {
    /// Comparison settings for a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Lenient => Self {
                global_ignore_number_type: true,
                ..Self::default()
            },
            ConfigPreset::ChangesOnly => Self {
                omit_equal: true,
                ..Self::default()
            },
            ConfigPreset::Strict => Self {
                max_depth: STRICT_MAX_DEPTH,
                ..Self::default()
            },
        }
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        Self {
            diff: DiffConfig::from_preset(preset),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_roundtrip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
            assert!(!preset.description().is_empty());
        }
        assert_eq!(ConfigPreset::from_name("LOOSE"), Some(ConfigPreset::Lenient));
        assert_eq!(ConfigPreset::from_name("nope"), None);
    }

    #[test]
    fn test_preset_settings() {
        assert_eq!(DiffConfig::from_preset(ConfigPreset::Default), DiffConfig::default());
        assert!(DiffConfig::from_preset(ConfigPreset::Lenient).global_ignore_number_type);
        assert!(DiffConfig::from_preset(ConfigPreset::ChangesOnly).omit_equal);
        assert_eq!(
            DiffConfig::from_preset(ConfigPreset::Strict).max_depth,
            STRICT_MAX_DEPTH
        );
        assert!(AppConfig::from_preset(ConfigPreset::ChangesOnly).diff.omit_equal);
    }
}
