// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Supports both programmatic and file-based (YAML) configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Project name written into every unit header.
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Largest arity of the generated group family.
    #[serde(default = "default_max_group_arity")]
    pub max_group_arity: usize,

    /// Crate name generated code uses to reach the runtime.
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Folder that unit target paths are rooted at.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Module name of the shared group family.
    #[serde(default = "default_group_module")]
    pub group_module: String,

    /// Emit a `mod.rs` index declaring every generated module.
    #[serde(default = "default_true")]
    pub emit_index: bool,

    /// Derives applied to declarations that do not override them.
    #[serde(default = "default_derives")]
    pub default_derives: Vec<String>,
}

fn default_project_name() -> String {
    "codexgen".to_string()
}

fn default_max_group_arity() -> usize {
    5
}

fn default_runtime_crate() -> String {
    "codexgen_runtime".to_string()
}

fn default_output_folder() -> String {
    "generated".to_string()
}

fn default_group_module() -> String {
    "keyed_container".to_string()
}

fn default_true() -> bool {
    true
}

fn default_derives() -> Vec<String> {
    ["Debug", "Clone", "PartialEq"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            max_group_arity: default_max_group_arity(),
            runtime_crate: default_runtime_crate(),
            output_folder: default_output_folder(),
            group_module: default_group_module(),
            emit_index: true,
            default_derives: default_derives(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML (used by `gen-config`).
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    #[must_use]
    pub fn with_max_group_arity(mut self, arity: usize) -> Self {
        self.max_group_arity = arity;
        self
    }

    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    #[must_use]
    pub fn with_output_folder(mut self, folder: impl Into<String>) -> Self {
        self.output_folder = folder.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_group_arity == 0 {
            return Err(ConfigError::Invalid(
                "max_group_arity must be at least 1".into(),
            ));
        }

        for (field, value) in [
            ("runtime_crate", &self.runtime_crate),
            ("group_module", &self.group_module),
        ] {
            if !is_plain_identifier(value) {
                return Err(ConfigError::Invalid(format!(
                    "{} `{}` is not a valid Rust identifier",
                    field, value
                )));
            }
        }

        for derive in &self.default_derives {
            if derive.trim().is_empty() {
                return Err(ConfigError::Invalid("empty derive name".into()));
            }
        }

        Ok(())
    }
}

fn is_plain_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    value != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
