// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Destinations for generated units.

use crate::compose::{GeneratedUnit, Generation};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Persists generated units.
pub trait UnitSink {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()>;
}

/// Writes each unit under a root directory, creating parents as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl UnitSink for DirectorySink {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()> {
        let path = self.root.join(&unit.target_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &unit.source)?;
        tracing::debug!(path = %path.display(), "unit written");
        Ok(())
    }
}

/// Keeps units in memory, keyed by target path.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnitSink for MemorySink {
    fn write_unit(&mut self, unit: &GeneratedUnit) -> io::Result<()> {
        self.files
            .insert(unit.target_path.clone(), unit.source.clone());
        Ok(())
    }
}

impl Generation {
    /// Hand every unit to `sink`, in generation order. Returns the unit count.
    pub fn write_to(&self, sink: &mut dyn UnitSink) -> io::Result<usize> {
        for unit in &self.units {
            sink.write_unit(unit)?;
        }
        Ok(self.units.len())
    }
}
