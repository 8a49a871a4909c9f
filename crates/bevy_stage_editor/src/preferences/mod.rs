//! Editor preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use bevy_stage_core::StageConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Map most recently saved or loaded
    pub last_map_path: Option<PathBuf>,
    /// Reopen `last_map_path` on startup
    pub auto_open_last_map: bool,
    /// Grid, physics and palette settings
    pub stage: StageConfig,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            last_map_path: None,
            auto_open_last_map: true,
            stage: StageConfig::default(),
        }
    }
}

impl EditorPreferences {
    pub fn last_map(&self) -> Option<&Path> {
        self.last_map_path.as_deref()
    }

    /// Record `path` as the last map; returns whether anything changed
    pub fn remember_map(&mut self, path: &Path) -> bool {
        if self.last_map() == Some(path) {
            return false;
        }
        self.last_map_path = Some(path.to_path_buf());
        true
    }
}
