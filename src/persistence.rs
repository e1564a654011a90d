//! Trail persistence: save and load captured trails as JSON files.
//!
//! A [`TrailSnapshot`] holds one plugin's trail on one chart together with
//! the look it was drawn with. Colors go through [`TrailLookSerde`] since
//! egui's `Color32` does not derive serde traits.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::trail::TrailPoint;
use crate::data::trail_look::TrailLook;
use crate::host::ChartHost;
use crate::plugin::PluginRegistry;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid trail snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no plugin {0:?} registered")]
    UnknownPlugin(String),
}

// ---------- Serializable mirror types ----------

/// Serializable version of TrailLook.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailLookSerde {
    pub fill_rgba: [u8; 4],
    pub border_rgba: [u8; 4],
    pub border_width: f32,
    pub radius: f32,
}

fn rgba(c: Color32) -> [u8; 4] {
    c.to_srgba_unmultiplied()
}

fn color([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl From<&TrailLook> for TrailLookSerde {
    fn from(l: &TrailLook) -> Self {
        Self {
            fill_rgba: rgba(l.fill),
            border_rgba: rgba(l.border),
            border_width: l.border_width,
            radius: l.radius,
        }
    }
}

impl From<TrailLookSerde> for TrailLook {
    fn from(s: TrailLookSerde) -> Self {
        Self {
            fill: color(s.fill_rgba),
            border: color(s.border_rgba),
            border_width: s.border_width,
            radius: s.radius,
        }
    }
}

/// One plugin's trail, as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailSnapshot {
    /// Id of the plugin that captured the trail.
    pub plugin: String,
    pub points: Vec<TrailPoint>,
    pub look: TrailLookSerde,
    pub saved_at: DateTime<Utc>,
}

impl TrailSnapshot {
    /// Snapshot the trail plugin `plugin_id` holds for `chart`.
    pub fn capture(
        registry: &PluginRegistry,
        plugin_id: &str,
        chart: &dyn ChartHost,
        look: &TrailLook,
    ) -> Result<Self, PersistenceError> {
        let plugin = registry
            .by_id(plugin_id)
            .ok_or_else(|| PersistenceError::UnknownPlugin(plugin_id.to_owned()))?;
        Ok(Self {
            plugin: plugin_id.to_owned(),
            points: plugin.trail(chart.id()).to_vec(),
            look: TrailLookSerde::from(look),
            saved_at: Utc::now(),
        })
    }

    /// Hand the stored points back to the owning plugin on `chart`.
    /// Returns the stored look so the caller can reapply it.
    pub fn restore_into(
        self,
        registry: &mut PluginRegistry,
        chart: &mut dyn ChartHost,
    ) -> Result<TrailLook, PersistenceError> {
        let plugin = registry
            .by_id_mut(&self.plugin)
            .ok_or_else(|| PersistenceError::UnknownPlugin(self.plugin.clone()))?;
        tracing::debug!(
            plugin = %self.plugin,
            chart = %chart.id(),
            points = self.points.len(),
            saved_at = %self.saved_at,
            "restoring trail"
        );
        plugin.restore_trail(chart, self.points);
        Ok(self.look.into())
    }
}

// ---------- Public API ----------

/// Serialize a snapshot as pretty JSON.
pub fn snapshot_to_json(snapshot: &TrailSnapshot) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn snapshot_from_json(json: &str) -> Result<TrailSnapshot, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

/// Save a snapshot to a JSON file at the given path.
pub fn save_snapshot(snapshot: &TrailSnapshot, path: &Path) -> Result<(), PersistenceError> {
    let txt = snapshot_to_json(snapshot)?;
    std::fs::write(path, txt).map_err(|source| PersistenceError::Io {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!(path = %path.display(), points = snapshot.points.len(), "trail saved");
    Ok(())
}

/// Load a snapshot from a JSON file at the given path.
pub fn load_snapshot(path: &Path) -> Result<TrailSnapshot, PersistenceError> {
    let txt = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_owned(),
        source,
    })?;
    snapshot_from_json(&txt)
}
