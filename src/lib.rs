//! plottrail crate root: re-exports and module wiring.
//!
//! Interactive trail overlays for 2-D charts, rendered with egui/egui_plot:
//! - [`PointDragTrail`]: drag an existing data point; every position it passes
//!   through stays visible as a trail of circles
//! - [`FreehandTrail`]: press and move the pointer to draw a connected trail
//!
//! Module overview:
//! - `host`: the [`ChartHost`] capabilities a plugin relies on
//! - `chart`, `scale`, `canvas`: an in-memory chart implementing them
//! - `plugin`, `plugins`: the plugin lifecycle and the two trail plugins
//! - `draw`: the drawing context plugins paint through
//! - `config`, `events`, `persistence`: options, notifications and snapshots
//! - `view`, `app`: the egui frontend and the demo application

pub mod app;
pub mod canvas;
pub mod chart;
pub mod config;
pub mod data;
pub mod draw;
pub mod events;
pub mod host;
pub mod persistence;
pub mod plugin;
pub mod plugins;
pub mod scale;
pub mod view;

// Public re-exports for a compact external API
pub use chart::Chart;
pub use config::{ConfigError, PluginOptions, TrailConfig, TrailOptions};
pub use data::trail::TrailPoint;
pub use data::trail_look::TrailLook;
pub use draw::{DrawContext, ShapeRecorder};
pub use events::{EventController, EventFilter, PointerEvent, PointerKind, TrailEvent, TrailEventKind};
pub use host::{ChartHost, ChartId, DataPoint, PointRef, Scale, UpdateMode};
pub use persistence::{PersistenceError, TrailSnapshot};
pub use plugin::{ChartPlugin, PluginRegistry};
pub use plugins::{FreehandTrail, PointDragTrail};
pub use view::ChartView;
