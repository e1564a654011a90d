//! Demo application for the trail plugins.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`pane`]        | One chart with its plugin registry, look and per-pane controls |
//! | [`trail_app`]   | [`TrailDemoApp`] (eframe) holding both panes and the event log |
//! | [`run`]         | [`run_demo()`] entry point |

mod pane;
mod run;
mod trail_app;

pub use pane::{sample_series, TrailPane};
pub use run::run_demo;
pub use trail_app::TrailDemoApp;
