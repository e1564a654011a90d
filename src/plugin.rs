//! Plugin lifecycle: the [`ChartPlugin`] trait and the [`PluginRegistry`] that drives it.
//!
//! A chart host calls the registry at fixed points of its lifecycle:
//!
//! | Host moment            | Registry call                        | Plugin hook        |
//! | ---------------------- | ------------------------------------ | ------------------ |
//! | chart created          | [`PluginRegistry::init`]             | `on_attach`        |
//! | pointer input          | [`PluginRegistry::dispatch`]         | `on_pointer`       |
//! | before datasets draw   | [`PluginRegistry::draw`]             | `on_before_draw`   |
//! | chart torn down        | [`PluginRegistry::destroy`]          | `on_detach`        |
//!
//! Pointer events only reach a plugin through a listener it registered on the
//! chart's canvas, so a plugin that was never attached (or was detached)
//! receives nothing.

use downcast_rs::{impl_downcast, Downcast};

use crate::config::PluginOptions;
use crate::data::trail::TrailPoint;
use crate::data::trail_look::TrailLook;
use crate::draw::DrawContext;
use crate::events::PointerEvent;
use crate::host::{ChartHost, ChartId};

pub trait ChartPlugin: Downcast {
    /// Stable id, also the key of the plugin's options.
    fn id(&self) -> &'static str;

    /// Install per-chart state and pointer listeners.
    fn on_attach(&mut self, chart: &mut dyn ChartHost);

    /// Handle a pointer event delivered through one of this plugin's listeners.
    fn on_pointer(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent);

    /// Paint the overlay. Runs before the datasets are drawn.
    fn on_before_draw(&self, chart: &dyn ChartHost, ctx: &mut dyn DrawContext, look: &TrailLook);

    /// Remove listeners and per-chart state.
    fn on_detach(&mut self, chart: &mut dyn ChartHost);

    /// Empty the chart's trail and request a redraw. Does not end a running gesture.
    fn clear_trail(&mut self, chart: &mut dyn ChartHost);

    /// Replace the chart's trail (e.g. from a snapshot) and request a redraw.
    fn restore_trail(&mut self, chart: &mut dyn ChartHost, points: Vec<TrailPoint>);

    /// Trail captured on `chart`; empty if the plugin is not attached to it.
    fn trail(&self, chart: ChartId) -> &[TrailPoint];

    /// Whether a gesture is in progress on `chart`.
    fn is_active(&self, chart: ChartId) -> bool;

    fn is_attached(&self, chart: ChartId) -> bool;
}
impl_downcast!(ChartPlugin);

/// Ordered set of plugins shared by one or more charts.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn ChartPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, plugin: impl ChartPlugin) -> Self {
        self.register(Box::new(plugin));
        self
    }

    /// Add a plugin. A plugin with the same id replaces the old one.
    pub fn register(&mut self, plugin: Box<dyn ChartPlugin>) {
        if let Some(slot) = self.plugins.iter_mut().find(|p| p.id() == plugin.id()) {
            tracing::warn!(plugin = plugin.id(), "replacing already registered plugin");
            *slot = plugin;
        } else {
            tracing::debug!(plugin = plugin.id(), "registered plugin");
            self.plugins.push(plugin);
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.iter().map(|p| p.id())
    }

    pub fn by_id(&self, id: &str) -> Option<&dyn ChartPlugin> {
        self.plugins.iter().find(|p| p.id() == id).map(|p| p.as_ref())
    }

    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut dyn ChartPlugin> {
        for p in &mut self.plugins {
            if p.id() == id {
                return Some(p.as_mut());
            }
        }
        None
    }

    /// First plugin of concrete type `T`.
    pub fn plugin<T: ChartPlugin>(&self) -> Option<&T> {
        self.plugins.iter().find_map(|p| p.downcast_ref::<T>())
    }

    pub fn plugin_mut<T: ChartPlugin>(&mut self) -> Option<&mut T> {
        self.plugins.iter_mut().find_map(|p| p.downcast_mut::<T>())
    }

    /// Attach every plugin to `chart`.
    pub fn init(&mut self, chart: &mut dyn ChartHost) {
        for p in &mut self.plugins {
            p.on_attach(chart);
        }
    }

    /// Route a pointer event to the owners of the matching canvas listeners.
    pub fn dispatch(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        let owners = match chart.canvas() {
            Some(canvas) => canvas.owners_for(event.kind),
            None => return,
        };
        for owner in owners {
            match self.plugins.iter_mut().find(|p| p.id() == owner) {
                Some(p) => p.on_pointer(chart, event),
                None => {
                    tracing::warn!(owner, chart = %chart.id(), "listener without a registered plugin")
                }
            }
        }
    }

    /// Run every plugin's before-draw hook with its configured look.
    pub fn draw(&self, chart: &dyn ChartHost, ctx: &mut dyn DrawContext, options: &PluginOptions) {
        for p in &self.plugins {
            let look = options.look_for(p.id());
            p.on_before_draw(chart, ctx, &look);
        }
    }

    /// Detach every plugin from `chart`.
    pub fn destroy(&mut self, chart: &mut dyn ChartHost) {
        for p in &mut self.plugins {
            p.on_detach(chart);
        }
    }

    /// Clear the trail of plugin `id` on `chart`. Returns `false` for an unknown id.
    pub fn clear_trail(&mut self, id: &str, chart: &mut dyn ChartHost) -> bool {
        match self.by_id_mut(id) {
            Some(p) => {
                p.clear_trail(chart);
                true
            }
            None => false,
        }
    }

    /// Clear the trails of all plugins on `chart`.
    pub fn clear_all(&mut self, chart: &mut dyn ChartHost) {
        for p in &mut self.plugins {
            p.clear_trail(chart);
        }
    }
}
