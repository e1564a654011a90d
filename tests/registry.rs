use egui::{pos2, vec2};
use plottrail::plugins::{FreehandTrail, PointDragTrail, DRAG_TRAIL_ID, FREEHAND_TRAIL_ID};
use plottrail::{
    Chart, ChartHost, ChartPlugin, DataPoint, PluginOptions, PluginRegistry, PointerEvent,
    PointerKind, ShapeRecorder,
};

fn chart() -> Chart {
    let mut chart = Chart::new((0.0, 100.0), (0.0, 100.0), vec2(100.0, 100.0));
    chart.push_dataset("points", vec![DataPoint::new(50.0, 50.0)]);
    chart
}

#[test]
fn both_plugins_receive_events_on_one_chart() {
    let mut chart = chart();
    let mut registry = PluginRegistry::new()
        .with(PointDragTrail::new())
        .with(FreehandTrail::new());
    registry.init(&mut chart);
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![DRAG_TRAIL_ID, FREEHAND_TRAIL_ID]);
    assert_eq!(chart.canvas().unwrap().owners_for(PointerKind::Down).len(), 2);

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(50.0, 50.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(40.0, 50.0)));

    let id = chart.id();
    assert_eq!(registry.by_id(DRAG_TRAIL_ID).unwrap().trail(id).len(), 1);
    assert_eq!(registry.by_id(FREEHAND_TRAIL_ID).unwrap().trail(id).len(), 2);

    let mut recorder = ShapeRecorder::new(pos2(0.0, 0.0));
    registry.draw(&chart, &mut recorder, &PluginOptions::default());
    assert_eq!(recorder.filled_circle_count(), 3);
    assert_eq!(recorder.polylines().len(), 1);
}

#[test]
fn one_registry_serves_several_charts() {
    let mut a = chart();
    let mut b = chart();
    let mut registry = PluginRegistry::new().with(FreehandTrail::new());
    registry.init(&mut a);
    registry.init(&mut b);

    registry.dispatch(&mut a, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut a, &PointerEvent::moved(pos2(20.0, 10.0)));

    let plugin = registry.plugin::<FreehandTrail>().unwrap();
    assert_eq!(plugin.trail(a.id()).len(), 2);
    assert!(plugin.trail(b.id()).is_empty());
    assert!(!plugin.is_active(b.id()));
}

#[test]
fn listener_without_plugin_is_skipped() {
    let mut chart = chart();
    chart
        .canvas_mut()
        .unwrap()
        .add_event_listener(PointerKind::Down, "missing");
    let mut registry = PluginRegistry::new().with(FreehandTrail::new());
    registry.init(&mut chart);

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    assert_eq!(
        registry.by_id(FREEHAND_TRAIL_ID).unwrap().trail(chart.id()).len(),
        1
    );
}

#[test]
fn registering_the_same_id_replaces_the_plugin() {
    let mut registry = PluginRegistry::new()
        .with(PointDragTrail::new())
        .with(PointDragTrail::new().with_hit_radius(4.0));
    assert_eq!(registry.ids().count(), 1);
    assert_eq!(registry.plugin::<PointDragTrail>().unwrap().hit_radius(), 4.0);
    assert!(registry.plugin_mut::<FreehandTrail>().is_none());
}

#[test]
fn clearing_an_unknown_plugin_reports_false() {
    let mut chart = chart();
    let mut registry = PluginRegistry::new().with(FreehandTrail::new());
    registry.init(&mut chart);
    assert!(!registry.clear_trail("Trail", &mut chart));
    assert_eq!(chart.redraw_count(), 0);
}

#[test]
fn clear_all_empties_every_trail() {
    let mut chart = chart();
    let mut registry = PluginRegistry::new()
        .with(PointDragTrail::new())
        .with(FreehandTrail::new());
    registry.init(&mut chart);
    registry.dispatch(&mut chart, &PointerEvent::down(pos2(50.0, 50.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(40.0, 50.0)));

    registry.clear_all(&mut chart);
    for id in [DRAG_TRAIL_ID, FREEHAND_TRAIL_ID] {
        assert!(registry.by_id(id).unwrap().trail(chart.id()).is_empty());
    }
}

#[test]
fn attaching_twice_keeps_a_single_listener_set() {
    let mut chart = chart();
    let mut plugin = FreehandTrail::new();
    plugin.on_attach(&mut chart);
    plugin.on_attach(&mut chart);
    assert_eq!(chart.canvas().unwrap().listeners().len(), 3);
    plugin.on_detach(&mut chart);
    assert!(chart.canvas().unwrap().listeners().is_empty());
}
