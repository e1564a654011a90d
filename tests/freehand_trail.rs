use approx::assert_abs_diff_eq;
use egui::{pos2, vec2, Color32};
use plottrail::events::TrailEventKind;
use plottrail::plugins::{FreehandTrail, FREEHAND_TRAIL_ID};
use plottrail::{
    Chart, ChartHost, ChartPlugin, EventController, EventFilter, PluginOptions, PluginRegistry,
    PointerEvent, ShapeRecorder, TrailOptions, UpdateMode,
};

fn setup() -> (Chart, PluginRegistry) {
    let mut chart = Chart::new((0.0, 100.0), (0.0, 100.0), vec2(100.0, 100.0));
    let mut registry = PluginRegistry::new().with(FreehandTrail::new());
    registry.init(&mut chart);
    (chart, registry)
}

fn freehand(registry: &PluginRegistry) -> &FreehandTrail {
    registry.plugin::<FreehandTrail>().unwrap()
}

fn render(chart: &Chart, registry: &PluginRegistry) -> ShapeRecorder {
    let mut recorder = ShapeRecorder::new(pos2(0.0, 0.0));
    registry.draw(chart, &mut recorder, &PluginOptions::default());
    recorder
}

fn first_circle_center(recorder: &ShapeRecorder) -> egui::Pos2 {
    recorder
        .shapes()
        .iter()
        .find_map(|s| match s {
            egui::Shape::Circle(c) => Some(c.center),
            _ => None,
        })
        .unwrap()
}

#[test]
fn gesture_draws_circles_and_a_connecting_line() {
    let (mut chart, mut registry) = setup();

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(20.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(30.0, 10.0)));

    let trail = freehand(&registry).trail(chart.id());
    assert_eq!(trail.len(), 3);
    assert_abs_diff_eq!(trail[0].x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trail[0].y, 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trail[2].x, 30.0, epsilon = 1e-9);
    assert_eq!(chart.last_update(), Some(UpdateMode::None));

    let recorder = render(&chart, &registry);
    assert_eq!(recorder.filled_circle_count(), 3);
    let lines = recorder.polylines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], &[pos2(10.0, 10.0), pos2(20.0, 10.0), pos2(30.0, 10.0)]);
    assert_eq!(recorder.save_depth(), 0);
}

#[test]
fn single_click_leaves_one_point_without_a_line() {
    let (mut chart, mut registry) = setup();

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(40.0, 40.0)));
    registry.dispatch(&mut chart, &PointerEvent::up(pos2(40.0, 40.0)));

    assert!(!freehand(&registry).is_active(chart.id()));
    assert_eq!(freehand(&registry).trail(chart.id()).len(), 1);

    let recorder = render(&chart, &registry);
    assert_eq!(recorder.filled_circle_count(), 1);
    assert!(recorder.polylines().is_empty());
}

#[test]
fn empty_trail_draws_nothing() {
    let (chart, registry) = setup();
    let recorder = render(&chart, &registry);
    assert!(recorder.shapes().is_empty());
}

#[test]
fn moves_after_release_are_ignored() {
    let (mut chart, mut registry) = setup();

    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(5.0, 5.0)));
    assert!(freehand(&registry).trail(chart.id()).is_empty());

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::up(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(50.0, 50.0)));
    assert_eq!(freehand(&registry).trail(chart.id()).len(), 1);
}

#[test]
fn new_gesture_replaces_the_previous_trail() {
    let (mut chart, mut registry) = setup();

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(20.0, 20.0)));
    registry.dispatch(&mut chart, &PointerEvent::up(pos2(20.0, 20.0)));
    registry.dispatch(&mut chart, &PointerEvent::down(pos2(70.0, 70.0)));

    let trail = freehand(&registry).trail(chart.id());
    assert_eq!(trail.len(), 1);
    assert_abs_diff_eq!(trail[0].x, 70.0, epsilon = 1e-9);
}

#[test]
fn clear_during_gesture_keeps_drawing() {
    let (mut chart, mut registry) = setup();
    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(20.0, 10.0)));

    assert!(registry.clear_trail(FREEHAND_TRAIL_ID, &mut chart));
    assert!(freehand(&registry).trail(chart.id()).is_empty());
    assert!(freehand(&registry).is_active(chart.id()));
    assert_eq!(chart.last_update(), Some(UpdateMode::Default));

    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(30.0, 10.0)));
    let trail = freehand(&registry).trail(chart.id());
    assert_eq!(trail.len(), 1);
    assert_abs_diff_eq!(trail[0].x, 30.0, epsilon = 1e-9);
}

#[test]
fn positions_are_relative_to_the_canvas() {
    let (mut chart, mut registry) = setup();
    chart.resize(egui::Rect::from_min_size(pos2(200.0, 100.0), vec2(100.0, 100.0)));

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(225.0, 175.0)));
    let trail = freehand(&registry).trail(chart.id());
    assert_abs_diff_eq!(trail[0].x, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trail[0].y, 25.0, epsilon = 1e-9);

    // Rendering happens in screen space again.
    let mut recorder = ShapeRecorder::new(pos2(200.0, 100.0));
    registry.draw(&chart, &mut recorder, &PluginOptions::default());
    assert!(recorder.shapes().iter().any(|s| matches!(
        s,
        egui::Shape::Circle(c) if c.center == pos2(225.0, 175.0)
    )));
}

#[test]
fn trail_follows_the_canvas_when_it_is_resized() {
    let (mut chart, mut registry) = setup();
    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::up(pos2(10.0, 10.0)));

    let origin = pos2(50.0, 30.0);
    chart.resize(egui::Rect::from_min_size(origin, vec2(200.0, 200.0)));

    // The stored value is untouched; only its pixel position scales.
    let trail = freehand(&registry).trail(chart.id());
    assert_abs_diff_eq!(trail[0].x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(trail[0].y, 90.0, epsilon = 1e-9);

    let mut recorder = ShapeRecorder::new(origin);
    registry.draw(&chart, &mut recorder, &PluginOptions::default());
    let center = first_circle_center(&recorder);
    assert_abs_diff_eq!(center.x, 70.0, epsilon = 1e-3);
    assert_abs_diff_eq!(center.y, 50.0, epsilon = 1e-3);
}

#[test]
fn trail_follows_a_rescaled_axis() {
    let (mut chart, mut registry) = setup();
    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));

    chart.x_axis_mut().set_value_range(0.0, 50.0);
    chart.y_axis_mut().set_value_range(50.0, 100.0);

    let center = first_circle_center(&render(&chart, &registry));
    assert_abs_diff_eq!(center.x, 20.0, epsilon = 1e-3);
    assert_abs_diff_eq!(center.y, 20.0, epsilon = 1e-3);
}

#[test]
fn configured_look_is_used_for_the_overlay() {
    let (mut chart, mut registry) = setup();
    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));

    let mut options = PluginOptions::default();
    options.set(
        FREEHAND_TRAIL_ID,
        TrailOptions {
            trail_fill_color: Some("#ff0000".into()),
            trail_radius: Some(6.0),
            ..TrailOptions::default()
        },
    );
    let mut recorder = ShapeRecorder::new(pos2(0.0, 0.0));
    registry.draw(&chart, &mut recorder, &options);

    let filled = recorder
        .shapes()
        .iter()
        .find_map(|s| match s {
            egui::Shape::Circle(c) if c.fill != Color32::TRANSPARENT => Some(*c),
            _ => None,
        })
        .unwrap();
    assert_eq!(filled.fill, Color32::from_rgb(255, 0, 0));
    assert_eq!(filled.radius, 6.0);
}

#[test]
fn gesture_events_carry_trail_length() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(
        TrailEventKind::GESTURE_STARTED | TrailEventKind::GESTURE_ENDED,
    ));
    let mut chart = Chart::new((0.0, 100.0), (0.0, 100.0), vec2(100.0, 100.0));
    let mut registry = PluginRegistry::new().with(FreehandTrail::new().with_events(events));
    registry.init(&mut chart);

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::moved(pos2(20.0, 10.0)));
    registry.dispatch(&mut chart, &PointerEvent::up(pos2(20.0, 10.0)));

    let got: Vec<_> = rx.try_iter().collect();
    assert_eq!(got.len(), 2);
    assert!(got[0]
        .kinds
        .contains(TrailEventKind::GESTURE_STARTED | TrailEventKind::POINT_CAPTURED));
    assert_eq!(got[0].trail_len, 1);
    assert_eq!(got[1].kinds, TrailEventKind::GESTURE_ENDED);
    assert_eq!(got[1].trail_len, 2);
    assert!(got.iter().all(|e| e.plugin == FREEHAND_TRAIL_ID && e.chart == chart.id()));
}

#[test]
fn detached_plugin_ignores_input() {
    let (mut chart, mut registry) = setup();
    let id = chart.id();
    registry.destroy(&mut chart);
    assert!(!freehand(&registry).is_attached(id));

    registry.dispatch(&mut chart, &PointerEvent::down(pos2(10.0, 10.0)));
    assert!(freehand(&registry).trail(id).is_empty());
    assert_eq!(chart.redraw_count(), 0);
}
