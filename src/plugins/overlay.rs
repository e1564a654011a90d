use crate::data::trail::TrailPoint;
use crate::data::trail_look::TrailLook;
use crate::draw::DrawContext;
use crate::host::ChartHost;

/// One filled, stroked circle per point.
pub(super) fn paint_markers(
    chart: &dyn ChartHost,
    ctx: &mut dyn DrawContext,
    points: &[TrailPoint],
    look: &TrailLook,
) {
    for pt in points {
        let center = chart.pixel_for(*pt);
        ctx.begin_path();
        ctx.arc(center, look.radius);
        ctx.set_fill_color(look.fill);
        ctx.fill();
        ctx.set_line_width(look.border_width);
        ctx.set_stroke_color(look.border);
        ctx.stroke();
    }
}

/// Polyline through the points in capture order. Needs at least two points.
pub(super) fn paint_polyline(
    chart: &dyn ChartHost,
    ctx: &mut dyn DrawContext,
    points: &[TrailPoint],
    look: &TrailLook,
) {
    if points.len() < 2 {
        return;
    }
    ctx.begin_path();
    for (i, pt) in points.iter().enumerate() {
        let pos = chart.pixel_for(*pt);
        if i == 0 {
            ctx.move_to(pos);
        } else {
            ctx.line_to(pos);
        }
    }
    ctx.set_stroke_color(look.border);
    ctx.set_line_width(look.border_width);
    ctx.stroke();
}
