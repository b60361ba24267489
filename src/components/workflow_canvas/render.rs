use std::f64::consts::PI;

use log::warn;

use super::style::{
	ARROW_SIZE, CORNER_RADIUS, EDGE_MIN_CURVE, EDGE_WIDTH, ELLIPSIS, GLYPH_FONT_SIZE, LABEL_MARGIN,
	NAME_FONT_SIZE, PORT_RADIUS, TYPE_FONT_SIZE, TYPE_LABEL_MAX_CHARS, node_style, truncate_chars,
};
use super::surface::Surface;
use crate::config::CanvasConfig;
use crate::workflow::{Connection, Node, Point, Rect, Viewport, Workflow};

/// Grid lines closer than this many pixels are not drawn.
const MIN_GRID_PIXELS: f64 = 4.0;

/// What one frame drew and skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
	pub nodes_drawn: usize,
	pub nodes_culled: usize,
	pub connections_drawn: usize,
	pub connections_skipped: usize,
}

/// Paints one frame: background, grid, connections, then nodes.
///
/// Connections with an endpoint missing from `workflow.nodes` and nodes
/// without a position are skipped; nothing here fails.
pub fn render<S: Surface + ?Sized>(
	ctx: &S,
	workflow: &Workflow,
	viewport: &Viewport,
	config: &CanvasConfig,
) -> RenderStats {
	let mut stats = RenderStats::default();
	let bounds = viewport.bounds();

	ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
	ctx.set_fill_style(&config.background);
	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);

	draw_grid(ctx, viewport, config);
	draw_edges(ctx, workflow, viewport, config, &mut stats);
	draw_nodes(ctx, workflow, viewport, config, &mut stats);

	if stats.connections_skipped > 0 {
		warn!(
			"skipped {} connection(s) with a missing endpoint",
			stats.connections_skipped
		);
	}
	stats
}

fn draw_grid<S: Surface + ?Sized>(ctx: &S, viewport: &Viewport, config: &CanvasConfig) {
	let zoom = viewport.zoom();
	let spacing = config.grid_spacing * zoom;
	if spacing.is_nan() || spacing < MIN_GRID_PIXELS {
		return;
	}
	let Rect { width, height, .. } = viewport.bounds();
	let offset_x = (viewport.pan.x * zoom).rem_euclid(spacing);
	let offset_y = (viewport.pan.y * zoom).rem_euclid(spacing);

	ctx.set_stroke_style(&config.grid_color);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let mut x = offset_x;
	while x <= width {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, height);
		x += spacing;
	}
	let mut y = offset_y;
	while y <= height {
		ctx.move_to(0.0, y);
		ctx.line_to(width, y);
		y += spacing;
	}
	ctx.stroke();
}

fn draw_edges<S: Surface + ?Sized>(
	ctx: &S,
	workflow: &Workflow,
	viewport: &Viewport,
	config: &CanvasConfig,
	stats: &mut RenderStats,
) {
	let zoom = viewport.zoom();
	ctx.set_stroke_style(&config.edge_color);
	ctx.set_fill_style(&config.edge_color);
	ctx.set_line_width(EDGE_WIDTH * zoom);

	for connection in &workflow.connections {
		let Some((start, end)) = edge_endpoints(connection, workflow, viewport) else {
			stats.connections_skipped += 1;
			continue;
		};

		let offset = ((end.x - start.x).abs() * 0.5).max(EDGE_MIN_CURVE * zoom);
		let c1 = Point::new(start.x + offset, start.y);
		let c2 = Point::new(end.x - offset, end.y);

		// Side channels are dashed.
		if connection.is_main() {
			ctx.set_line_dash(&[]);
		} else {
			ctx.set_line_dash(&[6.0 * zoom, 4.0 * zoom]);
		}
		ctx.begin_path();
		ctx.move_to(start.x, start.y);
		ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
		ctx.stroke();

		// End tangent of a cubic is along c2 -> end.
		draw_arrowhead(ctx, c2, end, ARROW_SIZE * zoom);
		stats.connections_drawn += 1;
	}
	ctx.set_line_dash(&[]);
}

/// Output port of the source and input port of the target, in screen space.
fn edge_endpoints(
	connection: &Connection,
	workflow: &Workflow,
	viewport: &Viewport,
) -> Option<(Point, Point)> {
	let source = workflow.node(&connection.source)?.position?;
	let target = workflow.node(&connection.target)?.position?;
	Some((
		viewport.node_rect(source).right_center(),
		viewport.node_rect(target).left_center(),
	))
}

fn draw_arrowhead<S: Surface + ?Sized>(ctx: &S, from: Point, tip: Point, size: f64) {
	let (dx, dy) = (tip.x - from.x, tip.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (back_x, back_y) = (tip.x - ux * size, tip.y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes<S: Surface + ?Sized>(
	ctx: &S,
	workflow: &Workflow,
	viewport: &Viewport,
	config: &CanvasConfig,
	stats: &mut RenderStats,
) {
	let bounds = viewport.bounds();
	for node in &workflow.nodes {
		let Some(position) = node.position else {
			continue;
		};
		let rect = viewport.node_rect(position);
		if !rect.intersects(&bounds) {
			stats.nodes_culled += 1;
			continue;
		}
		draw_node(ctx, node, rect, viewport.zoom(), config);
		stats.nodes_drawn += 1;
	}
}

fn draw_node<S: Surface + ?Sized>(
	ctx: &S,
	node: &Node,
	rect: Rect,
	zoom: f64,
	config: &CanvasConfig,
) {
	let style = node_style(&node.node_type);

	rounded_rect(ctx, rect, CORNER_RADIUS * zoom);
	ctx.set_fill_style(style.color);
	ctx.fill();

	let port_radius = PORT_RADIUS * zoom;
	ctx.set_fill_style(&config.port_fill);
	ctx.set_stroke_style(&config.port_outline);
	ctx.set_line_width(1.5 * zoom);
	for port in [rect.left_center(), rect.right_center()] {
		ctx.begin_path();
		ctx.arc(port.x, port.y, port_radius, 0.0, 2.0 * PI);
		ctx.fill();
		ctx.stroke();
	}

	if zoom <= config.label_zoom_threshold {
		return;
	}

	let center = rect.center();
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	ctx.set_font(&font(NAME_FONT_SIZE * zoom, &config.font_family, true));
	ctx.set_fill_style(&config.text_color);
	let max_width = rect.width - LABEL_MARGIN * zoom;
	let name = fit_to_width(ctx, &node.name, max_width);
	ctx.fill_text(&name, center.x, center.y - rect.height * 0.15);

	ctx.set_font(&font(TYPE_FONT_SIZE * zoom, &config.font_family, false));
	ctx.set_fill_style(&config.subtext_color);
	let suffix = truncate_chars(node.type_suffix(), TYPE_LABEL_MAX_CHARS);
	ctx.fill_text(&suffix, center.x, center.y + rect.height * 0.22);

	if zoom > config.glyph_zoom_threshold {
		ctx.set_font(&font(GLYPH_FONT_SIZE * zoom, &config.font_family, false));
		ctx.set_text_align("left");
		ctx.set_fill_style(&config.text_color);
		ctx.fill_text(style.glyph, rect.x + 2.0 * port_radius, center.y);
	}
}

fn font(size: f64, family: &str, bold: bool) -> String {
	if bold {
		format!("bold {size:.1}px {family}")
	} else {
		format!("{size:.1}px {family}")
	}
}

fn rounded_rect<S: Surface + ?Sized>(ctx: &S, r: Rect, radius: f64) {
	let radius = radius.min(r.width / 2.0).min(r.height / 2.0);
	let (right, bottom) = (r.x + r.width, r.y + r.height);
	ctx.begin_path();
	ctx.move_to(r.x + radius, r.y);
	ctx.line_to(right - radius, r.y);
	ctx.quadratic_curve_to(right, r.y, right, r.y + radius);
	ctx.line_to(right, bottom - radius);
	ctx.quadratic_curve_to(right, bottom, right - radius, bottom);
	ctx.line_to(r.x + radius, bottom);
	ctx.quadratic_curve_to(r.x, bottom, r.x, bottom - radius);
	ctx.line_to(r.x, r.y + radius);
	ctx.quadratic_curve_to(r.x, r.y, r.x + radius, r.y);
	ctx.close_path();
}

/// Longest prefix of `text` that, with a trailing `…`, fits in `max_width`.
///
/// Width grows with the kept char count, so the cut is found by bisection.
pub fn fit_to_width<S: Surface + ?Sized>(ctx: &S, text: &str, max_width: f64) -> String {
	if ctx.measure_text(text) <= max_width {
		return text.to_owned();
	}
	let chars: Vec<char> = text.chars().collect();
	let candidate = |keep: usize| {
		let mut s: String = chars[..keep].iter().collect();
		s.push(ELLIPSIS);
		s
	};

	// First kept count in 0..len that no longer fits.
	let (mut lo, mut hi) = (0, chars.len());
	while lo < hi {
		let mid = lo + (hi - lo) / 2;
		if ctx.measure_text(&candidate(mid)) <= max_width {
			lo = mid + 1;
		} else {
			hi = mid;
		}
	}
	match lo {
		0 => String::new(),
		n => candidate(n - 1),
	}
}
