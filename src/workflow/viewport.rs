//! Graph-space to screen-space mapping.
//!
//! A node position is stored in logical graph units. The viewport maps it to
//! CSS pixels on the canvas with
//! `screen = (graph + pan) * zoom + canvas_size / 2`, and back with the exact
//! inverse. Renderer and hit-test both go through [`Viewport::node_rect`], so
//! they cannot disagree about where a node is.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Width of a node box in graph units.
pub const NODE_WIDTH: f64 = 180.0;
/// Height of a node box in graph units.
pub const NODE_HEIGHT: f64 = 72.0;

/// Smallest zoom a gesture can reach.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom a gesture can reach.
pub const MAX_ZOOM: f64 = 10.0;

/// A 2-D point. Serialized as a `[x, y]` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl From<[f64; 2]> for Point {
	fn from([x, y]: [f64; 2]) -> Self {
		Self { x, y }
	}
}

impl From<Point> for [f64; 2] {
	fn from(p: Point) -> Self {
		[p.x, p.y]
	}
}

/// Canvas dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Axis-aligned rectangle in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	/// Inclusive on all four edges.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	/// True when the rectangles overlap or touch.
	pub fn intersects(&self, other: &Rect) -> bool {
		self.x <= other.x + other.width
			&& self.x + self.width >= other.x
			&& self.y <= other.y + other.height
			&& self.y + self.height >= other.y
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Midpoint of the left edge, where the input port sits.
	pub fn left_center(&self) -> Point {
		Point::new(self.x, self.y + self.height / 2.0)
	}

	/// Midpoint of the right edge, where the output port sits.
	pub fn right_center(&self) -> Point {
		Point::new(self.x + self.width, self.y + self.height / 2.0)
	}
}

/// Zoom, pan and canvas size. `zoom` is always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	zoom: f64,
	/// Offset in graph units, applied before scaling.
	pub pan: Point,
	pub canvas_size: Size,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan: Point::default(),
			canvas_size: Size::new(800.0, 600.0),
		}
	}
}

impl Viewport {
	/// Builds a viewport, rejecting a zoom that is not positive and finite.
	pub fn new(zoom: f64, pan: Point, canvas_size: Size) -> Result<Self> {
		if !(zoom.is_finite() && zoom > 0.0) {
			return Err(Error::InvalidZoom(zoom));
		}
		Ok(Self {
			zoom,
			pan,
			canvas_size,
		})
	}

	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	/// Same viewport with `zoom` clamped into `[MIN_ZOOM, MAX_ZOOM]`.
	/// A NaN zoom leaves the current one in place.
	pub fn with_zoom(mut self, zoom: f64) -> Self {
		if !zoom.is_nan() {
			self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
		}
		self
	}

	pub fn with_pan(mut self, pan: Point) -> Self {
		self.pan = pan;
		self
	}

	pub fn with_canvas_size(mut self, canvas_size: Size) -> Self {
		self.canvas_size = canvas_size;
		self
	}

	pub fn to_screen(&self, p: Point) -> Point {
		Point::new(
			(p.x + self.pan.x) * self.zoom + self.canvas_size.width / 2.0,
			(p.y + self.pan.y) * self.zoom + self.canvas_size.height / 2.0,
		)
	}

	pub fn to_graph(&self, s: Point) -> Point {
		Point::new(
			(s.x - self.canvas_size.width / 2.0) / self.zoom - self.pan.x,
			(s.y - self.canvas_size.height / 2.0) / self.zoom - self.pan.y,
		)
	}

	/// Screen rectangle of a node box whose top-left corner sits at
	/// `position` in graph space.
	pub fn node_rect(&self, position: Point) -> Rect {
		let origin = self.to_screen(position);
		Rect {
			x: origin.x,
			y: origin.y,
			width: NODE_WIDTH * self.zoom,
			height: NODE_HEIGHT * self.zoom,
		}
	}

	/// The canvas itself as a screen rectangle.
	pub fn bounds(&self) -> Rect {
		Rect {
			x: 0.0,
			y: 0.0,
			width: self.canvas_size.width,
			height: self.canvas_size.height,
		}
	}

	/// Zooms by `factor` while keeping the graph point under `anchor` fixed.
	pub fn zoomed_about(&self, anchor: Point, factor: f64) -> Self {
		let fixed = self.to_graph(anchor);
		let next = self.with_zoom(self.zoom * factor);
		let pan = Point::new(
			(anchor.x - self.canvas_size.width / 2.0) / next.zoom - fixed.x,
			(anchor.y - self.canvas_size.height / 2.0) / next.zoom - fixed.y,
		);
		next.with_pan(pan)
	}

	/// Shifts the view by a screen-space drag delta.
	pub fn panned_by(&self, dx: f64, dy: f64) -> Self {
		self.with_pan(Point::new(
			self.pan.x + dx / self.zoom,
			self.pan.y + dy / self.zoom,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_close(a: Point, b: Point) {
		assert!(
			(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
			"{a:?} != {b:?}"
		);
	}

	// ========================================================================
	// Transform
	// ========================================================================

	#[test]
	fn test_identity_viewport_centers_origin() {
		let v = Viewport::default();
		assert_eq!(v.to_screen(Point::new(0.0, 0.0)), Point::new(400.0, 300.0));
	}

	#[test]
	fn test_pan_applies_before_zoom() {
		let v = Viewport::new(2.0, Point::new(10.0, -5.0), Size::new(100.0, 100.0)).unwrap();
		// (1 + 10) * 2 + 50, (1 - 5) * 2 + 50
		assert_eq!(v.to_screen(Point::new(1.0, 1.0)), Point::new(72.0, 42.0));
	}

	#[test]
	fn test_to_graph_inverts_to_screen() {
		let v = Viewport::new(0.37, Point::new(-120.5, 33.25), Size::new(1280.0, 720.0)).unwrap();
		for p in [
			Point::new(0.0, 0.0),
			Point::new(250.0, 300.0),
			Point::new(-1e4, 7.5),
		] {
			assert_close(v.to_graph(v.to_screen(p)), p);
		}
	}

	// ========================================================================
	// Zoom invariant
	// ========================================================================

	#[test]
	fn test_new_rejects_non_positive_zoom() {
		for zoom in [0.0, -1.0, f64::NAN, f64::INFINITY] {
			assert!(matches!(
				Viewport::new(zoom, Point::default(), Size::default()),
				Err(Error::InvalidZoom(_))
			));
		}
	}

	#[test]
	fn test_with_zoom_clamps() {
		let v = Viewport::default();
		assert_eq!(v.with_zoom(0.0).zoom(), MIN_ZOOM);
		assert_eq!(v.with_zoom(-3.0).zoom(), MIN_ZOOM);
		assert_eq!(v.with_zoom(100.0).zoom(), MAX_ZOOM);
		assert_eq!(v.with_zoom(f64::NAN).zoom(), 1.0);
	}

	// ========================================================================
	// Gestures
	// ========================================================================

	#[test]
	fn test_zoom_about_keeps_anchor_fixed() {
		let v = Viewport::new(1.3, Point::new(40.0, -12.0), Size::new(640.0, 480.0)).unwrap();
		let anchor = Point::new(123.0, 321.0);
		let before = v.to_graph(anchor);
		let zoomed = v.zoomed_about(anchor, 1.1);
		assert!((zoomed.zoom() - 1.43).abs() < 1e-9);
		assert_close(zoomed.to_graph(anchor), before);
	}

	#[test]
	fn test_pan_moves_content_with_pointer() {
		let v = Viewport::new(2.0, Point::default(), Size::new(200.0, 200.0)).unwrap();
		let p = Point::new(5.0, 5.0);
		let before = v.to_screen(p);
		let after = v.panned_by(30.0, -10.0).to_screen(p);
		assert_close(after, Point::new(before.x + 30.0, before.y - 10.0));
	}

	// ========================================================================
	// Rectangles
	// ========================================================================

	#[test]
	fn test_node_rect_scales_with_zoom() {
		let v = Viewport::new(0.5, Point::default(), Size::new(0.0, 0.0)).unwrap();
		let r = v.node_rect(Point::new(100.0, 40.0));
		assert_eq!(r.x, 50.0);
		assert_eq!(r.y, 20.0);
		assert_eq!(r.width, NODE_WIDTH * 0.5);
		assert_eq!(r.height, NODE_HEIGHT * 0.5);
	}

	#[test]
	fn test_rect_edges_are_inclusive() {
		let r = Rect {
			x: 0.0,
			y: 0.0,
			width: 10.0,
			height: 10.0,
		};
		assert!(r.contains(Point::new(10.0, 10.0)));
		assert!(!r.contains(Point::new(10.01, 5.0)));
		assert!(r.intersects(&Rect {
			x: 10.0,
			y: 10.0,
			width: 5.0,
			height: 5.0
		}));
	}
}
