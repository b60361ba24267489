use crate::workflow::{Point, Viewport};

/// A press that moves less than this many pixels before release is a click.
pub const CLICK_SLOP: f64 = 4.0;
/// Zoom factor applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Drag-to-pan gesture in progress.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once the pointer has left the click slop.
	pub moved: bool,
	pub start: Point,
	pub pan_start: Point,
}

impl PanState {
	pub fn begin(&mut self, at: Point, viewport: &Viewport) {
		self.active = true;
		self.moved = false;
		self.start = at;
		self.pan_start = viewport.pan;
	}

	/// Viewport for the pointer now being at `at`, or `None` while the
	/// gesture is still within the click slop.
	pub fn update(&mut self, at: Point, viewport: &Viewport) -> Option<Viewport> {
		if !self.active {
			return None;
		}
		let (dx, dy) = (at.x - self.start.x, at.y - self.start.y);
		if !self.moved && (dx * dx + dy * dy).sqrt() < CLICK_SLOP {
			return None;
		}
		self.moved = true;
		Some(viewport.with_pan(self.pan_start).panned_by(dx, dy))
	}

	/// Ends the gesture; true if it was a click rather than a drag.
	pub fn end(&mut self) -> bool {
		let click = self.active && !self.moved;
		self.active = false;
		self.moved = false;
		click
	}

	pub fn cancel(&mut self) {
		self.active = false;
		self.moved = false;
	}
}

/// Viewport after one wheel event at `anchor`. Negative `delta_y` zooms in.
pub fn wheel_zoom(viewport: &Viewport, anchor: Point, delta_y: f64) -> Viewport {
	let factor = if delta_y > 0.0 {
		1.0 / WHEEL_ZOOM_STEP
	} else {
		WHEEL_ZOOM_STEP
	};
	viewport.zoomed_about(anchor, factor)
}
