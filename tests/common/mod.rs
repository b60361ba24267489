//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use workflow_canvas::components::workflow_canvas::Surface;
use workflow_canvas::workflow::{Connection, Node, Point, Size, Viewport, Workflow};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
	ClearRect,
	FillRect,
	MoveTo(f64, f64),
	LineTo(f64, f64),
	BezierCurveTo(f64, f64),
	Arc(f64, f64),
	ClosePath,
	Fill,
	Stroke,
	FillText(String),
}

/// A [`Surface`] that records what was drawn instead of drawing it.
#[derive(Default)]
pub struct RecordingSurface {
	pub calls: RefCell<Vec<Call>>,
}

impl RecordingSurface {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.borrow().clone()
	}

	pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
		self.calls.borrow().iter().filter(|c| pred(c)).count()
	}

	pub fn texts(&self) -> Vec<String> {
		self.calls
			.borrow()
			.iter()
			.filter_map(|c| match c {
				Call::FillText(t) => Some(t.clone()),
				_ => None,
			})
			.collect()
	}

	fn push(&self, call: Call) {
		self.calls.borrow_mut().push(call);
	}
}

impl Surface for RecordingSurface {
	fn clear_rect(&self, _: f64, _: f64, _: f64, _: f64) {
		self.push(Call::ClearRect);
	}
	fn fill_rect(&self, _: f64, _: f64, _: f64, _: f64) {
		self.push(Call::FillRect);
	}
	fn set_fill_style(&self, _: &str) {}
	fn set_stroke_style(&self, _: &str) {}
	fn set_line_width(&self, _: f64) {}
	fn set_line_dash(&self, _: &[f64]) {}
	fn begin_path(&self) {}
	fn move_to(&self, x: f64, y: f64) {
		self.push(Call::MoveTo(x, y));
	}
	fn line_to(&self, x: f64, y: f64) {
		self.push(Call::LineTo(x, y));
	}
	fn quadratic_curve_to(&self, _: f64, _: f64, _: f64, _: f64) {}
	fn bezier_curve_to(&self, _: f64, _: f64, _: f64, _: f64, x: f64, y: f64) {
		self.push(Call::BezierCurveTo(x, y));
	}
	fn arc(&self, x: f64, y: f64, _: f64, _: f64, _: f64) {
		self.push(Call::Arc(x, y));
	}
	fn close_path(&self) {
		self.push(Call::ClosePath);
	}
	fn fill(&self) {
		self.push(Call::Fill);
	}
	fn stroke(&self) {
		self.push(Call::Stroke);
	}
	fn set_font(&self, _: &str) {}
	fn set_text_align(&self, _: &str) {}
	fn set_text_baseline(&self, _: &str) {}
	fn fill_text(&self, text: &str, _: f64, _: f64) {
		self.push(Call::FillText(text.to_owned()));
	}
	fn measure_text(&self, text: &str) -> f64 {
		text.chars().count() as f64 * 8.0
	}
}

pub fn node(id: &str, x: f64, y: f64) -> Node {
	Node::new(id, "core.set", format!("Node {id}"), Point::new(x, y))
}

/// Trigger -> http -> set, laid out left to right.
pub fn linear_workflow() -> Workflow {
	Workflow::new(
		vec![
			Node::new("t", "core.manualTrigger", "Start", Point::new(-400.0, 0.0)),
			Node::new("h", "core.httpRequest", "Fetch", Point::new(-100.0, 0.0)),
			Node::new("s", "core.set", "Store", Point::new(200.0, 0.0)),
		],
		vec![Connection::new("t", 0, "h", 0), Connection::new("h", 0, "s", 0)],
	)
}

pub fn viewport(zoom: f64, pan: (f64, f64)) -> Viewport {
	Viewport::new(zoom, Point::new(pan.0, pan.1), Size::new(1024.0, 768.0))
		.expect("valid test viewport")
}

/// A spread of viewports covering zoomed in, zoomed out, and panned views.
pub fn sample_viewports() -> Vec<Viewport> {
	let mut out = Vec::new();
	for zoom in [0.1, 0.25, 0.5, 1.0, 1.7, 3.0, 10.0] {
		for pan in [(0.0, 0.0), (-250.0, 120.5), (1e4, -3e3)] {
			out.push(viewport(zoom, pan));
		}
	}
	out
}
