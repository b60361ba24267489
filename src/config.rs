//! Canvas configuration.
//!
//! One [`CanvasConfig`] is built when the app starts and handed to the canvas
//! through Leptos context. Node geometry is deliberately not configurable
//! here; see [`crate::workflow::NODE_WIDTH`].

use serde::Deserialize;

use crate::workflow::Result;

/// Tunables for drawing the workflow canvas.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	/// Distance between grid lines in graph units.
	pub grid_spacing: f64,
	/// Node names and type labels are drawn above this zoom.
	pub label_zoom_threshold: f64,
	/// Type glyphs are drawn above this zoom.
	pub glyph_zoom_threshold: f64,
	pub background: String,
	pub grid_color: String,
	pub edge_color: String,
	pub port_fill: String,
	pub port_outline: String,
	pub text_color: String,
	pub subtext_color: String,
	pub font_family: String,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			grid_spacing: 20.0,
			label_zoom_threshold: 0.4,
			glyph_zoom_threshold: 0.8,
			background: "#1a1a2e".into(),
			grid_color: "rgba(255, 255, 255, 0.06)".into(),
			edge_color: "rgba(100, 180, 255, 0.8)".into(),
			port_fill: "#f5f5f5".into(),
			port_outline: "#1a1a2e".into(),
			text_color: "white".into(),
			subtext_color: "rgba(255, 255, 255, 0.7)".into(),
			font_family: "sans-serif".into(),
		}
	}
}

impl CanvasConfig {
	/// Reads a config from JSON. Keys that are absent keep their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}
