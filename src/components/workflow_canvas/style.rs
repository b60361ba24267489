//! Node appearance by type, plus the fixed sizes the renderer draws with.

use std::borrow::Cow;

/// Port marker radius in graph units.
pub const PORT_RADIUS: f64 = 6.0;
/// Corner radius of a node box in graph units.
pub const CORNER_RADIUS: f64 = 10.0;
/// Horizontal space kept free around a node's name, in graph units.
pub const LABEL_MARGIN: f64 = 20.0;
/// Font size of a node's name in graph units.
pub const NAME_FONT_SIZE: f64 = 14.0;
/// Font size of the type subtitle in graph units.
pub const TYPE_FONT_SIZE: f64 = 11.0;
/// Font size of the type glyph in graph units.
pub const GLYPH_FONT_SIZE: f64 = 16.0;
/// The type subtitle never exceeds this many characters.
pub const TYPE_LABEL_MAX_CHARS: usize = 24;
/// Arrowhead length in graph units.
pub const ARROW_SIZE: f64 = 10.0;
/// Minimum horizontal control-point offset of an edge, in graph units.
pub const EDGE_MIN_CURVE: f64 = 50.0;
/// Edge stroke width in graph units.
pub const EDGE_WIDTH: f64 = 2.0;

pub const DEFAULT_NODE_COLOR: &str = "#6b7280";
pub const DEFAULT_NODE_GLYPH: &str = "\u{25c6}";

pub const ELLIPSIS: char = '\u{2026}';

/// Fill color and glyph for a node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStyle {
	pub color: &'static str,
	pub glyph: &'static str,
}

const DEFAULT_STYLE: NodeStyle = NodeStyle {
	color: DEFAULT_NODE_COLOR,
	glyph: DEFAULT_NODE_GLYPH,
};

// First keyword found in the lowercased type suffix wins.
const STYLES: &[(&str, NodeStyle)] = &[
	("trigger", NodeStyle { color: "#2ca02c", glyph: "\u{26a1}" }),
	("webhook", NodeStyle { color: "#17becf", glyph: "\u{21af}" }),
	("schedule", NodeStyle { color: "#bcbd22", glyph: "\u{23f1}" }),
	("http", NodeStyle { color: "#1f77b4", glyph: "\u{1f310}" }),
	("code", NodeStyle { color: "#ff7f0e", glyph: "{}" }),
	("function", NodeStyle { color: "#ff7f0e", glyph: "\u{192}" }),
	("if", NodeStyle { color: "#9467bd", glyph: "?" }),
	("switch", NodeStyle { color: "#9467bd", glyph: "\u{2442}" }),
	("merge", NodeStyle { color: "#8c564b", glyph: "\u{2a01}" }),
	("set", NodeStyle { color: "#e377c2", glyph: "=" }),
	("openai", NodeStyle { color: "#d62728", glyph: "\u{2728}" }),
	("agent", NodeStyle { color: "#d62728", glyph: "\u{2728}" }),
	("email", NodeStyle { color: "#1f77b4", glyph: "\u{2709}" }),
	("whatsapp", NodeStyle { color: "#2ca02c", glyph: "\u{260e}" }),
];

/// Looks a type up by keyword. Unknown types get the neutral default.
pub fn node_style(node_type: &str) -> NodeStyle {
	let suffix = node_type
		.rsplit_once('.')
		.map_or(node_type, |(_, s)| s)
		.to_ascii_lowercase();
	if suffix.is_empty() {
		return DEFAULT_STYLE;
	}
	STYLES
		.iter()
		.find(|(keyword, _)| suffix.contains(keyword))
		.map_or(DEFAULT_STYLE, |(_, style)| *style)
}

/// Cuts `text` to at most `max` characters, the last one being `…` when
/// anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> Cow<'_, str> {
	if text.chars().count() <= max {
		return Cow::Borrowed(text);
	}
	if max == 0 {
		return Cow::Borrowed("");
	}
	let mut out: String = text.chars().take(max - 1).collect();
	out.push(ELLIPSIS);
	Cow::Owned(out)
}
