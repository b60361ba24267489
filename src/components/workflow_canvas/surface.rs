use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// The 2-D drawing calls the renderer makes.
///
/// Mirrors the subset of `CanvasRenderingContext2d` in use, so the browser
/// context implements it directly and tests can record calls instead.
pub trait Surface {
	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
	fn set_fill_style(&self, style: &str);
	fn set_stroke_style(&self, style: &str);
	fn set_line_width(&self, width: f64);
	/// An empty slice means solid lines.
	fn set_line_dash(&self, segments: &[f64]);
	fn begin_path(&self);
	fn move_to(&self, x: f64, y: f64);
	fn line_to(&self, x: f64, y: f64);
	fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64);
	fn bezier_curve_to(&self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
	fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	fn close_path(&self);
	fn fill(&self);
	fn stroke(&self);
	fn set_font(&self, font: &str);
	fn set_text_align(&self, align: &str);
	fn set_text_baseline(&self, baseline: &str);
	fn fill_text(&self, text: &str, x: f64, y: f64);
	/// Width of `text` in pixels under the current font.
	fn measure_text(&self, text: &str) -> f64;
}

impl Surface for CanvasRenderingContext2d {
	fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
	}

	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn set_fill_style(&self, style: &str) {
		self.set_fill_style_str(style);
	}

	fn set_stroke_style(&self, style: &str) {
		self.set_stroke_style_str(style);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_line_dash(&self, segments: &[f64]) {
		let array: js_sys::Array = segments.iter().copied().map(JsValue::from_f64).collect();
		let _ = CanvasRenderingContext2d::set_line_dash(self, &array);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64) {
		CanvasRenderingContext2d::quadratic_curve_to(self, cpx, cpy, x, y);
	}

	fn bezier_curve_to(&self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
		CanvasRenderingContext2d::bezier_curve_to(self, cp1x, cp1y, cp2x, cp2y, x, y);
	}

	fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let _ = CanvasRenderingContext2d::arc(self, x, y, radius, start, end);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn set_text_align(&self, align: &str) {
		CanvasRenderingContext2d::set_text_align(self, align);
	}

	fn set_text_baseline(&self, baseline: &str) {
		CanvasRenderingContext2d::set_text_baseline(self, baseline);
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn measure_text(&self, text: &str) -> f64 {
		CanvasRenderingContext2d::measure_text(self, text)
			.map(|m| m.width())
			.unwrap_or(0.0)
	}
}
