use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::dispatch_click;
use super::render;
use super::state::{PanState, wheel_zoom};
use crate::config::CanvasConfig;
use crate::workflow::{Node, Point, Size, Viewport, Workflow};

/// Draws `workflow` on a `<canvas>` and reports clicks.
///
/// `zoom` and `pan` belong to the caller; wheel and drag gestures write
/// into them, and any change to them or to `workflow` schedules one redraw
/// on the next animation frame.
#[component]
pub fn WorkflowCanvas(
	#[prop(into)] workflow: Signal<Workflow>,
	zoom: RwSignal<f64>,
	pan: RwSignal<Point>,
	#[prop(optional)] on_node_click: Option<Callback<Node>>,
	#[prop(optional)] on_canvas_click: Option<Callback<(f64, f64)>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = use_context::<CanvasConfig>().unwrap_or_default();
	let size = RwSignal::new(Size::default());

	let viewport = move || {
		Viewport::default()
			.with_zoom(zoom.get_untracked())
			.with_pan(pan.get_untracked())
			.with_canvas_size(size.get_untracked())
	};

	let ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_pending = Rc::new(Cell::new(false));
	let resize_cb = StoredValue::new_local(None::<Closure<dyn FnMut()>>);

	let request_redraw = {
		let (frame, frame_pending) = (frame.clone(), frame_pending.clone());
		move || {
			if frame_pending.get() {
				return;
			}
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *frame.borrow() {
				frame_pending.set(true);
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	};

	let (ctx_frame, pending_frame) = (ctx.clone(), frame_pending.clone());
	*frame.borrow_mut() = Some(Closure::new(move || {
		pending_frame.set(false);
		if let Some(ref ctx) = *ctx_frame.borrow() {
			workflow.with_untracked(|wf| render::render(ctx, wf, &viewport(), &config));
		}
	}));

	let ctx_init = ctx.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let context: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let initial = measure(&canvas, &window, fullscreen, width, height);
		fit_canvas(&canvas, &context, &window, initial);
		*ctx_init.borrow_mut() = Some(context);
		size.set(initial);

		let (ctx_resize, canvas_resize) = (ctx_init.clone(), canvas.clone());
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let next = measure(&canvas_resize, &win, fullscreen, width, height);
			if let Some(ref ctx) = *ctx_resize.borrow() {
				fit_canvas(&canvas_resize, ctx, &win, next);
			}
			debug!("canvas resized to {}x{}", next.width, next.height);
			size.set(next);
		});
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		resize_cb.update_value(|slot| {
			if let Some(old) = slot.replace(on_resize) {
				detach_resize(&window, &old);
			}
		});
	});

	on_cleanup(move || {
		resize_cb.try_update_value(|slot| {
			if let (Some(cb), Some(window)) = (slot.take(), web_sys::window()) {
				detach_resize(&window, &cb);
			}
		});
	});

	Effect::new(move |_| {
		workflow.track();
		zoom.track();
		pan.track();
		size.track();
		request_redraw();
	});

	let pan_state = Rc::new(RefCell::new(PanState::default()));

	let state_md = pan_state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(at) = local_point(canvas_ref, &ev) {
			state_md.borrow_mut().begin(at, &viewport());
		}
	};

	let state_mm = pan_state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(at) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(next) = state_mm.borrow_mut().update(at, &viewport()) {
			pan.set(next.pan);
		}
	};

	let state_mu = pan_state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if !state_mu.borrow_mut().end() {
			return;
		}
		let Some(at) = local_point(canvas_ref, &ev) else {
			return;
		};
		workflow.with_untracked(|wf| {
			dispatch_click(
				at,
				wf,
				&viewport(),
				|node| {
					debug!("node clicked: {}", node.id);
					if let Some(cb) = on_node_click {
						cb.run(node.clone());
					}
				},
				|p| {
					if let Some(cb) = on_canvas_click {
						cb.run((p.x, p.y));
					}
				},
			)
		});
	};

	let state_ml = pan_state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().cancel();
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(at) = local_point(canvas_ref, &ev) else {
			return;
		};
		let next = wheel_zoom(&viewport(), at, ev.delta_y());
		zoom.set(next.zoom());
		pan.set(next.pan);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="workflow-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

/// Pointer position relative to the canvas, in CSS pixels.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn detach_resize(window: &Window, cb: &Closure<dyn FnMut()>) {
	let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
}

/// CSS size the canvas should take.
fn measure(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> Size {
	if fullscreen {
		let inner = |v: Result<JsValue, JsValue>, fallback| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
		};
		return Size::new(
			inner(window.inner_width(), 800.0),
			inner(window.inner_height(), 600.0),
		);
	}
	Size::new(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

/// Sizes the backing store for the device pixel ratio and scales the
/// context so drawing stays in CSS pixels.
fn fit_canvas(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	window: &Window,
	size: Size,
) {
	let dpr = window.device_pixel_ratio().max(1.0);
	canvas.set_width((size.width * dpr) as u32);
	canvas.set_height((size.height * dpr) as u32);
	// `ElementExt::style` from the leptos prelude shadows the inherent getter.
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", size.width));
	let _ = style.set_property("height", &format!("{}px", size.height));
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}
