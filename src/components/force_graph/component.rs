use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::camera::CanvasMetrics;
use super::clock::{FrameSlot, SimulationClock, drop_later, now_ms};
use super::config::GraphConfig;
use super::controller::{GraphController, with_state};
use super::error::CanvasError;
use super::render;
use super::state::{ForceGraphState, HostNotice};
use super::types::{GraphData, GraphNode, Vec2};

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")?
		.ok_or(CanvasError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| CanvasError::NoContext)
}

fn metrics_of(canvas: &HtmlCanvasElement) -> CanvasMetrics {
	let rect = canvas.get_bounding_client_rect();
	CanvasMetrics {
		left: rect.left(),
		top: rect.top(),
		css_width: rect.width(),
		css_height: rect.height(),
		width: canvas.width() as f64,
		height: canvas.height() as f64,
	}
}

fn target_size(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	let inner = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	if fullscreen {
		return (inner(window.inner_width(), 800.0), inner(window.inner_height(), 600.0));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		}),
	)
}

#[derive(Clone, Copy)]
struct HostCallbacks {
	hover: Option<Callback<Option<GraphNode>>>,
	select: Option<Callback<Option<GraphNode>>>,
	double_click: Option<Callback<GraphNode>>,
}

impl HostCallbacks {
	/// Called only after the state borrow has been released, so callbacks may
	/// use the controller.
	fn dispatch(&self, notices: Vec<HostNotice>) {
		for notice in notices {
			match notice {
				HostNotice::Hover(node) => {
					if let Some(cb) = self.hover {
						cb.run(node);
					}
				}
				HostNotice::Select(node) => {
					if let Some(cb) = self.select {
						cb.run(node);
					}
				}
				HostNotice::DoubleClick(node) => {
					if let Some(cb) = self.double_click {
						cb.run(node);
					}
				}
			}
		}
	}
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: Option<GraphConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] controller: Option<GraphController>,
	#[prop(optional, into)] on_node_hover: Option<Callback<Option<GraphNode>>>,
	#[prop(optional, into)] on_node_select: Option<Callback<Option<GraphNode>>>,
	#[prop(optional, into)] on_node_double_click: Option<Callback<GraphNode>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let state = controller.unwrap_or_default().shared();
	let clock: Rc<RefCell<SimulationClock>> = Rc::new(RefCell::new(SimulationClock::new()));
	let animate: FrameSlot<Closure<dyn FnMut()>> = FrameSlot::default();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let callbacks = HostCallbacks {
		hover: on_node_hover,
		select: on_node_select,
		double_click: on_node_double_click,
	};

	let (state_init, clock_init, animate_init, resize_cb_init) =
		(state.clone(), clock.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let graph_data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("{}", CanvasError::NoWindow);
			return;
		};

		// The old timer must be gone before the node set is replaced.
		clock_init.borrow_mut().stop();

		let (w, h) = target_size(&canvas, &window, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let metrics = metrics_of(&canvas);
		let tick_ms = {
			let mut guard = state_init.borrow_mut();
			match guard.as_mut() {
				Some(s) => {
					s.resize(metrics);
					s.rebuild(&graph_data);
				}
				None => *guard = Some(ForceGraphState::new(&graph_data, config.clone(), metrics)),
			}
			guard.as_ref().map(|s| s.tick_ms()).unwrap_or(config.layout.tick_ms)
		};

		if !graph_data.nodes.is_empty() {
			let state_tick = state_init.clone();
			let started = clock_init.borrow_mut().start(tick_ms, move || {
				with_state(&state_tick, |s| s.tick());
			});
			if let Err(err) = started {
				warn!("layout clock not started: {err}");
			}
		}

		if resize_cb_init.borrow().is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = target_size(&canvas_resize, &win, fullscreen, width, height);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				let metrics = metrics_of(&canvas_resize);
				with_state(&state_resize, |s| s.resize(metrics));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				if let Err(err) =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				{
					warn!("resize listener not attached: {}", CanvasError::from(err));
				}
			}
		}

		if !animate_init.is_empty() {
			return;
		}
		let (state_anim, clock_anim, animate_inner, resize_inner) = (
			state_init.clone(),
			clock_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
		);
		let mut ctx: Option<CanvasRenderingContext2d> = None;
		animate_init.set(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if !canvas.is_connected() {
				clock_anim.borrow_mut().stop();
				if let Some(cb) = resize_inner.borrow_mut().take() {
					let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				// This closure is the one running, so it is freed on a later task.
				animate_inner.release(|cb| drop_later(&win, cb));
				return;
			}
			if ctx.is_none() {
				ctx = context_2d(&canvas)
					.inspect_err(|err| warn!("skipping frame: {err}"))
					.ok();
			}
			if let Some(ctx) = ctx.as_ref() {
				let now = now_ms();
				with_state(&state_anim, |s| {
					s.advance_camera(now);
					if let Err(err) = render::render(s, ctx) {
						warn!("render failed: {err}");
					}
				});
			}
			let _ = animate_inner.with(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()));
		}));
		let _ = animate_init.with(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
	});

	let set_cursor = move |cursor: &str| {
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let pointer = move |ev: &MouseEvent| -> Option<(CanvasMetrics, Vec2)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		Some((
			metrics_of(&canvas),
			Vec2::new(ev.client_x() as f64, ev.client_y() as f64),
		))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((metrics, client)) = pointer(&ev) else {
			return;
		};
		let (notices, cursor) = with_state(&state_md, |s| {
			let events = s.pointer_down(metrics, client);
			(s.notices(&events), s.cursor())
		});
		set_cursor(cursor);
		callbacks.dispatch(notices);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((metrics, client)) = pointer(&ev) else {
			return;
		};
		let (notices, cursor) = with_state(&state_mm, |s| {
			let events = s.pointer_move(metrics, client);
			(s.notices(&events), s.cursor())
		});
		set_cursor(cursor);
		callbacks.dispatch(notices);
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let now = now_ms();
		let (notices, cursor) = with_state(&state_mu, |s| {
			let events = s.pointer_up(now);
			(s.notices(&events), s.cursor())
		});
		set_cursor(cursor);
		callbacks.dispatch(notices);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let notices = with_state(&state_ml, |s| {
			let events = s.pointer_leave();
			s.notices(&events)
		});
		set_cursor("grab");
		callbacks.dispatch(notices);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((metrics, client)) = pointer(mouse) else {
			return;
		};
		with_state(&state_wh, |s| s.wheel(metrics, client, ev.delta_y()));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
