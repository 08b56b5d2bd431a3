use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;

use super::error::CanvasError;

/// A repeating timer the clock can arm and disarm.
pub trait IntervalTimer {
	type Handle;

	fn arm(&mut self, period_ms: u32, tick: Box<dyn FnMut()>) -> Result<Self::Handle, CanvasError>;
	fn disarm(&mut self, handle: Self::Handle);
}

/// `setInterval` on the page window.
#[derive(Default)]
pub struct WindowTimer;

impl IntervalTimer for WindowTimer {
	type Handle = (i32, Closure<dyn FnMut()>);

	fn arm(&mut self, period_ms: u32, tick: Box<dyn FnMut()>) -> Result<Self::Handle, CanvasError> {
		let window = web_sys::window().ok_or(CanvasError::NoWindow)?;
		let closure = Closure::wrap(tick);
		let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
			closure.as_ref().unchecked_ref(),
			period_ms as i32,
		)?;
		Ok((id, closure))
	}

	fn disarm(&mut self, (id, closure): Self::Handle) {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(id);
		}
		// The closure must outlive the interval it backs.
		drop(closure);
	}
}

/// Owns the repeating timer that drives the layout.
///
/// Starting always clears a running interval first, and dropping the clock
/// clears it too, so a rebuilt graph never shares a timer with stale state.
pub struct SimulationClock<T: IntervalTimer = WindowTimer> {
	timer: T,
	handle: Option<T::Handle>,
}

impl SimulationClock {
	pub fn new() -> Self {
		Self::with_timer(WindowTimer)
	}
}

impl<T: IntervalTimer> SimulationClock<T> {
	pub fn with_timer(timer: T) -> Self {
		Self { timer, handle: None }
	}

	#[cfg(test)]
	fn is_running(&self) -> bool {
		self.handle.is_some()
	}

	pub fn start(&mut self, period_ms: u32, tick: impl FnMut() + 'static) -> Result<(), CanvasError> {
		self.stop();
		let handle = self.timer.arm(period_ms, Box::new(tick))?;
		info!("simulation clock started ({period_ms} ms)");
		self.handle = Some(handle);
		Ok(())
	}

	pub fn stop(&mut self) {
		let Some(handle) = self.handle.take() else {
			return;
		};
		self.timer.disarm(handle);
		debug!("simulation clock stopped");
	}
}

impl<T: IntervalTimer> Drop for SimulationClock<T> {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Holds a self-rearming frame callback.
///
/// The callback keeps a clone of its own slot to schedule the next frame, so
/// the two form a reference cycle until [`FrameSlot::release`] empties it.
pub struct FrameSlot<T>(Rc<RefCell<Option<T>>>);

impl<T> Clone for FrameSlot<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> Default for FrameSlot<T> {
	fn default() -> Self {
		Self(Rc::new(RefCell::new(None)))
	}
}

impl<T> FrameSlot<T> {
	pub fn is_empty(&self) -> bool {
		self.0.borrow().is_none()
	}

	pub fn set(&self, value: T) {
		*self.0.borrow_mut() = Some(value);
	}

	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
		self.0.borrow().as_ref().map(f)
	}

	/// Empties the slot and passes the value to `dispose`. The value may be the
	/// callback that is running right now, so `dispose` must not drop it inline.
	pub fn release(&self, dispose: impl FnOnce(T)) {
		let taken = self.0.borrow_mut().take();
		if let Some(value) = taken {
			dispose(value);
		}
	}
}

/// Drops `value` from a fresh task, once the current callback has returned.
pub fn drop_later<T: 'static>(window: &web_sys::Window, value: T) {
	let release = Closure::once_into_js(move || drop(value));
	if let Err(err) = window.set_timeout_with_callback(release.unchecked_ref()) {
		debug!("deferred release not scheduled: {}", CanvasError::from(err));
	}
}

/// Milliseconds from the page's high-resolution clock, falling back to wall time.
pub fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}
