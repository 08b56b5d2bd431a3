use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the DOM boundary. None of them are fatal: the caller skips the
/// frame and tries again on the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
	#[error("no global window")]
	NoWindow,

	#[error("2d context unavailable")]
	NoContext,

	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for CanvasError {
	fn from(value: JsValue) -> Self {
		CanvasError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
