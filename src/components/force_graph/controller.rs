use std::cell::RefCell;
use std::rc::Rc;

use super::clock::now_ms;
use super::state::ForceGraphState;
use super::types::GraphNode;

pub(super) type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

/// Runs `f` against the mounted state, or returns the default when the canvas
/// is not mounted yet or the state is already borrowed.
pub(super) fn with_state<R: Default>(
	state: &SharedState,
	f: impl FnOnce(&mut ForceGraphState) -> R,
) -> R {
	match state.try_borrow_mut() {
		Ok(mut guard) => guard.as_mut().map(f).unwrap_or_default(),
		Err(_) => R::default(),
	}
}

/// Camera commands for host-page UI such as zoom buttons or a search box.
///
/// Create one, hand a clone to `ForceGraphCanvas`, and keep the other.
/// Commands issued before the canvas mounts are ignored.
#[derive(Clone, Default)]
pub struct GraphController {
	state: SharedState,
}

impl GraphController {
	pub fn new() -> Self {
		Self::default()
	}

	pub(super) fn shared(&self) -> SharedState {
		self.state.clone()
	}

	pub fn zoom_in(&self) {
		with_state(&self.state, |s| s.zoom_in());
	}

	pub fn zoom_out(&self) {
		with_state(&self.state, |s| s.zoom_out());
	}

	pub fn reset_view(&self) {
		with_state(&self.state, |s| s.reset_view());
	}

	/// Animates the camera to frame `node_ids`. Returns false when none of the
	/// ids are in the current graph.
	pub fn zoom_to_fit(&self, node_ids: &[String], padding: f64, duration_ms: f64) -> bool {
		let now = now_ms();
		with_state(&self.state, |s| s.zoom_to_fit(node_ids, padding, duration_ms, now))
	}

	/// Selects a node by id and frames its neighbourhood. Returns the node
	/// when it exists.
	pub fn focus(&self, node_id: &str) -> Option<GraphNode> {
		let now = now_ms();
		with_state(&self.state, |s| {
			let idx = s.graph().index_of(node_id)?;
			s.select_id(node_id);
			let ids: Vec<String> = s
				.graph()
				.neighborhood(idx)
				.into_iter()
				.filter_map(|i| s.node(i).map(|n| n.id.clone()))
				.collect();
			let fit = s.config().fit.clone();
			s.zoom_to_fit(&ids, fit.padding, fit.duration_ms, now);
			s.node(idx).cloned()
		})
	}
}
