//! Pointer state machine: hover tracking, background panning, node selection,
//! and double-click detection.

use super::types::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionParams {
	/// Two clicks on one node closer than this (inclusive) form a double-click.
	pub double_click_ms: f64,
	/// Pointer travel in canvas pixels after which a press is no longer a click.
	pub drag_slop: f64,
	pub hit_radius: f64,
}

impl Default for InteractionParams {
	fn default() -> Self {
		Self {
			double_click_ms: 300.0,
			drag_slop: 4.0,
			hit_radius: super::hit::HIT_RADIUS,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
	/// Pointer outside the canvas and nothing selected.
	Idle,
	HoverTracking,
	/// Button held over a node.
	Pressed { node: usize, origin: Vec2, moved: bool },
	/// Button held over empty canvas; moves pan the camera.
	Dragging { origin: Vec2, last: Vec2, moved: bool },
	/// Button up with a node selected.
	NodeSelected,
}

/// Something the host or the renderer should react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphEvent {
	Hover(Option<usize>),
	Select(Option<usize>),
	Click(usize),
	DoubleClick(usize),
	Pan(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
	Single,
	Double,
}

pub fn classify_click(last: Option<(usize, f64)>, node: usize, now: f64, window_ms: f64) -> ClickKind {
	match last {
		Some((prev, at)) if prev == node && now - at >= 0.0 && now - at <= window_ms => {
			ClickKind::Double
		}
		_ => ClickKind::Single,
	}
}

#[derive(Clone, Debug)]
pub struct Interaction {
	params: InteractionParams,
	phase: Phase,
	hovered: Option<usize>,
	selected: Option<usize>,
	last_click: Option<(usize, f64)>,
}

impl Interaction {
	pub fn new(params: InteractionParams) -> Self {
		Self {
			params,
			phase: Phase::Idle,
			hovered: None,
			selected: None,
			last_click: None,
		}
	}

	#[cfg(test)]
	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.phase, Phase::Dragging { .. })
	}

	fn resting_phase(&self) -> Phase {
		if self.selected.is_some() {
			Phase::NodeSelected
		} else {
			Phase::HoverTracking
		}
	}

	fn set_hover(&mut self, node: Option<usize>, events: &mut Vec<GraphEvent>) {
		if self.hovered != node {
			self.hovered = node;
			events.push(GraphEvent::Hover(node));
		}
	}

	fn set_selected(&mut self, node: Option<usize>, events: &mut Vec<GraphEvent>) {
		if self.selected != node {
			self.selected = node;
			events.push(GraphEvent::Select(node));
		}
	}

	/// `hit` is only consulted while the button is up.
	pub fn pointer_move(&mut self, local: Vec2, hit: impl FnOnce() -> Option<usize>) -> Vec<GraphEvent> {
		let mut events = Vec::new();
		let slop_sq = self.params.drag_slop * self.params.drag_slop;
		match self.phase {
			Phase::Dragging { origin, last, moved } => {
				let delta = local - last;
				self.phase = Phase::Dragging {
					origin,
					last: local,
					moved: moved || (local - origin).length_sq() > slop_sq,
				};
				if delta != Vec2::ZERO {
					events.push(GraphEvent::Pan(delta));
				}
			}
			Phase::Pressed { node, origin, moved } => {
				self.phase = Phase::Pressed {
					node,
					origin,
					moved: moved || (local - origin).length_sq() > slop_sq,
				};
			}
			Phase::Idle | Phase::HoverTracking | Phase::NodeSelected => {
				self.set_hover(hit(), &mut events);
				if self.phase == Phase::Idle {
					self.phase = Phase::HoverTracking;
				}
			}
		}
		events
	}

	pub fn pointer_down(&mut self, local: Vec2, hit: Option<usize>) -> Vec<GraphEvent> {
		let mut events = Vec::new();
		match hit {
			Some(node) => {
				self.set_selected(Some(node), &mut events);
				self.phase = Phase::Pressed {
					node,
					origin: local,
					moved: false,
				};
			}
			None => {
				self.phase = Phase::Dragging {
					origin: local,
					last: local,
					moved: false,
				};
			}
		}
		events
	}

	/// Ends any press; safe to call when no button is held.
	pub fn pointer_up(&mut self, now: f64) -> Vec<GraphEvent> {
		let mut events = Vec::new();
		match self.phase {
			Phase::Pressed { node, moved: false, .. } => {
				match classify_click(self.last_click, node, now, self.params.double_click_ms) {
					ClickKind::Double => {
						self.last_click = None;
						events.push(GraphEvent::DoubleClick(node));
					}
					ClickKind::Single => {
						self.last_click = Some((node, now));
						events.push(GraphEvent::Click(node));
					}
				}
				self.phase = self.resting_phase();
			}
			Phase::Dragging { moved: false, .. } => {
				self.last_click = None;
				self.set_hover(None, &mut events);
				self.set_selected(None, &mut events);
				self.phase = Phase::HoverTracking;
			}
			Phase::Pressed { .. } | Phase::Dragging { .. } => {
				self.phase = self.resting_phase();
			}
			Phase::Idle | Phase::HoverTracking | Phase::NodeSelected => {}
		}
		events
	}

	pub fn pointer_leave(&mut self) -> Vec<GraphEvent> {
		let mut events = Vec::new();
		self.set_hover(None, &mut events);
		self.phase = if self.selected.is_some() {
			Phase::NodeSelected
		} else {
			Phase::Idle
		};
		events
	}

	/// Selects a node programmatically, e.g. after a search.
	pub fn select(&mut self, node: Option<usize>) -> Vec<GraphEvent> {
		let mut events = Vec::new();
		self.set_selected(node, &mut events);
		if !matches!(self.phase, Phase::Pressed { .. } | Phase::Dragging { .. }) {
			self.phase = self.resting_phase();
		}
		events
	}

	/// The node whose neighbourhood should be highlighted, hover first.
	pub fn focus(&self) -> Option<usize> {
		self.hovered.or(self.selected)
	}

	pub fn reset(&mut self) {
		self.phase = Phase::Idle;
		self.hovered = None;
		self.selected = None;
		self.last_click = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn machine() -> Interaction {
		Interaction::new(InteractionParams::default())
	}

	fn click(m: &mut Interaction, node: usize, now: f64) -> Vec<GraphEvent> {
		let at = Vec2::new(10.0, 10.0);
		let mut events = m.pointer_down(at, Some(node));
		events.extend(m.pointer_up(now));
		events
	}

	#[test]
	fn double_click_window() {
		assert_eq!(classify_click(Some((3, 1000.0)), 3, 1250.0, 300.0), ClickKind::Double);
		assert_eq!(classify_click(Some((3, 1000.0)), 3, 1400.0, 300.0), ClickKind::Single);
		assert_eq!(classify_click(Some((2, 1000.0)), 3, 1100.0, 300.0), ClickKind::Single);
		assert_eq!(classify_click(None, 3, 1100.0, 300.0), ClickKind::Single);
	}

	#[test]
	fn clicks_250ms_apart_are_a_double_click() {
		let mut m = machine();
		assert_eq!(click(&mut m, 4, 1000.0), vec![GraphEvent::Select(Some(4)), GraphEvent::Click(4)]);
		assert_eq!(click(&mut m, 4, 1250.0), vec![GraphEvent::DoubleClick(4)]);
	}

	#[test]
	fn clicks_400ms_apart_are_two_single_clicks() {
		let mut m = machine();
		click(&mut m, 4, 1000.0);
		assert_eq!(click(&mut m, 4, 1400.0), vec![GraphEvent::Click(4)]);
	}

	#[test]
	fn triple_click_is_one_double_then_a_single() {
		let mut m = machine();
		click(&mut m, 1, 0.0);
		assert_eq!(click(&mut m, 1, 100.0), vec![GraphEvent::DoubleClick(1)]);
		assert_eq!(click(&mut m, 1, 200.0), vec![GraphEvent::Click(1)]);
	}

	#[test]
	fn clicks_on_different_nodes_are_not_double() {
		let mut m = machine();
		click(&mut m, 1, 0.0);
		let events = click(&mut m, 2, 100.0);
		assert_eq!(events, vec![GraphEvent::Select(Some(2)), GraphEvent::Click(2)]);
	}

	#[test]
	fn press_on_node_selects_without_dragging() {
		let mut m = machine();
		let events = m.pointer_down(Vec2::ZERO, Some(7));
		assert_eq!(events, vec![GraphEvent::Select(Some(7))]);
		assert!(!m.is_dragging());
		assert_eq!(m.selected(), Some(7));
		let moved = m.pointer_move(Vec2::new(50.0, 0.0), || panic!("no hit-test while pressed"));
		assert!(moved.is_empty());
		assert!(m.pointer_up(10.0).is_empty());
		assert_eq!(m.phase(), Phase::NodeSelected);
	}

	#[test]
	fn background_drag_pans_by_raw_delta() {
		let mut m = machine();
		m.pointer_down(Vec2::new(100.0, 100.0), None);
		assert!(m.is_dragging());
		let events = m.pointer_move(Vec2::new(110.0, 95.0), || panic!("no hit-test while dragging"));
		assert_eq!(events, vec![GraphEvent::Pan(Vec2::new(10.0, -5.0))]);
		let events = m.pointer_move(Vec2::new(111.0, 95.0), || None);
		assert_eq!(events, vec![GraphEvent::Pan(Vec2::new(1.0, 0.0))]);
		m.pointer_up(0.0);
		assert!(!m.is_dragging());
	}

	#[test]
	fn drag_release_keeps_selection() {
		let mut m = machine();
		click(&mut m, 2, 0.0);
		m.pointer_down(Vec2::ZERO, None);
		m.pointer_move(Vec2::new(40.0, 0.0), || None);
		assert!(m.pointer_up(10.0).is_empty());
		assert_eq!(m.selected(), Some(2));
		assert_eq!(m.phase(), Phase::NodeSelected);
	}

	#[test]
	fn background_click_clears_hover_and_selection() {
		let mut m = machine();
		m.pointer_move(Vec2::ZERO, || Some(3));
		click(&mut m, 3, 0.0);
		m.pointer_down(Vec2::new(300.0, 300.0), None);
		let events = m.pointer_up(50.0);
		assert_eq!(events, vec![GraphEvent::Hover(None), GraphEvent::Select(None)]);
		assert_eq!(m.hovered(), None);
		assert_eq!(m.selected(), None);
	}

	#[test]
	fn pointer_up_is_idempotent() {
		let mut m = machine();
		assert!(m.pointer_up(0.0).is_empty());
		assert!(m.pointer_up(1.0).is_empty());
		assert_eq!(m.phase(), Phase::Idle);
	}

	#[test]
	fn hover_events_only_on_change() {
		let mut m = machine();
		assert_eq!(m.pointer_move(Vec2::ZERO, || Some(1)), vec![GraphEvent::Hover(Some(1))]);
		assert!(m.pointer_move(Vec2::ZERO, || Some(1)).is_empty());
		assert_eq!(m.pointer_move(Vec2::ZERO, || None), vec![GraphEvent::Hover(None)]);
		assert_eq!(m.phase(), Phase::HoverTracking);
	}

	#[test]
	fn leaving_canvas_ends_drag_and_hover() {
		let mut m = machine();
		m.pointer_move(Vec2::ZERO, || Some(1));
		m.pointer_down(Vec2::new(5.0, 5.0), None);
		let events = m.pointer_leave();
		assert_eq!(events, vec![GraphEvent::Hover(None)]);
		assert_eq!(m.phase(), Phase::Idle);
	}

	#[test]
	fn focus_prefers_hover_over_selection() {
		let mut m = machine();
		click(&mut m, 1, 0.0);
		m.pointer_move(Vec2::ZERO, || Some(5));
		assert_eq!(m.focus(), Some(5));
		m.pointer_move(Vec2::ZERO, || None);
		assert_eq!(m.focus(), Some(1));
	}
}
