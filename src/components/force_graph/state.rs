use log::{debug, info};

use super::camera::{Bounds, Camera, CanvasMetrics};
use super::config::GraphConfig;
use super::graph::Graph;
use super::highlight::Highlight;
use super::hit::node_at;
use super::interaction::{GraphEvent, Interaction};
use super::layout::{LayoutEngine, engine_for};
use super::types::{GraphData, GraphNode, Vec2};

/// What the host page hears about, with nodes resolved from indices.
#[derive(Clone, Debug, PartialEq)]
pub enum HostNotice {
	Hover(Option<GraphNode>),
	Select(Option<GraphNode>),
	DoubleClick(GraphNode),
}

/// Everything one mounted canvas owns: the built graph, its layout, the
/// camera, and pointer state.
pub struct ForceGraphState {
	graph: Graph,
	engine: Box<dyn LayoutEngine>,
	camera: Camera,
	interaction: Interaction,
	highlight: Highlight,
	config: GraphConfig,
	metrics: CanvasMetrics,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, config: GraphConfig, metrics: CanvasMetrics) -> Self {
		let mut state = Self {
			graph: Graph::default(),
			engine: engine_for(config.engine, &config.layout),
			camera: Camera::new(config.camera.clone()),
			interaction: Interaction::new(config.interaction.clone()),
			highlight: Highlight::default(),
			config,
			metrics,
		};
		state.rebuild(data);
		state
	}

	/// Replaces the graph and restarts the layout from fresh seed positions.
	pub fn rebuild(&mut self, data: &GraphData) {
		self.graph = Graph::build(data);
		let seeds = self.graph.seed_positions(self.metrics.width, self.metrics.height);
		self.engine.reset(&self.graph, seeds);
		self.interaction.reset();
		self.highlight.clear();
		self.camera.reset_view();
		info!(
			"graph built: {} nodes, {} links",
			self.graph.len(),
			self.graph.links().len()
		);
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn positions(&self) -> &[Vec2] {
		self.engine.positions()
	}

	pub fn camera(&self) -> &Camera {
		&self.camera
	}

	#[cfg(test)]
	pub fn interaction(&self) -> &Interaction {
		&self.interaction
	}

	pub fn highlight(&self) -> &Highlight {
		&self.highlight
	}

	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	pub fn metrics(&self) -> &CanvasMetrics {
		&self.metrics
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.graph.node(idx)
	}

	pub fn tick_ms(&self) -> u32 {
		self.config.layout.tick_ms
	}

	/// One layout step. The layout centre is the canvas centre in world space.
	pub fn tick(&mut self) {
		if self.graph.is_empty() {
			return;
		}
		let center = self.metrics.center();
		self.engine.step(&self.graph, center);
	}

	pub fn resize(&mut self, metrics: CanvasMetrics) {
		self.metrics = metrics;
	}

	pub fn is_emphasized(&self, idx: usize) -> bool {
		self.interaction.hovered() == Some(idx) || self.interaction.selected() == Some(idx)
	}

	fn hit(&self, metrics: &CanvasMetrics, client: Vec2) -> Option<usize> {
		let world = self.camera.screen_to_world(metrics, client);
		node_at(self.positions(), world, self.config.interaction.hit_radius)
	}

	pub fn pointer_move(&mut self, metrics: CanvasMetrics, client: Vec2) -> Vec<GraphEvent> {
		self.metrics = metrics;
		let local = metrics.to_local(client);
		let hit = self.hit(&metrics, client);
		let events = self.interaction.pointer_move(local, || hit);
		self.apply(&events, None);
		events
	}

	pub fn pointer_down(&mut self, metrics: CanvasMetrics, client: Vec2) -> Vec<GraphEvent> {
		self.metrics = metrics;
		let local = metrics.to_local(client);
		let hit = self.hit(&metrics, client);
		let events = self.interaction.pointer_down(local, hit);
		self.apply(&events, None);
		events
	}

	pub fn pointer_up(&mut self, now: f64) -> Vec<GraphEvent> {
		let events = self.interaction.pointer_up(now);
		self.apply(&events, Some(now));
		events
	}

	pub fn pointer_leave(&mut self) -> Vec<GraphEvent> {
		let events = self.interaction.pointer_leave();
		self.apply(&events, None);
		events
	}

	/// Wheel zoom anchored at the cursor.
	pub fn wheel(&mut self, metrics: CanvasMetrics, client: Vec2, delta_y: f64) {
		self.metrics = metrics;
		let step = self.camera.limits().wheel_step;
		let factor = if delta_y > 0.0 { 1.0 / step } else { step };
		self.camera.zoom_at(factor, metrics.to_local(client));
	}

	fn apply(&mut self, events: &[GraphEvent], now: Option<f64>) {
		for event in events {
			match *event {
				GraphEvent::Pan(delta) => self.camera.pan(delta),
				GraphEvent::Hover(_) | GraphEvent::Select(_) => {
					self.highlight.update(&self.graph, self.interaction.focus());
				}
				GraphEvent::Click(idx) => {
					if let (true, Some(now)) = (self.config.fit.on_click, now) {
						let fit = self.config.fit.clone();
						self.fit_indices(self.graph.neighborhood(idx), fit.padding, fit.duration_ms, now);
					}
				}
				GraphEvent::DoubleClick(_) => {}
			}
		}
	}

	pub fn zoom_in(&mut self) {
		self.camera.zoom_in(&self.metrics);
	}

	pub fn zoom_out(&mut self) {
		self.camera.zoom_out(&self.metrics);
	}

	pub fn reset_view(&mut self) {
		self.camera.reset_view();
	}

	/// Frames the given nodes. Unknown ids are ignored; returns false when
	/// none of them exist.
	pub fn zoom_to_fit(&mut self, ids: &[String], padding: f64, duration_ms: f64, now: f64) -> bool {
		let indices: Vec<usize> = ids.iter().filter_map(|id| self.graph.index_of(id)).collect();
		self.fit_indices(indices, padding, duration_ms, now)
	}

	fn fit_indices(
		&mut self,
		indices: impl IntoIterator<Item = usize>,
		padding: f64,
		duration_ms: f64,
		now: f64,
	) -> bool {
		let positions = self.engine.positions();
		let points: Vec<Vec2> = indices
			.into_iter()
			.filter_map(|i| positions.get(i).copied())
			.collect();
		let Some(bounds) = Bounds::around(&points) else {
			return false;
		};
		debug!("fitting camera to {} node(s)", points.len());
		self.camera
			.zoom_to_fit(bounds, padding, duration_ms, &self.metrics, now);
		true
	}

	/// Focuses a node as if it had been clicked, e.g. from a search box.
	pub fn select_id(&mut self, id: &str) -> Vec<GraphEvent> {
		let events = self.interaction.select(self.graph.index_of(id));
		self.apply(&events, None);
		events
	}

	pub fn advance_camera(&mut self, now: f64) {
		self.camera.advance(now);
	}

	pub fn notices(&self, events: &[GraphEvent]) -> Vec<HostNotice> {
		let resolve = |idx: Option<usize>| idx.and_then(|i| self.graph.node(i)).cloned();
		events
			.iter()
			.filter_map(|event| match *event {
				GraphEvent::Hover(idx) => Some(HostNotice::Hover(resolve(idx))),
				GraphEvent::Select(idx) => Some(HostNotice::Select(resolve(idx))),
				GraphEvent::DoubleClick(idx) => resolve(Some(idx)).map(HostNotice::DoubleClick),
				GraphEvent::Click(_) | GraphEvent::Pan(_) => None,
			})
			.collect()
	}

	pub fn cursor(&self) -> &'static str {
		if self.interaction.is_dragging() {
			"grabbing"
		} else if self.interaction.hovered().is_some() {
			"pointer"
		} else {
			"grab"
		}
	}
}
