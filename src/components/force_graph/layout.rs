//! Force layouts that move nodes toward a readable arrangement.
//!
//! [`SpringLayout`] is the hand-rolled integrator used by the movie and person
//! views. [`ChargeLayout`] runs the `force_graph` crate's simulation for the
//! collaboration network. Both publish a complete position buffer per step.

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::graph::Graph;
use super::types::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Pairs at or beyond this distance do not repel.
	pub repulsion_radius: f64,
	pub repulsion: f64,
	pub rest_length: f64,
	pub attraction: f64,
	pub centering: f64,
	pub damping: f64,
	/// Upper bound on how far a node may travel in one tick. Without it seeds
	/// that start almost coincident are flung past ten canvas sizes before
	/// damping catches up.
	pub max_speed: f64,
	pub min_distance: f64,
	/// Scale the repulsion a node exerts by its normalised weight.
	pub weight_mass: bool,
	pub tick_ms: u32,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			repulsion_radius: 130.0,
			repulsion: 2600.0,
			rest_length: 120.0,
			attraction: 0.03,
			centering: 0.004,
			damping: 0.9,
			max_speed: 40.0,
			min_distance: 1.0,
			weight_mass: false,
			tick_ms: 30,
		}
	}
}

/// Which integrator drives a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineKind {
	#[default]
	Spring,
	Charge,
}

pub trait LayoutEngine {
	/// Discards all motion and starts over from `positions`.
	fn reset(&mut self, graph: &Graph, positions: Vec<Vec2>);
	/// Advances one tick and publishes the new positions.
	fn step(&mut self, graph: &Graph, center: Vec2);
	fn positions(&self) -> &[Vec2];
}

pub fn engine_for(kind: EngineKind, params: &LayoutParams) -> Box<dyn LayoutEngine> {
	match kind {
		EngineKind::Spring => Box::new(SpringLayout::new(params.clone())),
		EngineKind::Charge => Box::new(ChargeLayout::new(params.clone())),
	}
}

/// Pairwise repulsion with a distance cutoff, springs along links, a weak pull
/// to the centre, and damped velocity integration.
pub struct SpringLayout {
	params: LayoutParams,
	positions: Vec<Vec2>,
	velocities: Vec<Vec2>,
	scratch: Vec<Vec2>,
}

impl SpringLayout {
	pub fn new(params: LayoutParams) -> Self {
		Self {
			params,
			positions: Vec::new(),
			velocities: Vec::new(),
			scratch: Vec::new(),
		}
	}

	#[cfg(test)]
	fn velocities(&self) -> &[Vec2] {
		&self.velocities
	}

	fn force_on(&self, graph: &Graph, i: usize, center: Vec2) -> Vec2 {
		let p = &self.params;
		let here = self.positions[i];
		let mut force = Vec2::ZERO;

		for (j, &there) in self.positions.iter().enumerate() {
			if j == i {
				continue;
			}
			let delta = here - there;
			let raw = delta.length();
			if raw >= p.repulsion_radius {
				continue;
			}
			let d = raw.max(p.min_distance);
			let dir = if raw > f64::EPSILON {
				delta / raw
			} else {
				separation_direction(i, j)
			};
			let mut strength = p.repulsion / (d * d);
			if p.weight_mass {
				strength *= 0.5 + graph.normalized_weight(j);
			}
			force += dir * strength;
		}

		for &j in graph.neighbors(i) {
			let delta = self.positions[j] - here;
			let d = delta.length();
			if d <= f64::EPSILON {
				continue;
			}
			force += delta / d * ((d - p.rest_length) * p.attraction);
		}

		force + (center - here) * p.centering
	}
}

impl LayoutEngine for SpringLayout {
	fn reset(&mut self, _graph: &Graph, positions: Vec<Vec2>) {
		self.velocities = vec![Vec2::ZERO; positions.len()];
		self.scratch = Vec::with_capacity(positions.len());
		self.positions = positions;
	}

	fn step(&mut self, graph: &Graph, center: Vec2) {
		if self.positions.len() != graph.len() {
			return;
		}
		let mut next = std::mem::take(&mut self.scratch);
		next.clear();
		for i in 0..self.positions.len() {
			let force = self.force_on(graph, i, center);
			let mut v = (self.velocities[i] + force) * self.params.damping;
			let speed = v.length();
			if speed > self.params.max_speed {
				v = v * (self.params.max_speed / speed);
			}
			self.velocities[i] = v;
			next.push(self.positions[i] + v);
		}
		self.scratch = std::mem::replace(&mut self.positions, next);
	}

	fn positions(&self) -> &[Vec2] {
		&self.positions
	}
}

/// Deterministic unit vector used to split nodes sharing one position.
fn separation_direction(i: usize, j: usize) -> Vec2 {
	let (lo, hi) = (i.min(j) as f64, i.max(j) as f64);
	let angle = (lo * 0.618_034 + hi * 0.414_214) * std::f64::consts::TAU;
	let dir = Vec2::new(angle.cos(), angle.sin());
	if i < j { dir * -1.0 } else { dir }
}

/// Library-backed layout: Coulomb charge and springs from `force_graph`.
pub struct ChargeLayout {
	params: LayoutParams,
	sim: ForceGraph<usize, ()>,
	positions: Vec<Vec2>,
}

impl ChargeLayout {
	pub fn new(params: LayoutParams) -> Self {
		Self {
			sim: ForceGraph::new(Self::simulation_parameters()),
			params,
			positions: Vec::new(),
		}
	}

	fn simulation_parameters() -> SimulationParameters {
		SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl LayoutEngine for ChargeLayout {
	fn reset(&mut self, graph: &Graph, positions: Vec<Vec2>) {
		let mut sim = ForceGraph::new(Self::simulation_parameters());
		let handles: Vec<DefaultNodeIdx> = positions
			.iter()
			.enumerate()
			.map(|(i, pos)| {
				sim.add_node(NodeData {
					x: pos.x as f32,
					y: pos.y as f32,
					mass: 10.0,
					is_anchor: false,
					user_data: i,
				})
			})
			.collect();
		for &(src, tgt) in graph.links() {
			if let (Some(&a), Some(&b)) = (handles.get(src), handles.get(tgt)) {
				sim.add_edge(a, b, EdgeData::default());
			}
		}
		self.sim = sim;
		self.positions = positions;
	}

	fn step(&mut self, graph: &Graph, center: Vec2) {
		if self.positions.len() != graph.len() || self.positions.is_empty() {
			return;
		}
		self.sim.update(self.params.tick_ms as f32 / 1000.0);

		let pull = self.params.centering as f32;
		let (cx, cy) = (center.x as f32, center.y as f32);
		self.sim.visit_nodes_mut(|node| {
			node.data.x += (cx - node.data.x) * pull;
			node.data.y += (cy - node.data.y) * pull;
		});

		let mut next = vec![Vec2::ZERO; self.positions.len()];
		self.sim.visit_nodes(|node| {
			if let Some(slot) = next.get_mut(node.data.user_data) {
				*slot = Vec2::new(node.x() as f64, node.y() as f64);
			}
		});
		self.positions = next;
	}

	fn positions(&self) -> &[Vec2] {
		&self.positions
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode, Seeding};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn chain_graph(n: usize, seed: Seeding) -> Graph {
		let nodes = (0..n)
			.map(|i| GraphNode::actor(i.to_string(), format!("n{i}")))
			.collect();
		let mut links = Vec::new();
		for i in 0..n {
			links.push(GraphLink::new(i.to_string(), ((i + 1) % n).to_string()));
			links.push(GraphLink::new(i.to_string(), ((i + 7) % n).to_string()));
		}
		Graph::build(&GraphData { nodes, links, seed })
	}

	fn run(engine: &mut dyn LayoutEngine, graph: &Graph, ticks: usize) {
		let center = Vec2::new(W / 2.0, H / 2.0);
		engine.reset(graph, graph.seed_positions(W, H));
		for _ in 0..ticks {
			engine.step(graph, center);
		}
	}

	#[test]
	fn positions_stay_bounded_over_many_ticks() {
		for seed in [Seeding::Jitter, Seeding::Centered, Seeding::Ring { radius: 150.0 }] {
			let graph = chain_graph(50, seed);
			let mut layout = SpringLayout::new(LayoutParams::default());
			run(&mut layout, &graph, 500);
			for p in layout.positions() {
				assert!(p.is_finite());
				assert!(p.x.abs() <= 10.0 * W && p.y.abs() <= 10.0 * H, "{p:?} escaped");
			}
		}
	}

	#[test]
	fn centered_burst_respects_speed_limit() {
		let graph = chain_graph(50, Seeding::Centered);
		let params = LayoutParams::default();
		let limit = params.max_speed;
		let center = Vec2::new(W / 2.0, H / 2.0);
		let mut layout = SpringLayout::new(params);
		layout.reset(&graph, graph.seed_positions(W, H));
		for _ in 0..20 {
			let before = layout.positions().to_vec();
			layout.step(&graph, center);
			for (v, (a, b)) in layout
				.velocities()
				.iter()
				.zip(before.iter().zip(layout.positions()))
			{
				assert!(v.length() <= limit + 1e-9);
				assert!((*b - *a).length() <= limit + 1e-9);
			}
		}
	}

	#[test]
	fn single_node_settles_at_center() {
		let graph = Graph::build(&GraphData {
			nodes: vec![GraphNode::movie("m", "Solo")],
			links: vec![],
			seed: Seeding::Jitter,
		});
		let center = Vec2::new(W / 2.0, H / 2.0);
		let mut layout = SpringLayout::new(LayoutParams::default());
		layout.reset(&graph, vec![Vec2::new(100.0, 100.0)]);

		let mut settled_at = None;
		for tick in 0..1000 {
			let before = layout.positions()[0];
			layout.step(&graph, center);
			if layout.positions()[0].distance(before) < 1e-4 && before.distance(center) < 0.1 {
				settled_at = Some(tick);
				break;
			}
		}
		assert!(settled_at.is_some(), "never settled");
		assert!(layout.positions()[0].distance(center) < 0.1);
	}

	#[test]
	fn linked_pair_rests_near_rest_length() {
		let graph = Graph::build(&GraphData {
			nodes: vec![GraphNode::movie("a", "A"), GraphNode::actor("b", "B")],
			links: vec![GraphLink::new("a", "b")],
			seed: Seeding::Jitter,
		});
		let mut layout = SpringLayout::new(LayoutParams::default());
		layout.reset(&graph, vec![Vec2::new(100.0, 300.0), Vec2::new(700.0, 300.0)]);
		let center = Vec2::new(W / 2.0, H / 2.0);
		for _ in 0..800 {
			layout.step(&graph, center);
		}
		let d = layout.positions()[0].distance(layout.positions()[1]);
		assert!(d > 60.0 && d < 160.0, "distance {d}");
	}

	#[test]
	fn coincident_nodes_are_pushed_apart() {
		let graph = Graph::build(&GraphData {
			nodes: vec![GraphNode::actor("a", "A"), GraphNode::actor("b", "B")],
			links: vec![],
			seed: Seeding::Jitter,
		});
		let spot = Vec2::new(400.0, 300.0);
		let mut layout = SpringLayout::new(LayoutParams::default());
		layout.reset(&graph, vec![spot, spot]);
		layout.step(&graph, spot);
		let p = layout.positions();
		assert!(p[0].is_finite() && p[1].is_finite());
		assert!(p[0].distance(p[1]) > 1.0);
	}

	#[test]
	fn step_reads_previous_snapshot_only() {
		// Mirror-symmetric input must give mirror-symmetric output.
		let graph = Graph::build(&GraphData {
			nodes: vec![GraphNode::actor("a", "A"), GraphNode::actor("b", "B")],
			links: vec![GraphLink::new("a", "b")],
			seed: Seeding::Jitter,
		});
		let center = Vec2::new(400.0, 300.0);
		let mut layout = SpringLayout::new(LayoutParams::default());
		layout.reset(&graph, vec![Vec2::new(350.0, 300.0), Vec2::new(450.0, 300.0)]);
		layout.step(&graph, center);
		let p = layout.positions();
		assert!(((p[0].x - center.x) + (p[1].x - center.x)).abs() < 1e-9);
	}

	#[test]
	fn reset_discards_velocity() {
		let graph = chain_graph(5, Seeding::Jitter);
		let mut layout = SpringLayout::new(LayoutParams::default());
		run(&mut layout, &graph, 10);
		layout.reset(&graph, graph.seed_positions(W, H));
		assert!(layout.velocities().iter().all(|v| *v == Vec2::ZERO));
	}

	#[test]
	fn charge_layout_tracks_every_node() {
		let graph = chain_graph(12, Seeding::Jitter);
		let mut layout = ChargeLayout::new(LayoutParams::default());
		run(&mut layout, &graph, 100);
		assert_eq!(layout.positions().len(), 12);
		assert!(layout.positions().iter().all(|p| p.is_finite()));
	}
}
