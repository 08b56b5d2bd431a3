use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use log::debug;

use super::types::{GraphData, GraphNode, NodeKind, Seeding, Vec2};

/// An indexed, validated copy of [`GraphData`].
///
/// Links are stored as index pairs and only survive the build when both ends
/// are present in the node set.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<GraphNode>,
	index: HashMap<String, usize>,
	links: Vec<(usize, usize)>,
	adjacency: Vec<Vec<usize>>,
	weight_range: (f64, f64),
	seed: Seeding,
}

impl Graph {
	pub fn build(data: &GraphData) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if index.contains_key(&node.id) {
				continue;
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(node.clone());
		}

		let mut adjacency = vec![Vec::new(); nodes.len()];
		let mut links = Vec::with_capacity(data.links.len());
		let mut dropped = 0usize;
		for link in &data.links {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&src), Some(&tgt)) if src != tgt => {
					links.push((src, tgt));
					adjacency[src].push(tgt);
					adjacency[tgt].push(src);
				}
				_ => dropped += 1,
			}
		}
		if dropped > 0 {
			debug!("dropped {dropped} link(s) with a missing endpoint");
		}

		let weight_range = nodes.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), n| {
			(lo.min(n.weight), hi.max(n.weight))
		});

		Self {
			nodes,
			index,
			links,
			adjacency,
			weight_range,
			seed: data.seed,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	pub fn neighbors(&self, idx: usize) -> &[usize] {
		self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The node itself plus everything one hop away.
	pub fn neighborhood(&self, idx: usize) -> HashSet<usize> {
		let mut set = HashSet::new();
		if idx >= self.nodes.len() {
			return set;
		}
		set.insert(idx);
		for &(src, tgt) in &self.links {
			if src == idx {
				set.insert(tgt);
			} else if tgt == idx {
				set.insert(src);
			}
		}
		set
	}

	/// Weight mapped into `[0, 1]`, or 0.5 when every weight is equal.
	pub fn normalized_weight(&self, idx: usize) -> f64 {
		let (lo, hi) = self.weight_range;
		let Some(node) = self.nodes.get(idx) else {
			return 0.5;
		};
		if !(hi - lo).is_finite() || hi - lo <= f64::EPSILON {
			return 0.5;
		}
		((node.weight - lo) / (hi - lo)).clamp(0.0, 1.0)
	}

	/// Initial positions for a canvas of the given size.
	pub fn seed_positions(&self, width: f64, height: f64) -> Vec<Vec2> {
		let center = Vec2::new(width / 2.0, height / 2.0);
		let mut rng = Lcg::new(self.nodes.len() as u64);
		match self.seed {
			Seeding::Centered => (0..self.nodes.len())
				.map(|_| center + Vec2::new(rng.signed() * 2.0, rng.signed() * 2.0))
				.collect(),
			Seeding::Jitter => {
				let spread = width.min(height) * 0.35;
				(0..self.nodes.len())
					.map(|_| center + Vec2::new(rng.signed() * spread, rng.signed() * spread))
					.collect()
			}
			Seeding::Ring { radius } => self.ring_positions(center, radius),
		}
	}

	fn ring_positions(&self, center: Vec2, radius: f64) -> Vec<Vec2> {
		let mut positions = vec![center; self.nodes.len()];
		// The first node is the focus of the view and stays at the centre.
		let mut rings: HashMap<NodeKind, Vec<usize>> = HashMap::new();
		for idx in 1..self.nodes.len() {
			rings.entry(self.nodes[idx].kind).or_default().push(idx);
		}
		for (kind, members) in rings {
			let ring = radius * ring_scale(kind);
			let phase = ring_phase(kind);
			let count = members.len() as f64;
			for (i, idx) in members.into_iter().enumerate() {
				let angle = phase + (i as f64) * TAU / count;
				positions[idx] = center + Vec2::new(ring * angle.cos(), ring * angle.sin());
			}
		}
		positions
	}
}

fn ring_scale(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Movie => 1.0,
		NodeKind::Actor => 1.4,
		NodeKind::Director => 0.7,
		NodeKind::ActorDirector => 0.85,
	}
}

fn ring_phase(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Movie => 0.0,
		NodeKind::Actor => TAU / 12.0,
		NodeKind::Director => TAU / 4.0,
		NodeKind::ActorDirector => TAU / 8.0,
	}
}

/// Small deterministic generator so seeded layouts are reproducible.
struct Lcg(u64);

impl Lcg {
	fn new(seed: u64) -> Self {
		Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
	}

	fn unit(&mut self) -> f64 {
		self.0 = self
			.0
			.wrapping_mul(6364136223846793005)
			.wrapping_add(1442695040888963407);
		((self.0 >> 11) as f64) / ((1u64 << 53) as f64)
	}

	/// Uniform in `[-1, 1)`.
	fn signed(&mut self) -> f64 {
		self.unit() * 2.0 - 1.0
	}
}
