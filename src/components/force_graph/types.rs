use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// What a vertex stands for. Colour and badge are fixed per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Movie,
	Actor,
	Director,
	/// A person credited both in front of and behind the camera.
	ActorDirector,
}

impl NodeKind {
	pub const ALL: [NodeKind; 4] = [
		NodeKind::Movie,
		NodeKind::Actor,
		NodeKind::Director,
		NodeKind::ActorDirector,
	];

	pub fn color(self) -> &'static str {
		match self {
			NodeKind::Movie => "#e50914",
			NodeKind::Actor => "#3b82f6",
			NodeKind::Director => "#f5c518",
			NodeKind::ActorDirector => "#a855f7",
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			NodeKind::Movie => "Movie",
			NodeKind::Actor => "Actor",
			NodeKind::Director => "Director",
			NodeKind::ActorDirector => "Actor & Director",
		}
	}

	pub fn badge(self) -> &'static str {
		match self {
			NodeKind::Movie => "🎬",
			NodeKind::Actor => "🎭",
			NodeKind::Director => "🎥",
			NodeKind::ActorDirector => "⭐",
		}
	}

	pub fn is_person(self) -> bool {
		!matches!(self, NodeKind::Movie)
	}

	/// Merges two credits of the same person into one kind.
	pub fn merge(self, other: NodeKind) -> NodeKind {
		match (self, other) {
			(a, b) if a == b => a,
			(NodeKind::Movie, _) | (_, NodeKind::Movie) => self,
			_ => NodeKind::ActorDirector,
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	/// Size hint such as an appearance count. Only drives the rendered radius.
	pub weight: f64,
}

impl GraphNode {
	pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind,
			weight: 1.0,
		}
	}

	pub fn movie(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(id, label, NodeKind::Movie)
	}

	#[cfg(test)]
	pub fn actor(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(id, label, NodeKind::Actor)
	}

	pub fn with_weight(mut self, weight: f64) -> Self {
		self.weight = weight;
		self
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

impl GraphLink {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// How initial positions are chosen when a graph is built.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Seeding {
	/// Everything starts at the centre with a tiny deterministic jitter.
	Centered,
	/// The focus node sits at the centre, the rest on per-kind rings.
	Ring { radius: f64 },
	/// Deterministic pseudo-random scatter around the centre.
	#[default]
	Jitter,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
	pub seed: Seeding,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

impl Vec2 {
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length_sq(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	pub fn length(self) -> f64 {
		self.length_sq().sqrt()
	}

	#[cfg(test)]
	pub fn distance(self, other: Vec2) -> f64 {
		(self - other).length()
	}

	#[cfg(test)]
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Vec2 {
	type Output = Vec2;
	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Vec2) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Vec2 {
	type Output = Vec2;
	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl SubAssign for Vec2 {
	fn sub_assign(&mut self, rhs: Vec2) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;
	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}

impl Div<f64> for Vec2 {
	type Output = Vec2;
	fn div(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x / rhs, self.y / rhs)
	}
}
