use std::collections::HashSet;

use super::graph::Graph;

/// One-hop neighbourhood of the focused node, recomputed only when the focus
/// changes.
#[derive(Clone, Debug, Default)]
pub struct Highlight {
	focus: Option<usize>,
	related: HashSet<usize>,
}

impl Highlight {
	/// Returns true when the neighbourhood had to be rebuilt.
	pub fn update(&mut self, graph: &Graph, focus: Option<usize>) -> bool {
		if self.focus == focus {
			return false;
		}
		self.focus = focus;
		self.related = focus.map(|idx| graph.neighborhood(idx)).unwrap_or_default();
		true
	}

	pub fn clear(&mut self) {
		self.focus = None;
		self.related.clear();
	}

	pub fn is_active(&self) -> bool {
		self.focus.is_some()
	}

	#[cfg(test)]
	pub fn related(&self) -> &HashSet<usize> {
		&self.related
	}

	/// Always true while nothing is highlighted.
	pub fn is_related(&self, idx: usize) -> bool {
		!self.is_active() || self.related.contains(&idx)
	}

	pub fn is_link_related(&self, src: usize, tgt: usize) -> bool {
		match self.focus {
			None => true,
			Some(f) => src == f || tgt == f,
		}
	}
}
