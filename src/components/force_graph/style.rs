use super::graph::Graph;
use super::highlight::Highlight;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LabelPlacement {
	#[default]
	Below,
	Centered,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleParams {
	pub background: String,
	pub base_radius: f64,
	pub radius_range: f64,
	/// Radius multiplier for hovered or selected nodes.
	pub emphasis_scale: f64,
	pub glow_scale: f64,
	pub glow_alpha: f64,
	pub dim_alpha: f64,
	pub link_alpha: f64,
	pub link_width: f64,
	/// Below this zoom only emphasised nodes show a label.
	pub label_zoom_threshold: f64,
	pub max_label_width: f64,
	pub font_px: f64,
	pub line_height: f64,
	pub label_placement: LabelPlacement,
}

impl Default for StyleParams {
	fn default() -> Self {
		Self {
			background: "#0f0f14".into(),
			base_radius: 6.0,
			radius_range: 14.0,
			emphasis_scale: 1.25,
			glow_scale: 2.2,
			glow_alpha: 0.35,
			dim_alpha: 0.1,
			link_alpha: 0.25,
			link_width: 1.0,
			label_zoom_threshold: 1.2,
			max_label_width: 120.0,
			font_px: 11.0,
			line_height: 13.0,
			label_placement: LabelPlacement::Below,
		}
	}
}

/// How one node should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeAppearance {
	pub radius: f64,
	pub alpha: f64,
	/// Radius of the halo drawn behind the node, when it has one.
	pub glow: Option<f64>,
	pub show_label: bool,
}

pub fn base_radius(graph: &Graph, idx: usize, style: &StyleParams) -> f64 {
	style.base_radius + graph.normalized_weight(idx) * style.radius_range
}

pub fn node_appearance(
	graph: &Graph,
	idx: usize,
	emphasized: bool,
	highlight: &Highlight,
	zoom: f64,
	style: &StyleParams,
) -> NodeAppearance {
	let radius = base_radius(graph, idx, style);
	let related = highlight.is_related(idx);
	// Hovering elsewhere must not fade out the selected node.
	let alpha = if related || emphasized { 1.0 } else { style.dim_alpha };
	let show_label = emphasized || (zoom >= style.label_zoom_threshold && related);
	if emphasized {
		let radius = radius * style.emphasis_scale;
		NodeAppearance {
			radius,
			alpha,
			glow: Some(radius * style.glow_scale),
			show_label,
		}
	} else {
		NodeAppearance {
			radius,
			alpha,
			glow: None,
			show_label,
		}
	}
}

pub fn link_alpha(highlight: &Highlight, src: usize, tgt: usize, style: &StyleParams) -> f64 {
	if highlight.is_link_related(src, tgt) {
		style.link_alpha
	} else {
		style.link_alpha * style.dim_alpha
	}
}

/// `#rrggbb` to an `rgba()` string with the given alpha.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
	let channel = |range: std::ops::Range<usize>| {
		hex.get(range)
			.and_then(|h| u8::from_str_radix(h, 16).ok())
			.unwrap_or(255)
	};
	let (r, g, b) = (channel(1..3), channel(3..5), channel(5..7));
	format!("rgba({r}, {g}, {b}, {alpha})")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode, Seeding};

	fn graph() -> Graph {
		Graph::build(&GraphData {
			nodes: vec![
				GraphNode::movie("m", "Movie").with_weight(10.0),
				GraphNode::actor("a", "Actor").with_weight(0.0),
				GraphNode::actor("b", "Loner").with_weight(5.0),
			],
			links: vec![GraphLink::new("m", "a")],
			seed: Seeding::Jitter,
		})
	}

	#[test]
	fn radius_follows_normalized_weight() {
		let g = graph();
		let style = StyleParams::default();
		assert_eq!(base_radius(&g, 0, &style), 20.0);
		assert_eq!(base_radius(&g, 1, &style), 6.0);
		assert_eq!(base_radius(&g, 2, &style), 13.0);
	}

	#[test]
	fn unrelated_nodes_dim_while_highlighted() {
		let g = graph();
		let style = StyleParams::default();
		let mut highlight = Highlight::default();
		highlight.update(&g, Some(0));

		let focus = node_appearance(&g, 0, true, &highlight, 1.0, &style);
		assert_eq!(focus.alpha, 1.0);
		assert_eq!(focus.radius, 25.0);
		assert!(focus.glow.is_some_and(|g| (g - 55.0).abs() < 1e-9));
		assert!(focus.show_label);

		let neighbor = node_appearance(&g, 1, false, &highlight, 1.0, &style);
		assert_eq!(neighbor.alpha, 1.0);
		assert!(neighbor.glow.is_none());

		let loner = node_appearance(&g, 2, false, &highlight, 2.0, &style);
		assert_eq!(loner.alpha, 0.1);
		assert!(!loner.show_label);
	}

	#[test]
	fn emphasized_node_stays_opaque_outside_highlight() {
		let g = graph();
		let style = StyleParams::default();
		let mut highlight = Highlight::default();
		// Hover on "m" while "b" stays selected.
		highlight.update(&g, Some(0));

		let selected = node_appearance(&g, 2, true, &highlight, 1.0, &style);
		assert_eq!(selected.alpha, 1.0);
		assert!(selected.glow.is_some());
		assert!(selected.show_label);
	}

	#[test]
	fn labels_hidden_at_low_zoom() {
		let g = graph();
		let style = StyleParams::default();
		let highlight = Highlight::default();
		assert!(!node_appearance(&g, 1, false, &highlight, 1.0, &style).show_label);
		assert!(node_appearance(&g, 1, false, &highlight, 1.5, &style).show_label);
	}

	#[test]
	fn hex_converts_to_rgba() {
		assert_eq!(with_alpha("#e50914", 0.5), "rgba(229, 9, 20, 0.5)");
	}
}
