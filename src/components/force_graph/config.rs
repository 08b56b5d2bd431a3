use super::camera::CameraLimits;
use super::interaction::InteractionParams;
use super::layout::{EngineKind, LayoutParams};
use super::style::{LabelPlacement, StyleParams};

/// Everything tunable about a graph view. Override with struct update syntax.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphConfig {
	pub layout: LayoutParams,
	pub engine: EngineKind,
	pub camera: CameraLimits,
	pub style: StyleParams,
	pub interaction: InteractionParams,
	pub fit: FitParams,
}

/// Camera framing applied on single clicks.
#[derive(Clone, Debug, PartialEq)]
pub struct FitParams {
	pub on_click: bool,
	pub padding: f64,
	pub duration_ms: f64,
}

impl Default for FitParams {
	fn default() -> Self {
		Self {
			on_click: true,
			padding: 60.0,
			duration_ms: 400.0,
		}
	}
}

impl GraphConfig {
	/// A movie or person at the centre with its direct credits around it.
	pub fn ego_network() -> Self {
		Self::default()
	}

	/// People linked by shared films. Runs the library-backed layout with
	/// labels drawn on the node.
	pub fn collaboration() -> Self {
		Self {
			engine: EngineKind::Charge,
			style: StyleParams {
				label_placement: LabelPlacement::Centered,
				base_radius: 10.0,
				radius_range: 16.0,
				..StyleParams::default()
			},
			..Self::default()
		}
	}

	/// Movies and people as two partitions; weights feed the repulsion.
	pub fn bipartite() -> Self {
		Self {
			layout: LayoutParams {
				weight_mass: true,
				..LayoutParams::default()
			},
			fit: FitParams {
				on_click: false,
				..FitParams::default()
			},
			..Self::default()
		}
	}
}
