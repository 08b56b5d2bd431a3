//! Force-directed movie / person graph drawn on a 2D canvas.

mod camera;
mod clock;
mod component;
mod config;
mod controller;
mod error;
mod graph;
mod highlight;
mod hit;
mod interaction;
mod label;
mod layout;
mod render;
mod state;
mod style;
mod types;

pub use component::ForceGraphCanvas;
pub use config::GraphConfig;
pub use controller::GraphController;
#[cfg(test)]
pub use graph::Graph;
pub use types::{GraphData, GraphLink, GraphNode, NodeKind, Seeding};
