use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use log::info;

use super::catalog::{is_movie, movie, movie_graph, person_graph, person_name};
use super::panel::{GraphPanel, NodeDetails};
use crate::components::force_graph::{GraphConfig, GraphData, GraphNode};

const DEFAULT_MOVIE: &str = "parasite";

#[derive(Clone, Debug, PartialEq)]
enum Focus {
	Movie(String),
	Person(String),
}

impl Focus {
	fn from_id(id: String) -> Self {
		if is_movie(&id) {
			Focus::Movie(id)
		} else {
			Focus::Person(id)
		}
	}

	fn graph(&self) -> GraphData {
		match self {
			Focus::Movie(id) => movie_graph(id),
			Focus::Person(id) => person_graph(id),
		}
	}

	fn title(&self) -> String {
		match self {
			Focus::Movie(id) => movie(id)
				.map(|m| format!("{} ({})", m.title, m.year))
				.unwrap_or_else(|| "Unknown movie".into()),
			Focus::Person(id) => format!("Filmography of {}", person_name(id)),
		}
	}
}

/// Ego network of one movie or person. Double-clicking a node re-centres the
/// graph on it.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let initial = query.with_untracked(|q| {
		q.get("person")
			.or_else(|| q.get("movie"))
			.map(Focus::from_id)
			.unwrap_or_else(|| Focus::Movie(DEFAULT_MOVIE.into()))
	});

	// A filmography is strictly person-to-film, so it gets the bipartite look.
	let config = match initial {
		Focus::Person(_) => GraphConfig::bipartite(),
		Focus::Movie(_) => GraphConfig::ego_network(),
	};
	let (focus, set_focus) = signal(initial);
	let (selected, set_selected) = signal(None::<GraphNode>);
	let graph_data = Signal::derive(move || focus.with(Focus::graph));

	let on_select = Callback::new(move |node: Option<GraphNode>| set_selected.set(node));
	let on_double_click = Callback::new(move |node: GraphNode| {
		info!("opening {}", node.label);
		set_selected.set(None);
		set_focus.set(Focus::from_id(node.id));
	});

	view! {
		<div class="fullscreen-graph">
			<GraphPanel
				data=graph_data
				config=config
				on_node_select=on_select
				on_node_double_click=on_double_click
			/>
			<div class="graph-overlay">
				<h1>{move || focus.with(Focus::title)}</h1>
				<p class="subtitle">
					"Click a node to focus it. Double-click to open it. Drag the background to pan, scroll to zoom."
				</p>
				<A href="/network">"Collaboration network →"</A>
			</div>
			<NodeDetails node=selected />
		</div>
	}
}
