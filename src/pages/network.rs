use leptos::prelude::*;
use leptos_router::components::{A, Redirect};

use super::catalog::collaboration_graph;
use super::panel::{GraphPanel, NodeDetails};
use crate::components::force_graph::{GraphConfig, GraphNode};

/// Everyone in the catalogue, linked by shared films. Double-clicking a person
/// opens their filmography.
#[component]
pub fn Network() -> impl IntoView {
	let graph_data = Signal::derive(collaboration_graph);
	let (selected, set_selected) = signal(None::<GraphNode>);
	let (opening, set_opening) = signal(None::<String>);

	let on_select = Callback::new(move |node: Option<GraphNode>| set_selected.set(node));
	let on_double_click = Callback::new(move |node: GraphNode| set_opening.set(Some(node.id)));

	view! {
		<div class="fullscreen-graph">
			<GraphPanel
				data=graph_data
				config=GraphConfig::collaboration()
				on_node_select=on_select
				on_node_double_click=on_double_click
			/>
			<div class="graph-overlay">
				<h1>"Collaboration network"</h1>
				<p class="subtitle">"People are linked when they worked on the same film."</p>
				<A href="/">"← Back to movies"</A>
			</div>
			<NodeDetails node=selected />
			{move || opening.get().map(|id| view! { <Redirect path=format!("/?person={id}") /> })}
		</div>
	}
}
