use leptos::prelude::*;

use crate::components::force_graph::{
	ForceGraphCanvas, GraphConfig, GraphController, GraphData, GraphNode, NodeKind,
};

const FIT_PADDING: f64 = 40.0;
const FIT_DURATION_MS: f64 = 500.0;

/// Canvas plus the zoom buttons and legend every graph page shows.
#[component]
pub fn GraphPanel(
	#[prop(into)] data: Signal<GraphData>,
	config: GraphConfig,
	on_node_select: Callback<Option<GraphNode>>,
	on_node_double_click: Callback<GraphNode>,
) -> impl IntoView {
	let controller = GraphController::new();
	let (zoom_in, zoom_out, reset) = (controller.clone(), controller.clone(), controller.clone());
	let (search, fit_all) = (controller.clone(), controller.clone());
	let on_search = move |ev: leptos::ev::Event| {
		let query = event_target_value(&ev);
		let Some(id) = data.with_untracked(|d| find_by_label(d, &query)) else {
			return;
		};
		if let Some(node) = search.focus(&id) {
			on_node_select.run(Some(node));
		}
	};

	view! {
		<div class="graph-panel">
			<ForceGraphCanvas
				data=data
				config=config
				fullscreen=true
				controller=controller
				on_node_select=on_node_select
				on_node_double_click=on_node_double_click
			/>
			<div class="graph-controls">
				<input type="search" placeholder="Find…" on:change=on_search />
				<button title="Zoom in" on:click=move |_| zoom_in.zoom_in()>"+"</button>
				<button title="Zoom out" on:click=move |_| zoom_out.zoom_out()>"−"</button>
				<button
					title="Fit all"
					on:click=move |_| {
						let ids: Vec<String> = data
							.with_untracked(|d| d.nodes.iter().map(|n| n.id.clone()).collect());
						fit_all.zoom_to_fit(&ids, FIT_PADDING, FIT_DURATION_MS);
					}
				>
					"⤢"
				</button>
				<button title="Reset view" on:click=move |_| reset.reset_view()>"⟲"</button>
			</div>
			<Legend />
		</div>
	}
}

/// Id of the first node whose label contains `query`, ignoring case.
fn find_by_label(data: &GraphData, query: &str) -> Option<String> {
	let query = query.trim().to_lowercase();
	if query.is_empty() {
		return None;
	}
	data.nodes
		.iter()
		.find(|n| n.label.to_lowercase().contains(&query))
		.map(|n| n.id.clone())
}

#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<ul class="graph-legend">
			{NodeKind::ALL
				.iter()
				.map(|kind| {
					view! {
						<li>
							<span
								class="swatch"
								style=format!("background: {};", kind.color())
							></span>
							{format!("{} {}", kind.badge(), kind.name())}
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}

#[component]
pub fn NodeDetails(#[prop(into)] node: Signal<Option<GraphNode>>) -> impl IntoView {
	move || {
		node.get().map(|n| {
			view! {
				<aside class="node-details">
					<h2>{format!("{} {}", n.kind.badge(), n.label)}</h2>
					<p class="kind">{n.kind.name()}</p>
					<p>{format!("Weight: {}", n.weight)}</p>
					<p class="hint">
						{if n.kind.is_person() {
							"Double-click to open their filmography."
						} else {
							"Double-click to centre the graph on this film."
						}}
					</p>
				</aside>
			}
		})
	}
}
