use leptos::prelude::*;
use log::error;

use crate::components::workflow_canvas::WorkflowCanvas;
use crate::workflow::{self, ImportMode, Node, Point, Workflow};

/// Lead-capture automation used as the demo document. The last node has no
/// id and position, and one connection points at a node that does not exist,
/// so the validation panel has something to show.
const SAMPLE_WORKFLOW: &str = r#"{
	"nodes": [
		{ "id": "trigger", "type": "core.webhookTrigger", "name": "New lead", "position": [0, 0], "parameters": {} },
		{ "id": "enrich", "type": "core.httpRequest", "name": "Enrich contact", "position": [260, -80], "parameters": { "method": "GET" } },
		{ "id": "score", "type": "core.code", "name": "Score lead", "position": [260, 100] },
		{ "id": "route", "type": "core.if", "name": "Hot lead?", "position": [520, 0] },
		{ "id": "draft", "type": "ai.openAi", "name": "Draft follow-up message", "position": [780, -80] },
		{ "id": "notify", "type": "social.whatsApp", "name": "Notify sales", "position": [1040, -80] },
		{ "type": "core.set", "name": "Tag as cold" }
	],
	"connections": {
		"trigger": { "main": [ [ { "node": "enrich", "type": "main", "index": 0 }, { "node": "score", "type": "main", "index": 0 } ] ] },
		"enrich": { "main": [ [ { "node": "route", "type": "main", "index": 0 } ] ] },
		"score": { "main": [ [ { "node": "route", "type": "main", "index": 1 } ] ] },
		"route": { "main": [ [ { "node": "draft", "type": "main", "index": 0 } ], [ { "node": "archive", "type": "main", "index": 0 } ] ] },
		"draft": { "main": [ [ { "node": "notify", "type": "main", "index": 0 } ] ] }
	}
}"#;

fn load_sample() -> (Workflow, Vec<String>) {
	let problems = match Workflow::from_json(SAMPLE_WORKFLOW) {
		Ok(raw) => workflow::validate(&raw).errors,
		Err(e) => vec![e.to_string()],
	};
	let repaired = workflow::import(SAMPLE_WORKFLOW, ImportMode::Repair).unwrap_or_else(|e| {
		error!("sample workflow failed to load: {e}");
		Workflow::default()
	});
	(repaired, problems)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (initial, problems) = load_sample();
	let graph = RwSignal::new(initial);
	let zoom = RwSignal::new(1.0);
	let pan = RwSignal::new(Point::new(-500.0, 0.0));
	let selected = RwSignal::new(None::<Node>);
	let last_click = RwSignal::new(None::<(f64, f64)>);

	let on_node_click = Callback::new(move |node: Node| selected.set(Some(node)));
	let on_canvas_click = Callback::new(move |at: (f64, f64)| {
		selected.set(None);
		last_click.set(Some(at));
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<WorkflowCanvas
					workflow=graph
					zoom=zoom
					pan=pan
					on_node_click=on_node_click
					on_canvas_click=on_canvas_click
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"Workflow Editor"</h1>
					<p class="subtitle">"Click a node to inspect it. Scroll to zoom. Drag to pan."</p>
					<p>
						{move || match selected.get() {
							Some(node) => format!("{} ({})", node.name, node.node_type),
							None => match last_click.get() {
								Some((x, y)) => format!("Canvas at ({x:.0}, {y:.0})"),
								None => String::new(),
							},
						}}
					</p>
					{(!problems.is_empty())
						.then(|| {
							view! {
								<p>"Found on import:"</p>
								<ul>
									{problems
										.iter()
										.map(|p| view! { <li>{p.clone()}</li> })
										.collect_view()}
								</ul>
							}
						})}
				</div>
			</div>
		</ErrorBoundary>
	}
}
