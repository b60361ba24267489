use crate::workflow::{Node, Point, Viewport, Workflow};

/// What a click landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickTarget<'a> {
	/// The first node, in list order, whose box contains the click.
	Node(&'a Node),
	/// Empty canvas; carries the click in graph coordinates.
	Canvas(Point),
}

/// Resolves a screen-space click against the node boxes the renderer draws.
///
/// Culling plays no part here: a node that was skipped while drawing is
/// still hit if the click falls inside its box.
pub fn resolve_click<'a>(
	point: Point,
	workflow: &'a Workflow,
	viewport: &Viewport,
) -> ClickTarget<'a> {
	workflow
		.nodes
		.iter()
		.find(|node| {
			node.position
				.is_some_and(|p| viewport.node_rect(p).contains(point))
		})
		.map_or_else(
			|| ClickTarget::Canvas(viewport.to_graph(point)),
			ClickTarget::Node,
		)
}

/// Resolves a click and hands the result to the matching observer.
pub fn dispatch_click(
	point: Point,
	workflow: &Workflow,
	viewport: &Viewport,
	on_node: impl FnOnce(&Node),
	on_canvas: impl FnOnce(Point),
) {
	match resolve_click(point, workflow, viewport) {
		ClickTarget::Node(node) => on_node(node),
		ClickTarget::Canvas(p) => on_canvas(p),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::workflow::Size;

	fn viewport() -> Viewport {
		Viewport::new(2.0, Point::new(-50.0, 10.0), Size::new(640.0, 480.0)).unwrap()
	}

	#[test]
	fn test_first_node_wins_on_overlap() {
		let wf = Workflow::new(
			vec![
				Node::new("under", "core.set", "A", Point::new(0.0, 0.0)),
				Node::new("over", "core.set", "B", Point::new(10.0, 10.0)),
			],
			vec![],
		);
		let v = viewport();
		let p = v.node_rect(Point::new(10.0, 10.0)).center();
		match resolve_click(p, &wf, &v) {
			ClickTarget::Node(n) => assert_eq!(n.id, "under"),
			other => panic!("expected node hit, got {other:?}"),
		}
	}

	#[test]
	fn test_empty_canvas_returns_graph_point() {
		let wf = Workflow::new(
			vec![Node::new("a", "core.set", "A", Point::new(0.0, 0.0))],
			vec![],
		);
		let v = viewport();
		let graph = Point::new(-400.0, -400.0);
		match resolve_click(v.to_screen(graph), &wf, &v) {
			ClickTarget::Canvas(p) => {
				assert!((p.x - graph.x).abs() < 1e-9 && (p.y - graph.y).abs() < 1e-9);
			}
			other => panic!("expected canvas hit, got {other:?}"),
		}
	}

	#[test]
	fn test_nodes_without_position_are_not_hit() {
		let mut node = Node::new("a", "core.set", "A", Point::default());
		node.position = None;
		let wf = Workflow::new(vec![node], vec![]);
		let v = Viewport::default();
		assert!(matches!(
			resolve_click(v.to_screen(Point::default()), &wf, &v),
			ClickTarget::Canvas(_)
		));
	}

	#[test]
	fn test_dispatch_calls_one_observer() {
		let wf = Workflow::new(
			vec![Node::new("a", "core.set", "A", Point::new(0.0, 0.0))],
			vec![],
		);
		let v = Viewport::default();
		let mut hit = None;
		let mut missed = false;
		dispatch_click(
			v.node_rect(Point::new(0.0, 0.0)).center(),
			&wf,
			&v,
			|n| hit = Some(n.id.clone()),
			|_| missed = true,
		);
		assert_eq!(hit.as_deref(), Some("a"));
		assert!(!missed);
	}
}
