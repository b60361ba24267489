use std::collections::HashSet;

use log::debug;

use super::model::{Node, Parameters, Workflow};
use super::viewport::Point;

/// Type given to the node synthesized for an empty workflow.
pub const ENTRY_NODE_TYPE: &str = "core.manualTrigger";
/// Name given to the node synthesized for an empty workflow.
pub const ENTRY_NODE_NAME: &str = "Manual Trigger";
/// Type given to nodes that arrive without one.
pub const DEFAULT_NODE_TYPE: &str = "core.noOp";

const DEFAULT_X: f64 = 250.0;
const DEFAULT_Y: f64 = 300.0;
const DEFAULT_STAGGER: f64 = 200.0;

/// Optional behaviour for [`repair_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairOptions {
	/// Drop connections whose source or target does not resolve once node
	/// ids are fixed. Off by default: repair otherwise never removes data.
	pub prune_dangling_connections: bool,
}

/// Repairs a workflow with default options.
pub fn repair(workflow: &Workflow) -> Workflow {
	repair_with(workflow, &RepairOptions::default())
}

/// Produces a structurally valid copy of `workflow`.
///
/// Deterministic and total. Gaps are filled in place: missing ids (or
/// repeated ones) get fresh `node_<n>` ids, missing types, names, positions
/// and parameter bags get defaults, and an empty workflow gets a single entry
/// node. Nodes are never dropped. Connections are left as they are, so a
/// connection naming a duplicated id keeps resolving to the first node that
/// carries it.
pub fn repair_with(workflow: &Workflow, options: &RepairOptions) -> Workflow {
	let mut nodes = workflow.nodes.clone();
	let mut ids = IdAllocator::new(&nodes);

	if nodes.is_empty() {
		let id = ids.fresh();
		debug!("repair: empty workflow, adding entry node {id}");
		nodes.push(Node::new(
			id,
			ENTRY_NODE_TYPE,
			ENTRY_NODE_NAME,
			Point::new(DEFAULT_X, DEFAULT_Y),
		));
	}

	let mut seen = HashSet::with_capacity(nodes.len());
	for (i, node) in nodes.iter_mut().enumerate() {
		if node.id.is_empty() || seen.contains(&node.id) {
			let id = ids.fresh();
			debug!("repair: node {} id {:?} -> {id}", i + 1, node.id);
			node.id = id;
		}
		seen.insert(node.id.clone());

		if node.node_type.is_empty() {
			debug!("repair: node {} gets type {DEFAULT_NODE_TYPE}", i + 1);
			node.node_type = DEFAULT_NODE_TYPE.into();
		}
		if node.name.is_empty() {
			node.name = format!("Node {}", i + 1);
			debug!("repair: node {} named {:?}", i + 1, node.name);
		}
		if !node.position.is_some_and(|p| p.is_finite()) {
			let position = default_position(i);
			debug!("repair: node {} placed at {position:?}", i + 1);
			node.position = Some(position);
		}
		if node.parameters.is_none() {
			node.parameters = Some(Parameters::new());
		}
	}

	let mut connections = workflow.connections.clone();
	if options.prune_dangling_connections {
		let before = connections.len();
		connections.retain(|c| seen.contains(&c.source) && seen.contains(&c.target));
		if connections.len() != before {
			debug!(
				"repair: pruned {} dangling connection(s)",
				before - connections.len()
			);
		}
	}

	Workflow { nodes, connections }
}

/// Staggered placement so defaulted nodes do not sit on top of each other.
pub fn default_position(index: usize) -> Point {
	Point::new(DEFAULT_X + DEFAULT_STAGGER * index as f64, DEFAULT_Y)
}

/// Hands out `node_<n>` ids that collide with nothing already in the
/// workflow nor with anything it handed out before.
struct IdAllocator {
	taken: HashSet<String>,
	next: usize,
}

impl IdAllocator {
	fn new(nodes: &[Node]) -> Self {
		Self {
			taken: nodes.iter().map(|n| n.id.clone()).collect(),
			next: 1,
		}
	}

	fn fresh(&mut self) -> String {
		loop {
			let candidate = format!("node_{}", self.next);
			self.next += 1;
			if self.taken.insert(candidate.clone()) {
				return candidate;
			}
		}
	}
}
