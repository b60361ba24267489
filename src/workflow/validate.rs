use super::model::Workflow;

/// Outcome of [`validate`]. Errors keep the order they were found in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
	pub errors: Vec<String>,
}

impl ValidationReport {
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}
}

/// Checks a workflow for structural defects.
///
/// Every node is checked for an id, a type and a name (in that order, node by
/// node), then every connection for a resolvable source and target. All
/// defects are collected; nothing short-circuits.
pub fn validate(workflow: &Workflow) -> ValidationReport {
	let mut errors = Vec::new();

	for (i, node) in workflow.nodes.iter().enumerate() {
		let n = i + 1;
		if node.id.is_empty() {
			errors.push(format!("Node {n}: missing id"));
		}
		if node.node_type.is_empty() {
			errors.push(format!("Node {n}: missing type"));
		}
		if node.name.is_empty() {
			errors.push(format!("Node {n}: missing name"));
		}
	}

	let ids = workflow.node_ids();
	for c in &workflow.connections {
		if !ids.contains(c.source.as_str()) {
			errors.push(format!(
				"Invalid connection: source node '{}' not found",
				c.source
			));
		}
		if !ids.contains(c.target.as_str()) {
			errors.push(format!(
				"Invalid connection: target node '{}' not found",
				c.target
			));
		}
	}

	ValidationReport { errors }
}
