use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::Result;
use super::viewport::Point;
use super::wire;

/// Channel used by connections that do not name one.
pub const MAIN_CHANNEL: &str = "main";

/// Opaque per-node settings, shaped by the node-type catalogue.
pub type Parameters = Map<String, Value>;

/// A typed step of a workflow.
///
/// Fields that may be missing on import are kept representable here (empty
/// strings, `None`) so that [`validate`](super::validate) can report them and
/// [`repair`](super::repair) can fill them in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	#[serde(default, deserialize_with = "wire::lenient_string")]
	pub id: String,
	#[serde(rename = "type", default, deserialize_with = "wire::lenient_string")]
	pub node_type: String,
	#[serde(default, deserialize_with = "wire::lenient_string")]
	pub name: String,
	#[serde(
		default,
		deserialize_with = "wire::lenient_position",
		skip_serializing_if = "Option::is_none"
	)]
	pub position: Option<Point>,
	#[serde(
		default,
		deserialize_with = "wire::lenient_parameters",
		skip_serializing_if = "Option::is_none"
	)]
	pub parameters: Option<Parameters>,
	/// Fields this crate does not interpret, carried through unchanged.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Node {
	pub fn new(
		id: impl Into<String>,
		node_type: impl Into<String>,
		name: impl Into<String>,
		position: Point,
	) -> Self {
		Self {
			id: id.into(),
			node_type: node_type.into(),
			name: name.into(),
			position: Some(position),
			parameters: Some(Parameters::new()),
			extra: Map::new(),
		}
	}

	/// Segment of the type after the last `.`, or the whole type if it has
	/// no namespace.
	pub fn type_suffix(&self) -> &str {
		self.node_type
			.rsplit_once('.')
			.map_or(self.node_type.as_str(), |(_, suffix)| suffix)
	}
}

/// A directed edge from an output slot of one node to an input slot of
/// another.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
	pub source: String,
	pub source_output: usize,
	pub target: String,
	pub target_input: usize,
	/// Channel of the source output group.
	pub channel: String,
	/// Channel label recorded on the target side.
	pub target_channel: String,
}

impl Connection {
	/// A connection on the main channel.
	pub fn new(
		source: impl Into<String>,
		source_output: usize,
		target: impl Into<String>,
		target_input: usize,
	) -> Self {
		Self {
			source: source.into(),
			source_output,
			target: target.into(),
			target_input,
			channel: MAIN_CHANNEL.into(),
			target_channel: MAIN_CHANNEL.into(),
		}
	}

	pub fn is_main(&self) -> bool {
		self.channel == MAIN_CHANNEL
	}
}

/// Nodes plus connections. Node order is kept for stable iteration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default, with = "wire::adjacency")]
	pub connections: Vec<Connection>,
}

impl Workflow {
	pub fn new(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
		Self { nodes, connections }
	}

	/// Parses the adjacency-list JSON form.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn to_json_pretty(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// First node carrying `id`.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	pub fn node_ids(&self) -> HashSet<&str> {
		self.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	/// Connections leaving `id`, in stored order.
	pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
		self.connections.iter().filter(move |c| c.source == id)
	}

	/// Connections whose source or target is not a node of this workflow.
	pub fn dangling_connections(&self) -> impl Iterator<Item = &Connection> {
		let ids = self.node_ids();
		self.connections
			.iter()
			.filter(move |c| !ids.contains(c.source.as_str()) || !ids.contains(c.target.as_str()))
	}
}
