//! Serde glue for the adjacency-list workflow document.
//!
//! Connections travel as
//! `{ <source>: { <channel>: [ [ {node, type, index}, .. ], .. ] } }`, where
//! the position in the outer array is the source output slot. Internally they
//! are a flat list of [`Connection`]s.
//!
//! Node fields and connection targets are read leniently: a field of the
//! wrong shape is treated as missing so that validation and repair can deal
//! with it, instead of the whole document failing to parse.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::model::{MAIN_CHANNEL, Parameters};
use super::viewport::Point;

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) => s,
		Value::Number(n) => n.to_string(),
		_ => String::new(),
	})
}

pub(crate) fn lenient_position<'de, D>(deserializer: D) -> Result<Option<Point>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Array(items) => match items.as_slice() {
			[x, y] => x.as_f64().zip(y.as_f64()).map(|(x, y)| Point::new(x, y)),
			_ => None,
		},
		_ => None,
	})
}

/// Non-negative integer, else 0.
fn lenient_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Value::deserialize(deserializer)?
		.as_u64()
		.and_then(|i| usize::try_from(i).ok())
		.unwrap_or(0))
}

fn lenient_channel<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) if !s.is_empty() => s,
		_ => MAIN_CHANNEL.into(),
	})
}

pub(crate) fn lenient_parameters<'de, D>(deserializer: D) -> Result<Option<Parameters>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::Object(map) => Some(map),
		_ => None,
	})
}

pub(crate) mod adjacency {
	use std::collections::BTreeMap;

	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::{MAIN_CHANNEL, lenient_channel, lenient_index, lenient_string};
	use crate::workflow::model::Connection;

	/// A target the document cannot name still becomes a connection, one
	/// that points nowhere and is reported by validation.
	#[derive(Serialize, Deserialize)]
	struct TargetRef {
		#[serde(default, deserialize_with = "lenient_string")]
		node: String,
		#[serde(
			rename = "type",
			default = "main_channel",
			deserialize_with = "lenient_channel"
		)]
		channel: String,
		#[serde(default, deserialize_with = "lenient_index")]
		index: usize,
	}

	fn main_channel() -> String {
		MAIN_CHANNEL.into()
	}

	/// source id -> channel -> output slot -> targets
	type AdjacencyMap = BTreeMap<String, BTreeMap<String, Vec<Option<Vec<TargetRef>>>>>;

	pub fn serialize<S>(connections: &[Connection], serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = AdjacencyMap::new();
		for c in connections {
			let slots = map
				.entry(c.source.clone())
				.or_default()
				.entry(c.channel.clone())
				.or_default();
			if slots.len() <= c.source_output {
				slots.resize_with(c.source_output + 1, || Some(Vec::new()));
			}
			slots[c.source_output]
				.get_or_insert_with(Vec::new)
				.push(TargetRef {
					node: c.target.clone(),
					channel: c.target_channel.clone(),
					index: c.target_input,
				});
		}
		map.serialize(serializer)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Connection>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let Some(map) = Option::<AdjacencyMap>::deserialize(deserializer)? else {
			return Ok(Vec::new());
		};
		let mut connections = Vec::new();
		for (source, channels) in map {
			for (channel, slots) in channels {
				for (source_output, targets) in slots.into_iter().enumerate() {
					for target in targets.into_iter().flatten() {
						connections.push(Connection {
							source: source.clone(),
							source_output,
							target: target.node,
							target_input: target.index,
							channel: channel.clone(),
							target_channel: target.channel,
						});
					}
				}
			}
		}
		Ok(connections)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use crate::workflow::{Connection, ImportMode, Workflow, import, validate};

	#[test]
	fn test_flattens_adjacency_map() {
		let wf: Workflow = serde_json::from_value(json!({
			"nodes": [],
			"connections": {
				"a": { "main": [
					[ { "node": "b", "type": "main", "index": 0 } ],
					[ { "node": "c", "type": "main", "index": 1 }, { "node": "d", "type": "main", "index": 0 } ]
				]},
				"x": { "ai_tool": [ [ { "node": "a", "type": "ai_tool", "index": 0 } ] ] }
			}
		}))
		.unwrap();

		assert_eq!(wf.connections.len(), 4);
		assert_eq!(wf.connections[0], Connection::new("a", 0, "b", 0));
		assert_eq!(wf.connections[1], Connection::new("a", 1, "c", 1));
		assert_eq!(wf.connections[2], Connection::new("a", 1, "d", 0));
		assert_eq!(wf.connections[3].channel, "ai_tool");
		assert_eq!(wf.connections[3].target_channel, "ai_tool");
	}

	#[test]
	fn test_missing_or_null_connections_read_as_empty() {
		let wf: Workflow = serde_json::from_value(json!({ "nodes": [] })).unwrap();
		assert!(wf.connections.is_empty());
		let wf: Workflow =
			serde_json::from_value(json!({ "nodes": [], "connections": null })).unwrap();
		assert!(wf.connections.is_empty());
	}

	#[test]
	fn test_null_slots_are_skipped() {
		let wf: Workflow = serde_json::from_value(json!({
			"connections": { "a": { "main": [ null, [ { "node": "b" } ] ] } }
		}))
		.unwrap();
		assert_eq!(wf.connections, vec![Connection::new("a", 1, "b", 0)]);
	}

	#[test]
	fn test_malformed_targets_become_dangling_connections() {
		let wf: Workflow = serde_json::from_value(json!({
			"nodes": [ { "id": "a", "type": "core.set", "name": "A", "position": [0, 0] } ],
			"connections": { "a": { "main": [ [
				{ "node": null, "type": "main", "index": 0 },
				{ "node": "a", "type": 3, "index": -1 },
				{ "index": 2.5 }
			] ] } }
		}))
		.unwrap();

		assert_eq!(wf.connections.len(), 3);
		assert_eq!(wf.connections[0], Connection::new("a", 0, "", 0));
		assert_eq!(wf.connections[1], Connection::new("a", 0, "a", 0));
		assert_eq!(wf.connections[2].target, "");
		assert_eq!(wf.connections[2].target_input, 0);
		assert_eq!(
			validate(&wf).errors,
			vec![
				"Invalid connection: target node '' not found",
				"Invalid connection: target node '' not found",
			]
		);
	}

	#[test]
	fn test_malformed_target_survives_repair_import() {
		let doc = json!({
			"nodes": [ { "id": "a", "type": "core.set", "name": "A", "position": [0, 0] } ],
			"connections": { "a": { "main": [ [ { "node": null, "index": -1 } ] ] } }
		});
		let wf = import(&doc.to_string(), ImportMode::Repair).unwrap();
		assert_eq!(wf.nodes.len(), 1);
		assert_eq!(wf.dangling_connections().count(), 1);
	}

	#[test]
	fn test_serialize_pads_empty_slots() {
		let wf = Workflow::new(vec![], vec![Connection::new("a", 2, "b", 0)]);
		let value = serde_json::to_value(&wf).unwrap();
		assert_eq!(
			value["connections"],
			json!({ "a": { "main": [ [], [], [ { "node": "b", "type": "main", "index": 0 } ] ] } })
		);
	}

	#[test]
	fn test_malformed_node_fields_read_as_missing() {
		let wf: Workflow = serde_json::from_value(json!({
			"nodes": [
				{ "id": null, "type": 7, "position": [1, "two"], "parameters": "oops" },
				{ "id": "b", "position": [1, 2, 3] },
				{ "id": "c", "position": [4.5, -2] }
			]
		}))
		.unwrap();

		assert_eq!(wf.nodes[0].id, "");
		assert_eq!(wf.nodes[0].node_type, "7");
		assert_eq!(wf.nodes[0].position, None);
		assert_eq!(wf.nodes[0].parameters, None);
		assert_eq!(wf.nodes[1].position, None);
		assert_eq!(wf.nodes[2].position.map(|p| (p.x, p.y)), Some((4.5, -2.0)));
	}

	#[test]
	fn test_unknown_node_fields_survive_round_trip() {
		let doc = json!({
			"nodes": [ {
				"id": "a", "type": "core.set", "name": "Set", "position": [0.0, 0.0],
				"parameters": { "value": 1 }, "typeVersion": 3
			} ],
			"connections": {}
		});
		let wf: Workflow = serde_json::from_value(doc.clone()).unwrap();
		assert_eq!(wf.nodes[0].extra["typeVersion"], json!(3));
		assert_eq!(serde_json::to_value(&wf).unwrap(), doc);
	}
}
