use log::{debug, info};

use super::error::{Error, Result};
use super::model::Workflow;
use super::repair::repair;
use super::validate::validate;

/// How [`import`] treats a document with structural defects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportMode {
	/// Reject the document with the validation errors.
	Strict,
	/// Repair the document and carry on.
	#[default]
	Repair,
}

/// Parses a workflow document and applies the chosen import discipline.
pub fn import(json: &str, mode: ImportMode) -> Result<Workflow> {
	let workflow = Workflow::from_json(json)?;
	let report = validate(&workflow);

	match mode {
		ImportMode::Strict if !report.is_valid() => Err(Error::Invalid(report.errors)),
		ImportMode::Strict => Ok(workflow),
		ImportMode::Repair => {
			for error in &report.errors {
				debug!("import: {error}");
			}
			let repaired = repair(&workflow);
			info!(
				"imported workflow with {} node(s), {} connection(s)",
				repaired.nodes.len(),
				repaired.connections.len()
			);
			Ok(repaired)
		}
	}
}
