use thiserror::Error;

/// Errors surfaced by the fallible workflow entry points.
///
/// Structural defects found while validating are not errors: they are
/// reported as strings by [`validate`](super::validate). This type only
/// covers inputs that cannot be turned into a [`Workflow`](super::Workflow)
/// at all, or that a caller asked to reject.
#[derive(Debug, Error)]
pub enum Error {
	/// The workflow document is not valid JSON, or does not have the
	/// expected top-level shape.
	#[error("failed to parse workflow: {0}")]
	Parse(#[from] serde_json::Error),
	/// A strict import found structural defects.
	#[error("workflow is invalid: {}", .0.join("; "))]
	Invalid(Vec<String>),
	/// A viewport was requested with a zoom that is not a positive, finite
	/// number.
	#[error("invalid zoom factor {0}, must be positive and finite")]
	InvalidZoom(f64),
}

/// Result alias for workflow operations.
pub type Result<T> = std::result::Result<T, Error>;
