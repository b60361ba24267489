//! Workflow graph core: the node/connection model, its JSON form, structural
//! validation and repair, and the viewport transform shared by drawing and
//! hit-testing. Nothing in here touches the DOM.

mod error;
mod import;
mod model;
mod repair;
mod validate;
mod viewport;
mod wire;

pub use error::{Error, Result};
pub use import::{ImportMode, import};
pub use model::{Connection, MAIN_CHANNEL, Node, Parameters, Workflow};
pub use repair::{
	DEFAULT_NODE_TYPE, ENTRY_NODE_NAME, ENTRY_NODE_TYPE, RepairOptions, default_position, repair,
	repair_with,
};
pub use validate::{ValidationReport, validate};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, NODE_HEIGHT, NODE_WIDTH, Point, Rect, Size, Viewport};
