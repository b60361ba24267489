//! UI components.

pub mod workflow_canvas;
