mod component;
mod interaction;
mod render;
mod state;
pub mod style;
mod surface;

pub use component::WorkflowCanvas;
pub use interaction::{ClickTarget, dispatch_click, resolve_click};
pub use render::{RenderStats, fit_to_width, render};
pub use state::{CLICK_SLOP, PanState, WHEEL_ZOOM_STEP, wheel_zoom};
pub use surface::Surface;
