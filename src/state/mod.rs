pub mod gesture;
pub mod indicator;
pub mod viewer;

pub use gesture::{touch_points, ZoomLimits};
pub use indicator::{IndicatorAction, IndicatorState, VisibilityReport};
pub use viewer::{ViewerAction, ViewerState};
