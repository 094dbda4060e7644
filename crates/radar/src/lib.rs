//! Radar chart geometry and drawing against a host-provided surface.

pub mod color;
pub mod geometry;
pub mod macros;
pub mod renderer;
pub mod style;
pub mod surface;

pub use color::{Color, ColorError, parse_color, parse_color_or};
pub use geometry::Layout;
pub use renderer::{ChartView, RadarRenderer};
pub use style::{RadarStyle, RotationMode, StyleAttributes};
pub use surface::{DrawCommand, Path, RecordingSurface, Stroke, Surface, SurfaceError, TextStyle};
