pub mod app;
pub mod surface;
pub mod theme;

pub use surface::CairoSurface;
