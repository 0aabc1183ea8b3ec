pub mod navigator;
pub mod save_surface;

pub use navigator::Navigator;
pub use save_surface::{AnchorElement, AnchorId, SaveSurface};
