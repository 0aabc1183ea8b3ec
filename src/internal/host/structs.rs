pub mod disk_save_surface;
pub mod host_error;
pub mod object_url;
pub mod saved_file;
pub mod system_navigator;
pub mod transient_anchor;

pub use disk_save_surface::DiskSaveSurface;
pub use host_error::{NavigateError, ObjectUrlError, SaveError};
pub use object_url::{ObjectUrl, ObjectUrlRegistry};
pub use saved_file::SavedFile;
pub use system_navigator::SystemNavigator;
pub use transient_anchor::TransientAnchor;
