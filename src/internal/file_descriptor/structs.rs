pub mod descriptor_error;
pub mod file_descriptor;
pub mod file_type;

pub use descriptor_error::DescriptorError;
pub use file_descriptor::{FileDescriptor, FileOwner};
pub use file_type::FileType;
