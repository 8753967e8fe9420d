//! Infrastructure layer: the OS-backed implementation of the file-system seam
//! used by the application layer.

pub mod fs;

pub use fs::OsFileSystem;
