//! Filesystem payload storage
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/<namespace>/declarations/<name>.yaml
//! <root>/<namespace>/sources/<source>/<data-key>
//! ```

pub mod atomic;
pub mod fs_store;
pub mod layout;

pub use fs_store::FsPayloadStore;
