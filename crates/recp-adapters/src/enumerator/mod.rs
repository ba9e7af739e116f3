//! File enumeration adapters.

mod local;
mod memory;

pub use local::LocalFileEnumerator;
pub use memory::MemoryFileEnumerator;
