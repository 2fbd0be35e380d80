// Adapters layer: concrete line sources and sinks behind the domain ports.

pub mod file;
pub mod memory;

pub use file::{FileLineSink, FileLineSource};
pub use memory::{MemoryLineSink, MemoryLineSource};
