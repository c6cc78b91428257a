//! Appender implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use memory::MemoryAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
