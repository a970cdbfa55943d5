//! Scratch space adapters.

mod memory;
mod temp;

pub use memory::MemoryScratchSpace;
pub use temp::TempScratchSpace;
