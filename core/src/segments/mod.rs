//! segments/mod.rs
//! Segment extraction: loadable regions of the source executable.
//!
//! Notes:
//! - Only `PT_LOAD` program headers become segments; everything else is skipped.
//! - Program-header order is preserved; nothing is merged, synthesized or sorted.
//! - Zero loadable segments is a valid result (empty image payload).

pub mod types;
pub mod elf;
pub mod extract;

pub use types::*;
pub use elf::*;
pub use extract::*;
