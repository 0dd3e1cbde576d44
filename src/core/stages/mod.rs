//! The five pipeline stages.
//!
//! One function per stage, each consuming the latch behind it and producing
//! the latch ahead of it. The engine calls them in reverse pipeline order so
//! that every stage sees the previous cycle's output of its predecessor.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory_access;
pub mod write_back;
