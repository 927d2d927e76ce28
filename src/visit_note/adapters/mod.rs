//! Adapter implementations for visit note ports.

pub mod memory;
