//! Adapter implementations for assessment ports.

pub mod memory;
