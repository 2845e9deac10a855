//! Mail queues

pub mod memory;
