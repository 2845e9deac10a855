//! Template engines

pub mod minijinja;
