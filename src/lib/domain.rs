//! Domain types and collaborator contracts

pub mod communication;
