//! Core data structures for the fruitsort simulation.

pub mod agent;
pub mod fruit;
pub mod grid;
