//! Application layer orchestrating domain logic and infrastructure.

pub mod combine;
pub mod scan;
