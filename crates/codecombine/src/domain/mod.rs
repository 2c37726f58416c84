//! Core types shared by the scanner, combiner, and CLI.

pub mod errors;
pub mod model;
