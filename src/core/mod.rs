//! Core business logic modules.

pub mod analyzer;
pub mod batch;
pub mod planner;
pub mod scanner;
pub mod workflow;
