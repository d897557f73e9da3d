//! Bridge between the interaction thread and the backend worker runtime.

pub mod commands;
pub mod orchestration;
pub mod runtime;
