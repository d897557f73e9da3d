pub mod domain;
pub mod enrollment;
pub mod error;
pub mod protocol;
