use std::fmt;

use thiserror::Error;

use crate::domain::PhotoSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Owner,
    Dog,
    Photo(PhotoSlot),
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Owner => write!(f, "owner"),
            MissingField::Dog => write!(f, "dog"),
            MissingField::Photo(slot) => write!(f, "photo {}", slot.index() + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("enrollment is incomplete; missing {}", join_missing(.missing))]
pub struct IncompleteEnrollment {
    pub missing: Vec<MissingField>,
}

impl IncompleteEnrollment {
    pub fn new(missing: Vec<MissingField>) -> Self {
        Self { missing }
    }
}

fn join_missing(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
