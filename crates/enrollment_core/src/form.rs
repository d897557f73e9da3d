//! Owner contact form: field values, focus cursor and the derived submit gate.

use shared::enrollment::Owner;

use crate::validator::is_present;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerField {
    Name,
    Phone,
    Email,
}

impl OwnerField {
    pub const ALL: [OwnerField; 3] = [OwnerField::Name, OwnerField::Phone, OwnerField::Email];

    /// Field that receives focus after `self` is returned, `None` for the last one.
    pub fn next(self) -> Option<OwnerField> {
        match self {
            Self::Name => Some(Self::Phone),
            Self::Phone => Some(Self::Email),
            Self::Email => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

/// Input coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The field lost focus with `value`.
    FieldCommitted {
        field: OwnerField,
        value: Option<String>,
    },
    /// The return key was pressed inside the field.
    FieldReturned {
        field: OwnerField,
        value: Option<String>,
    },
    SubmitRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    focus: Option<OwnerField>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: None,
            phone: None,
            email: None,
            focus: Some(OwnerField::Name),
        }
    }

    /// Stores `value` and returns the recomputed submit gate.
    pub fn commit_field(&mut self, field: OwnerField, value: Option<String>) -> bool {
        *self.slot_mut(field) = value;
        self.can_submit()
    }

    /// Commits `value`, then moves focus one step down the form. Returning `Email` always
    /// releases focus. Any other field moves the cursor only while it holds focus, so focus
    /// never moves backward once released.
    pub fn advance_focus(&mut self, field: OwnerField, value: Option<String>) -> bool {
        let can_submit = self.commit_field(field, value);
        if field == OwnerField::Email || self.focus == Some(field) {
            self.focus = field.next();
        }
        can_submit
    }

    pub fn can_submit(&self) -> bool {
        OwnerField::ALL
            .into_iter()
            .all(|field| is_present(self.value(field)))
    }

    pub fn focus(&self) -> Option<OwnerField> {
        self.focus
    }

    pub fn value(&self, field: OwnerField) -> Option<&str> {
        match field {
            OwnerField::Name => self.name.as_deref(),
            OwnerField::Phone => self.phone.as_deref(),
            OwnerField::Email => self.email.as_deref(),
        }
    }

    /// Trimmed owner built from the current values, `None` while the gate is closed.
    pub fn owner(&self) -> Option<Owner> {
        match (
            self.name.as_deref(),
            self.phone.as_deref(),
            self.email.as_deref(),
        ) {
            (Some(name), Some(phone), Some(email)) if self.can_submit() => {
                Some(Owner::new(name.trim(), phone.trim(), email.trim()))
            }
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: OwnerField) -> &mut Option<String> {
        match field {
            OwnerField::Name => &mut self.name,
            OwnerField::Phone => &mut self.phone,
            OwnerField::Email => &mut self.email,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
