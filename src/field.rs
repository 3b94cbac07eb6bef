//! Field references, the addressable data an expression compares against.
//!
//! A field reference names a single field of a record. It can optionally be qualified by the
//! event (or instrument) the field belongs to, and by a checkbox option when the field is a
//! checkbox. The four surface forms accepted by the parser are:
//!
//! | form                     | event | checkbox |
//! | ------------------------ | ----- | -------- |
//! | `[field]`                | no    | no       |
//! | `[event][field]`         | yes   | no       |
//! | `[field(option)]`        | no    | yes      |
//! | `[event][field(option)]` | yes   | yes      |
//!
//! ```rust
//! use branching_logic::FieldRef;
//!
//! let field = FieldRef::new("race").with_event("baseline_arm_1").with_checkbox("2");
//! assert_eq!(field.to_string(), "[baseline_arm_1][race(2)]");
//! ```

use std::fmt::{Display, Formatter};

/// Reference to a single field, optionally qualified by an event and a checkbox option.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldRef {
    field: String,
    event: Option<String>,
    checkbox_option: Option<String>,
}

impl FieldRef {
    /// Create a bare field reference with neither an event nor a checkbox qualifier.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            event: None,
            checkbox_option: None,
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_checkbox(mut self, option: impl Into<String>) -> Self {
        self.checkbox_option = Some(option.into());
        self
    }

    /// The name of the field, which is the key used for lookups.
    pub fn name(&self) -> &str {
        &self.field
    }

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn checkbox_option(&self) -> Option<&str> {
        self.checkbox_option.as_deref()
    }
}

impl Display for FieldRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(event) = &self.event {
            write!(f, "[{}]", event)?;
        }

        match &self.checkbox_option {
            Some(option) => write!(f, "[{}({})]", self.field, option),
            None => write!(f, "[{}]", self.field),
        }
    }
}
