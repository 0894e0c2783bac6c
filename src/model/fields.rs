use serde::{Deserialize, Serialize};
use std::fmt;

/// A field of a generated profile.
///
/// `FullName` is derived by the generator from the first and last name and has
/// no visibility flag of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    FullName,
    Email,
    NationalId,
    Gender,
    Age,
    City,
}

impl Field {
    /// Fields the user can show or hide, in settings-panel order
    pub const TOGGLES: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::NationalId,
        Field::Gender,
        Field::Age,
        Field::City,
    ];

    /// Table columns, in display order. Every column is sortable.
    pub const COLUMNS: [Field; 6] = [
        Field::NationalId,
        Field::FullName,
        Field::Email,
        Field::Gender,
        Field::Age,
        Field::City,
    ];

    /// Fields composed into the copy-all summary, in summary order
    pub const SUMMARY: [Field; 6] = [
        Field::FullName,
        Field::Email,
        Field::NationalId,
        Field::Gender,
        Field::Age,
        Field::City,
    ];

    /// Short label used in copy text and the card/compact views
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "שם פרטי",
            Field::LastName => "שם משפחה",
            Field::FullName => "שם",
            Field::Email => "אימייל",
            Field::NationalId => "ת.ז",
            Field::Gender => "מגדר",
            Field::Age => "גיל",
            Field::City => "עיר",
        }
    }

    /// Column header in the table view
    pub fn header(self) -> &'static str {
        match self {
            Field::NationalId => "מספר זהות",
            Field::FullName => "שם מלא",
            other => other.label(),
        }
    }

    /// Toast text shown after this field alone was copied
    pub fn copied_message(self) -> &'static str {
        match self {
            Field::FirstName | Field::LastName | Field::FullName => "שם הועתק ללוח",
            Field::Email => "אימייל הועתק ללוח",
            Field::NationalId => "מספר זהות הועתק ללוח",
            Field::Gender => "מגדר הועתק ללוח",
            Field::Age => "גיל הועתק ללוח",
            Field::City => "עיר הועתקה ללוח",
        }
    }

    /// Query parameter the generator service reads for this field's flag
    pub fn request_param(self) -> Option<&'static str> {
        match self {
            Field::FirstName => Some("includeFirstName"),
            Field::LastName => Some("includeLastName"),
            Field::FullName => None,
            Field::Email => Some("includeEmail"),
            Field::NationalId => Some("includeId"),
            Field::Gender => Some("includeGender"),
            Field::Age => Some("includeAge"),
            Field::City => Some("includeCity"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first-name",
            Field::LastName => "last-name",
            Field::FullName => "full-name",
            Field::Email => "email",
            Field::NationalId => "national-id",
            Field::Gender => "gender",
            Field::Age => "age",
            Field::City => "city",
        };
        f.write_str(name)
    }
}

/// Which optional fields are currently shown (and requested from the generator).
///
/// Serialized with the same flag names the generator service uses, so a saved
/// config reads the same as a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldVisibility {
    pub include_first_name: bool,
    pub include_last_name: bool,
    pub include_email: bool,
    pub include_id: bool,
    pub include_gender: bool,
    pub include_age: bool,
    pub include_city: bool,
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self {
            include_first_name: true,
            include_last_name: true,
            include_email: true,
            include_id: true,
            include_gender: true,
            include_age: true,
            include_city: true,
        }
    }
}

impl FieldVisibility {
    /// Whether `field` is shown. The full name is shown when either name part is.
    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::FirstName => self.include_first_name,
            Field::LastName => self.include_last_name,
            Field::FullName => self.include_first_name || self.include_last_name,
            Field::Email => self.include_email,
            Field::NationalId => self.include_id,
            Field::Gender => self.include_gender,
            Field::Age => self.include_age,
            Field::City => self.include_city,
        }
    }

    /// Set a field's flag. Setting `FullName` sets both name parts.
    pub fn set(&mut self, field: Field, visible: bool) {
        match field {
            Field::FirstName => self.include_first_name = visible,
            Field::LastName => self.include_last_name = visible,
            Field::FullName => {
                self.include_first_name = visible;
                self.include_last_name = visible;
            }
            Field::Email => self.include_email = visible,
            Field::NationalId => self.include_id = visible,
            Field::Gender => self.include_gender = visible,
            Field::Age => self.include_age = visible,
            Field::City => self.include_city = visible,
        }
    }

    pub fn toggle(&mut self, field: Field) {
        let current = self.is_visible(field);
        self.set(field, !current);
    }

    /// Every field shown except those listed
    pub fn hiding(fields: &[Field]) -> Self {
        Self::default().without(fields)
    }

    /// Copy of these flags with `fields` hidden
    pub fn without(mut self, fields: &[Field]) -> Self {
        for field in fields {
            self.set(*field, false);
        }
        self
    }

    /// `(param, "true"|"false")` pairs for the generation request
    pub fn request_params(&self) -> Vec<(&'static str, &'static str)> {
        Field::TOGGLES
            .iter()
            .filter_map(|field| {
                let param = field.request_param()?;
                let value = if self.is_visible(*field) { "true" } else { "false" };
                Some((param, value))
            })
            .collect()
    }
}
