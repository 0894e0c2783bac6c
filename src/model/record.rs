use crate::model::fields::Field;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Gender as the generator reports it. Only the two values it produces are
/// modeled; any other token is treated as an absent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Token used on the wire and for sorting
    pub fn canonical(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Token shown to the user
    pub fn localized(self) -> &'static str {
        match self {
            Gender::Male => "זכר",
            Gender::Female => "נקבה",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// One generated identity.
///
/// Every field is optional: the generator only includes the fields whose
/// visibility flag was set on the request. Values of the wrong JSON type are
/// dropped during decoding rather than failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub email_valid: Option<bool>,

    /// National ID in its canonical textual form (digits, leading zeros kept)
    #[serde(
        rename = "id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub national_id: Option<String>,

    #[serde(
        rename = "id_valid",
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub national_id_valid: Option<bool>,

    #[serde(default, deserialize_with = "lenient_gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, deserialize_with = "lenient_age", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl ProfileRecord {
    /// Display text of a field, `None` when the record lacks it.
    ///
    /// Gender is shown localized; the national ID as its canonical string.
    pub fn display_value(&self, field: Field) -> Option<String> {
        match field {
            Field::FirstName => self.first_name.clone(),
            Field::LastName => self.last_name.clone(),
            Field::FullName => self.full_name.clone(),
            Field::Email => self.email.clone(),
            Field::NationalId => self.national_id.clone(),
            Field::Gender => self.gender.map(|g| g.localized().to_string()),
            Field::Age => self.age.map(|a| a.to_string()),
            Field::City => self.city.clone(),
        }
    }

    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::FirstName => self.first_name.is_some(),
            Field::LastName => self.last_name.is_some(),
            Field::FullName => self.full_name.is_some(),
            Field::Email => self.email.is_some(),
            Field::NationalId => self.national_id.is_some(),
            Field::Gender => self.gender.is_some(),
            Field::Age => self.age.is_some(),
            Field::City => self.city.is_some(),
        }
    }

    /// True only when the generator explicitly flagged the value as invalid
    pub fn is_flagged_invalid(&self, field: Field) -> bool {
        match field {
            Field::Email => self.email_valid == Some(false),
            Field::NationalId => self.national_id_valid == Some(false),
            _ => false,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_bool()))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.is_u64() => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Gender::parse(&s),
        _ => None,
    })
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|v| v.as_u64())
        .and_then(|n| u32::try_from(n).ok()))
}
