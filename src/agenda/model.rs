use crate::error::AgendaError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a contact. Positive, assigned by the directory, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    pub const FIRST: ContactId = ContactId(1);

    /// Returns `None` for zero, which is never a valid id.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(ContactId::new)
            .ok_or_else(|| AgendaError::Validation(format!("Invalid contact id: {}", s)))
    }
}

/// The editable fields of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    GivenName,
    FamilyName,
    Age,
    Phone,
    Email,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::GivenName,
        Field::FamilyName,
        Field::Age,
        Field::Phone,
        Field::Email,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::GivenName => "given_name",
            Field::FamilyName => "family_name",
            Field::Age => "age",
            Field::Phone => "phone",
            Field::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::GivenName => "Given name",
            Field::FamilyName => "Family name",
            Field::Age => "Age",
            Field::Phone => "Phone",
            Field::Email => "Email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "given_name" | "givenname" | "given" => Ok(Field::GivenName),
            "family_name" | "familyname" | "family" => Ok(Field::FamilyName),
            "age" => Ok(Field::Age),
            "phone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            _ => Err(AgendaError::Validation(format!("Unknown field: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    id: ContactId,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    // Older stores wrote the age as a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Contact {
    pub(crate) fn from_fields(id: ContactId, fields: &ContactFields) -> Self {
        let value = |field| fields.provided(field).unwrap_or_default().to_string();
        Self {
            id,
            given_name: value(Field::GivenName),
            family_name: value(Field::FamilyName),
            age: value(Field::Age),
            phone: value(Field::Phone),
            email: value(Field::Email),
        }
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::GivenName => &self.given_name,
            Field::FamilyName => &self.family_name,
            Field::Age => &self.age,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::GivenName => &mut self.given_name,
            Field::FamilyName => &mut self.family_name,
            Field::Age => &mut self.age,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
        }
    }

    /// "Given Family", or whichever half is present.
    pub fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.family_name),
            (false, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (true, true) => "(unnamed)".to_string(),
        }
    }

    /// Merges the provided, non-empty values of `patch` into this contact.
    /// Returns true if any field changed.
    pub(crate) fn apply(&mut self, patch: &ContactFields) -> bool {
        let mut changed = false;
        for field in Field::ALL {
            if let Some(value) = patch.provided(field) {
                let slot = self.field_mut(field);
                if slot.as_str() != value {
                    *slot = value.to_string();
                    changed = true;
                }
            }
        }
        changed
    }
}

/// Field input for creating a contact or patching an existing one.
///
/// A value counts as provided only when it is `Some` and not blank; anything
/// else leaves the target untouched (update) or empty (create).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub age: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn given(mut self, value: impl Into<String>) -> Self {
        self.given_name = Some(value.into());
        self
    }

    pub fn family(mut self, value: impl Into<String>) -> Self {
        self.family_name = Some(value.into());
        self
    }

    pub fn age(mut self, value: impl Into<String>) -> Self {
        self.age = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::GivenName => self.given_name.as_deref(),
            Field::FamilyName => self.family_name.as_deref(),
            Field::Age => self.age.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Email => self.email.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            Field::GivenName => self.given_name = value,
            Field::FamilyName => self.family_name = value,
            Field::Age => self.age = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
        }
    }

    /// The trimmed value for `field`, if one was provided and is non-empty.
    pub fn provided(&self, field: Field) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    /// True when no field carries a usable value.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.provided(*f).is_none())
    }

    pub fn has_name(&self) -> bool {
        self.provided(Field::GivenName).is_some() || self.provided(Field::FamilyName).is_some()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_rejects_zero_and_garbage() {
        assert!(ContactId::new(0).is_none());
        assert!("0".parse::<ContactId>().is_err());
        assert!("abc".parse::<ContactId>().is_err());
        assert_eq!("42".parse::<ContactId>().unwrap().get(), 42);
    }

    #[test]
    fn create_fills_missing_fields_with_empty_strings() {
        let fields = ContactFields::new().family("Pérez").phone("  123 ");
        let contact = Contact::from_fields(ContactId::FIRST, &fields);
        assert_eq!(contact.family_name, "Pérez");
        assert_eq!(contact.phone, "123");
        assert_eq!(contact.given_name, "");
        assert_eq!(contact.email, "");
    }

    #[test]
    fn apply_ignores_blank_and_missing_values() {
        let mut contact = Contact::from_fields(
            ContactId::FIRST,
            &ContactFields::new().given("Juan").family("Pérez").email("a@b.com"),
        );
        let changed = contact.apply(&ContactFields::new().given("   ").phone("555"));
        assert!(changed);
        assert_eq!(contact.given_name, "Juan");
        assert_eq!(contact.phone, "555");
        assert_eq!(contact.email, "a@b.com");
    }

    #[test]
    fn apply_reports_no_change_for_identical_values() {
        let mut contact =
            Contact::from_fields(ContactId::FIRST, &ContactFields::new().given("Ana"));
        assert!(!contact.apply(&ContactFields::new().given("Ana")));
    }

    #[test]
    fn age_accepts_numbers_and_strings() {
        let from_number: Contact =
            serde_json::from_str(r#"{"id": 3, "givenName": "Ana", "age": 31}"#).unwrap();
        assert_eq!(from_number.age, "31");

        let from_string: Contact =
            serde_json::from_str(r#"{"id": 4, "age": "treinta"}"#).unwrap();
        assert_eq!(from_string.age, "treinta");

        let from_null: Contact = serde_json::from_str(r#"{"id": 5, "age": null}"#).unwrap();
        assert_eq!(from_null.age, "");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let contact = Contact::from_fields(
            ContactId::FIRST,
            &ContactFields::new().given("Ana").family("Gómez"),
        );
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["givenName"], "Ana");
        assert_eq!(json["familyName"], "Gómez");
    }

    #[test]
    fn field_parses_common_spellings() {
        assert_eq!("family-name".parse::<Field>().unwrap(), Field::FamilyName);
        assert_eq!("givenName".parse::<Field>().unwrap(), Field::GivenName);
        assert!("address".parse::<Field>().is_err());
    }
}
