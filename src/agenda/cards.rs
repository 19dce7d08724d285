//! # Contact Cards
//!
//! Reads vCard-style text into plain [`ContactFields`]. Only the properties
//! agenda stores are looked at:
//!
//! | Property | Field |
//! |----------|-------|
//! | `N`      | family name; given name |
//! | `FN`     | split into given/family, only when `N` is absent |
//! | `TEL`    | phone (first wins) |
//! | `EMAIL`  | email (first wins) |
//! | `NOTE`   | age, from an `age:` or `edad:` entry |
//!
//! Property names are case-insensitive, parameters (`TEL;TYPE=cell`) and group
//! prefixes (`item1.EMAIL`) are ignored and folded lines are joined. Cards
//! without a name, phone or email are skipped. Nothing else is validated.

use crate::model::{ContactFields, Field};

const AGE_KEYS: [&str; 2] = ["age:", "edad:"];

pub fn parse_cards(text: &str) -> Vec<ContactFields> {
    let mut cards = Vec::new();
    let mut current: Option<CardBuilder> = None;

    for line in unfold(text) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let property = property_name(name);

        match property.as_str() {
            "BEGIN" if value.trim().eq_ignore_ascii_case("VCARD") => {
                current = Some(CardBuilder::default());
            }
            "END" if value.trim().eq_ignore_ascii_case("VCARD") => {
                if let Some(card) = current.take().and_then(CardBuilder::finish) {
                    cards.push(card);
                }
            }
            _ => {
                if let Some(card) = current.as_mut() {
                    card.accept(&property, &unescape(value));
                }
            }
        }
    }

    // Unterminated last card.
    if let Some(card) = current.and_then(CardBuilder::finish) {
        cards.push(card);
    }
    cards
}

#[derive(Default)]
struct CardBuilder {
    structured_name: Option<(String, String)>,
    formatted_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    age: Option<String>,
}

impl CardBuilder {
    fn accept(&mut self, property: &str, value: &str) {
        let value = value.trim();
        match property {
            "N" => {
                let mut parts = value.split(';');
                let family = parts.next().unwrap_or_default().trim().to_string();
                let given = parts.next().unwrap_or_default().trim().to_string();
                self.structured_name = Some((given, family));
            }
            "FN" => {
                self.formatted_name.get_or_insert_with(|| value.to_string());
            }
            "TEL" if !value.is_empty() => {
                self.phone.get_or_insert_with(|| value.to_string());
            }
            "EMAIL" if !value.is_empty() => {
                self.email.get_or_insert_with(|| value.to_string());
            }
            "NOTE" => {
                if self.age.is_none() {
                    self.age = age_from_note(value);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Option<ContactFields> {
        let (given, family) = match (self.structured_name, self.formatted_name) {
            (Some((given, family)), _) if !(given.is_empty() && family.is_empty()) => {
                (given, family)
            }
            (_, Some(formatted)) => split_formatted_name(&formatted),
            _ => (String::new(), String::new()),
        };

        let mut fields = ContactFields::new();
        fields.set(Field::GivenName, given);
        fields.set(Field::FamilyName, family);
        if let Some(phone) = self.phone {
            fields.set(Field::Phone, phone);
        }
        if let Some(email) = self.email {
            fields.set(Field::Email, email);
        }
        if let Some(age) = self.age {
            fields.set(Field::Age, age);
        }

        let identifiable = fields.has_name()
            || fields.provided(Field::Phone).is_some()
            || fields.provided(Field::Email).is_some();
        identifiable.then_some(fields)
    }
}

/// Joins continuation lines (leading space or tab) onto the previous line.
fn unfold(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let raw = raw.trim_end_matches('\r');
        match (raw.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(rest), Some(previous)) => previous.push_str(rest),
            _ => lines.push(raw.to_string()),
        }
    }
    lines
}

/// `item1.TEL;TYPE=cell` → `TEL`
fn property_name(raw: &str) -> String {
    let without_params = raw.split(';').next().unwrap_or_default();
    let without_group = without_params
        .rsplit('.')
        .next()
        .unwrap_or(without_params);
    without_group.trim().to_ascii_uppercase()
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// "Juan Carlos Pérez" → ("Juan Carlos", "Pérez"). A single word is the family name.
fn split_formatted_name(formatted: &str) -> (String, String) {
    let words: Vec<&str> = formatted.split_whitespace().collect();
    match words.split_last() {
        Some((last, rest)) => (rest.join(" "), (*last).to_string()),
        None => (String::new(), String::new()),
    }
}

fn age_from_note(note: &str) -> Option<String> {
    AGE_KEYS.iter().find_map(|key| {
        // Keys are ASCII, so matching ignores case without touching the value.
        // Whole-word match only: "message: hi" must not read as an age.
        let pos = note.char_indices().map(|(pos, _)| pos).find(|&pos| {
            note.get(pos..pos + key.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(key))
                && !note[..pos]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_alphabetic)
        })?;
        let value: String = note[pos + key.len()..]
            .chars()
            .take_while(|c| !matches!(c, ',' | ';' | '\n'))
            .collect();
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
