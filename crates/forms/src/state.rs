use std::collections::BTreeMap;

use crate::error::FormsError;
use crate::schema::{self, FieldDescriptor, FieldKind};

/// Tagged field value. The discriminant mirrors the field kind, so every
/// stored answer carries its own type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(Option<u32>),
    Toggle(bool),
    Choice(String),
    Items(Vec<String>),
}

/// The answer set of one wizard session, keyed by field key. Seeded from
/// the schema defaults; every key corresponds to a field descriptor of the
/// active category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

const NO_ITEMS: &[String] = &[];

impl FormState {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, FieldValue)>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pure single-key update: replaces exactly one key, every other entry
    /// is preserved. No validation happens here.
    #[must_use]
    pub fn set(mut self, key: &str, value: FieldValue) -> Self {
        self.values.insert(key.to_owned(), value);
        self
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<u32> {
        match self.values.get(key) {
            Some(FieldValue::Number(value)) => *value,
            _ => None,
        }
    }

    pub fn toggled(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FieldValue::Toggle(true)))
    }

    pub fn choice(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(FieldValue::Choice(choice)) => Some(choice.as_str()),
            _ => None,
        }
    }

    pub fn items(&self, key: &str) -> &[String] {
        match self.values.get(key) {
            Some(FieldValue::Items(items)) => items,
            _ => NO_ITEMS,
        }
    }

    /// Kind-directed parse of raw user input for Text, Number, and Select
    /// fields. Number policy: empty input clears the value, unparseable
    /// input is rejected and the stored value stays unchanged.
    pub fn apply_input(self, field: &FieldDescriptor, raw: &str) -> Result<Self, FormsError> {
        match field.kind {
            FieldKind::Text => Ok(self.set(field.key, FieldValue::Text(raw.to_owned()))),
            FieldKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(self.set(field.key, FieldValue::Number(None)));
                }
                let value = trimmed
                    .parse::<u32>()
                    .map_err(|_| FormsError::InvalidNumber {
                        input: trimmed.to_owned(),
                    })?;
                Ok(self.set(field.key, FieldValue::Number(Some(value))))
            }
            FieldKind::Select => {
                let allowed = schema::options_for(field.key).unwrap_or_default();
                if !allowed.contains(&raw) {
                    return Err(FormsError::InvalidChoice {
                        key: field.key.to_owned(),
                        input: raw.to_owned(),
                    });
                }
                Ok(self.set(field.key, FieldValue::Choice(raw.to_owned())))
            }
            FieldKind::Boolean | FieldKind::ListOfStrings => Err(FormsError::KindMismatch {
                key: field.key.to_owned(),
                expected: "text, number, or select",
            }),
        }
    }

    /// Stores the logical negation of the current value.
    pub fn toggle(self, key: &str) -> Result<Self, FormsError> {
        match self.get(key) {
            Some(FieldValue::Toggle(current)) => {
                let next = !*current;
                Ok(self.set(key, FieldValue::Toggle(next)))
            }
            Some(_) => Err(FormsError::KindMismatch {
                key: key.to_owned(),
                expected: "boolean",
            }),
            None => Err(FormsError::UnknownField(key.to_owned())),
        }
    }

    /// Appends trimmed non-empty text. Duplicates are allowed and insertion
    /// order is preserved; empty input leaves the list untouched.
    pub fn push_item(self, key: &str, text: &str) -> Result<Self, FormsError> {
        let trimmed = text.trim();
        match self.get(key) {
            Some(FieldValue::Items(items)) => {
                if trimmed.is_empty() {
                    return Ok(self);
                }
                let mut items = items.clone();
                items.push(trimmed.to_owned());
                Ok(self.set(key, FieldValue::Items(items)))
            }
            Some(_) => Err(FormsError::KindMismatch {
                key: key.to_owned(),
                expected: "list",
            }),
            None => Err(FormsError::UnknownField(key.to_owned())),
        }
    }

    /// Removes by index; an out-of-range index leaves the list untouched.
    pub fn remove_item(self, key: &str, index: usize) -> Result<Self, FormsError> {
        match self.get(key) {
            Some(FieldValue::Items(items)) => {
                if index >= items.len() {
                    return Ok(self);
                }
                let mut items = items.clone();
                items.remove(index);
                Ok(self.set(key, FieldValue::Items(items)))
            }
            Some(_) => Err(FormsError::KindMismatch {
                key: key.to_owned(),
                expected: "list",
            }),
            None => Err(FormsError::UnknownField(key.to_owned())),
        }
    }
}
