//! Typed answer fields
//!
//! An [`AnswerField`] describes one question of a submitted assignment: the
//! question name used by the marketplace, the value type it decodes to and an
//! optional default. Fields are declared once per schema and are stateless;
//! the per-assignment value lives in a [`FieldSlot`] owned by the record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Separator between selected options of a multi-choice answer.
pub const MULTI_CHOICE_DELIMITER: char = '|';

/// A decoded answer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AnswerValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            AnswerValue::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(choices) => Some(choices),
            _ => None,
        }
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Boolean(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Integer(value)
    }
}

impl From<Decimal> for AnswerValue {
    fn from(value: Decimal) -> Self {
        AnswerValue::Decimal(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Choices(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(value: Vec<&str>) -> Self {
        AnswerValue::Choices(value.into_iter().map(str::to_string).collect())
    }
}

/// Input to a field's set operation.
///
/// Raw text is what the marketplace returns and goes through the field's
/// coercion rules. Already-typed values skip text parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerInput {
    Absent,
    Text(String),
    Value(AnswerValue),
}

impl From<Option<&str>> for AnswerInput {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(text) => AnswerInput::Text(text.to_string()),
            None => AnswerInput::Absent,
        }
    }
}

impl From<&str> for AnswerInput {
    fn from(value: &str) -> Self {
        AnswerInput::Text(value.to_string())
    }
}

impl From<String> for AnswerInput {
    fn from(value: String) -> Self {
        AnswerInput::Text(value)
    }
}

impl From<AnswerValue> for AnswerInput {
    fn from(value: AnswerValue) -> Self {
        AnswerInput::Value(value)
    }
}

impl From<bool> for AnswerInput {
    fn from(value: bool) -> Self {
        AnswerInput::Value(AnswerValue::Boolean(value))
    }
}

impl From<i64> for AnswerInput {
    fn from(value: i64) -> Self {
        AnswerInput::Value(AnswerValue::Integer(value))
    }
}

impl From<Decimal> for AnswerInput {
    fn from(value: Decimal) -> Self {
        AnswerInput::Value(AnswerValue::Decimal(value))
    }
}

impl From<Vec<String>> for AnswerInput {
    fn from(value: Vec<String>) -> Self {
        AnswerInput::Value(AnswerValue::Choices(value))
    }
}

impl From<Vec<&str>> for AnswerInput {
    fn from(value: Vec<&str>) -> Self {
        AnswerInput::Value(AnswerValue::from(value))
    }
}

/// Stored state of one field on one record.
///
/// `Unset` is distinct from every legal value, including `false`, `0`,
/// the empty string and the empty list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldSlot {
    #[default]
    Unset,
    Set(AnswerValue),
}

impl FieldSlot {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldSlot::Unset)
    }
}

/// Value type of an answer field and its coercion policy.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerKind {
    Text,
    Boolean { mapping: BTreeMap<String, bool> },
    Integer,
    Decimal,
    MultiChoice,
}

impl AnswerKind {
    /// The `"1"` / `"0"` table used by checkbox-style questions.
    pub fn default_boolean_mapping() -> BTreeMap<String, bool> {
        BTreeMap::from([("1".to_string(), true), ("0".to_string(), false)])
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnswerKind::Text => "text",
            AnswerKind::Boolean { .. } => "boolean",
            AnswerKind::Integer => "integer",
            AnswerKind::Decimal => "decimal",
            AnswerKind::MultiChoice => "multi-choice",
        }
    }
}

/// Declaration of one answer on an assignment schema.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerField {
    question_name: String,
    kind: AnswerKind,
    default: Option<AnswerValue>,
}

impl AnswerField {
    fn new(question_name: impl Into<String>, kind: AnswerKind) -> Self {
        Self {
            question_name: question_name.into(),
            kind,
            default: None,
        }
    }

    /// Free-text answer, stored verbatim.
    pub fn text(question_name: impl Into<String>) -> Self {
        Self::new(question_name, AnswerKind::Text)
    }

    /// Boolean answer using the `"1"`/`"0"` mapping.
    pub fn boolean(question_name: impl Into<String>) -> Self {
        Self::new(
            question_name,
            AnswerKind::Boolean {
                mapping: AnswerKind::default_boolean_mapping(),
            },
        )
    }

    /// Boolean answer with a custom text-to-bool table.
    pub fn boolean_with_mapping<K: Into<String>>(
        question_name: impl Into<String>,
        mapping: impl IntoIterator<Item = (K, bool)>,
    ) -> Self {
        let mapping = mapping.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::new(question_name, AnswerKind::Boolean { mapping })
    }

    /// Integer answer. Values outside the `i64` range fail to coerce.
    pub fn integer(question_name: impl Into<String>) -> Self {
        Self::new(question_name, AnswerKind::Integer)
    }

    /// Decimal answer; plain and scientific notation (`1e5`) are accepted.
    pub fn decimal(question_name: impl Into<String>) -> Self {
        Self::new(question_name, AnswerKind::Decimal)
    }

    /// Multi-select answer; raw text is split on [`MULTI_CHOICE_DELIMITER`].
    pub fn multi_choice(question_name: impl Into<String>) -> Self {
        Self::new(question_name, AnswerKind::MultiChoice)
    }

    /// Value returned while the field is unset. Defaults are taken as-is and
    /// never run through coercion.
    pub fn with_default(mut self, default: impl Into<AnswerValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn question_name(&self) -> &str {
        &self.question_name
    }

    pub fn kind(&self) -> &AnswerKind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&AnswerValue> {
        self.default.as_ref()
    }

    /// Convert an input into the slot to store.
    pub fn coerce(&self, input: AnswerInput) -> Result<FieldSlot> {
        let text = match input {
            AnswerInput::Absent => return Ok(FieldSlot::Unset),
            AnswerInput::Value(value) => return self.coerce_value(value),
            AnswerInput::Text(text) => text,
        };

        let slot = match &self.kind {
            AnswerKind::Text => FieldSlot::Set(AnswerValue::Text(text)),
            AnswerKind::Boolean { mapping } => match mapping.get(&text) {
                Some(value) => FieldSlot::Set(AnswerValue::Boolean(*value)),
                None => FieldSlot::Unset,
            },
            AnswerKind::Integer => {
                let value = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| CoreError::coercion(&self.question_name, text.clone(), "integer"))?;
                FieldSlot::Set(AnswerValue::Integer(value))
            }
            AnswerKind::Decimal => {
                let trimmed = text.trim();
                let value = Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map_err(|_| CoreError::coercion(&self.question_name, text.clone(), "decimal"))?;
                FieldSlot::Set(AnswerValue::Decimal(value))
            }
            AnswerKind::MultiChoice => {
                if text.is_empty() {
                    FieldSlot::Unset
                } else {
                    let choices = text
                        .split(MULTI_CHOICE_DELIMITER)
                        .map(str::to_string)
                        .collect();
                    FieldSlot::Set(AnswerValue::Choices(choices))
                }
            }
        };

        Ok(slot)
    }

    fn coerce_value(&self, value: AnswerValue) -> Result<FieldSlot> {
        let value = match (&self.kind, value) {
            (AnswerKind::Integer, AnswerValue::Integer(v)) => AnswerValue::Integer(v),
            (AnswerKind::Integer, other) => {
                return Err(CoreError::coercion(
                    &self.question_name,
                    format!("{:?}", other),
                    "integer",
                ))
            }
            (AnswerKind::Decimal, AnswerValue::Decimal(v)) => AnswerValue::Decimal(v),
            (AnswerKind::Decimal, AnswerValue::Integer(v)) => AnswerValue::Decimal(Decimal::from(v)),
            (AnswerKind::Decimal, other) => {
                return Err(CoreError::coercion(
                    &self.question_name,
                    format!("{:?}", other),
                    "decimal",
                ))
            }
            // Text, boolean and multi-choice fields keep typed input verbatim.
            (_, other) => other,
        };

        Ok(FieldSlot::Set(value))
    }

    /// Resolve a stored slot into the value seen by callers.
    pub fn resolve(&self, slot: &FieldSlot) -> Option<AnswerValue> {
        match slot {
            FieldSlot::Set(value) => Some(value.clone()),
            FieldSlot::Unset => match (&self.default, &self.kind) {
                (Some(default), _) => Some(default.clone()),
                (None, AnswerKind::MultiChoice) => Some(AnswerValue::Choices(Vec::new())),
                (None, _) => None,
            },
        }
    }
}
