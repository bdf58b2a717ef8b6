//! Answer schemas
//!
//! A schema lists the answer fields of an assignment type under their local
//! attribute names. Types opt in through [`AnswerSchema`]; the mapping from
//! marketplace question names to attributes is derived from it.

use std::collections::HashMap;

use crate::domain::answer::{AnswerField, AnswerInput, AnswerValue, FieldSlot};
use crate::error::{CoreError, Result};

/// Ordered list of `(attribute name, field)` declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, AnswerField)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. A repeated attribute name replaces the earlier declaration.
    pub fn field(mut self, attribute: impl Into<String>, field: AnswerField) -> Self {
        let attribute = attribute.into();
        match self.fields.iter_mut().find(|(name, _)| *name == attribute) {
            Some(existing) => existing.1 = field,
            None => self.fields.push((attribute, field)),
        }
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&AnswerField> {
        self.fields
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, field)| field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerField)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Question name to attribute name.
    pub fn question_mapping(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|(attribute, field)| (field.question_name().to_string(), attribute.clone()))
            .collect()
    }
}

/// Types whose assignments decode into typed answers.
pub trait AnswerSchema {
    fn schema() -> Schema;
}

/// Question name to attribute name mapping for a schema type.
pub fn build_schema_mapping<S: AnswerSchema>() -> HashMap<String, String> {
    S::schema().question_mapping()
}

/// Per-record answer storage: one slot per declared field.
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    schema: Schema,
    slots: HashMap<String, FieldSlot>,
}

impl AnswerSheet {
    pub fn new(schema: Schema) -> Self {
        let slots = schema
            .iter()
            .map(|(attribute, _)| (attribute.to_string(), FieldSlot::Unset))
            .collect();
        Self { schema, slots }
    }

    pub fn for_schema<S: AnswerSchema>() -> Self {
        Self::new(S::schema())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Coerce `input` through the field's policy and store it.
    pub fn set(&mut self, attribute: &str, input: impl Into<AnswerInput>) -> Result<()> {
        let field = self
            .schema
            .get(attribute)
            .ok_or_else(|| CoreError::UnknownField(attribute.to_string()))?;
        let slot = field.coerce(input.into())?;
        self.slots.insert(attribute.to_string(), slot);
        Ok(())
    }

    /// Current value, falling back to the field default while unset.
    pub fn get(&self, attribute: &str) -> Option<AnswerValue> {
        let field = self.schema.get(attribute)?;
        let slot = self.slots.get(attribute).cloned().unwrap_or_default();
        field.resolve(&slot)
    }

    pub fn is_unset(&self, attribute: &str) -> bool {
        self.slots.get(attribute).map_or(true, FieldSlot::is_unset)
    }

    pub fn text(&self, attribute: &str) -> Option<String> {
        self.get(attribute)
            .and_then(|value| value.as_text().map(str::to_string))
    }

    pub fn boolean(&self, attribute: &str) -> Option<bool> {
        self.get(attribute).and_then(|value| value.as_bool())
    }

    pub fn integer(&self, attribute: &str) -> Option<i64> {
        self.get(attribute).and_then(|value| value.as_integer())
    }

    pub fn decimal(&self, attribute: &str) -> Option<rust_decimal::Decimal> {
        self.get(attribute).and_then(|value| value.as_decimal())
    }

    /// Selected choices; empty when unset and no default is declared.
    pub fn choices(&self, attribute: &str) -> Vec<String> {
        self.get(attribute)
            .and_then(|value| value.as_choices().map(<[String]>::to_vec))
            .unwrap_or_default()
    }
}
