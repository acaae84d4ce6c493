use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Job result returned by the DOX results endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResult {
    pub extraction: Extraction,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    #[serde(default)]
    pub header_fields: Vec<ExtractedField>,

    /// Each group is one purchase-order line.
    #[serde(default)]
    pub line_items: Vec<Vec<ExtractedField>>,
}

/// A single name/value pair. DOX also reports confidence, coordinates and
/// similar metadata per field; only the name and value are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedField {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl ExtractedField {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Name-indexed view over a field group. Later duplicates win.
#[derive(Debug, Default)]
pub struct FieldMap<'a> {
    fields: HashMap<&'a str, &'a Value>,
}

impl<'a> FieldMap<'a> {
    pub fn new(fields: &'a [ExtractedField]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|f| (f.name.as_str(), &f.value))
                .collect(),
        }
    }

    /// Text of `name`, or `placeholder` when the field was not extracted.
    pub fn get_or(&self, name: &str, placeholder: &str) -> String {
        match self.fields.get(name) {
            Some(value) => value_text(value),
            None => placeholder.to_string(),
        }
    }
}

/// Strings render as-is, null as empty, anything else as its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
