use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell of a component record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) if value.is_finite() => Some(*value),
            FieldValue::Number(_) | FieldValue::Null => None,
            FieldValue::Text(text) => parse_numeric_value(text),
        }
    }

    pub fn display(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Number(value) => format_number(*value),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One catalog item: an ordered mapping from field name to value.
///
/// The set of recognised fields is configuration; nothing here enforces a
/// schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRecord {
    fields: IndexMap<String, FieldValue>,
}

impl ComponentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Text of a field, `None` when absent, null or empty.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field)
            .map(FieldValue::display)
            .filter(|text| !text.trim().is_empty())
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn display(&self, field: &str) -> String {
        self.get(field).map(FieldValue::display).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Case-insensitive match of `needle` against every field's display text.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.fields
            .values()
            .any(|value| value.display().to_lowercase().contains(&needle))
    }
}

/// Field names holding the commercial values of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingFields {
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub labor_charge: &'static str,
}

impl PricingFields {
    /// Built-in panelboard and star-delta catalogs.
    pub const CATALOG: PricingFields = PricingFields {
        quantity: "quantity",
        unit_price: "price",
        labor_charge: "laborCharge",
    };

    /// Rows staged from an uploaded component sheet.
    pub const IMPORTED: PricingFields = PricingFields {
        quantity: "Qty",
        unit_price: "Unit_Cost",
        labor_charge: "Labour_Cost",
    };
}

pub fn parse_numeric_value(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("12", Some(12.0))]
    #[case(" 1,250.5 ", Some(1250.5))]
    #[case("", None)]
    #[case("n/a", None)]
    #[case("inf", None)]
    fn parse_numeric_value_is_lenient(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_numeric_value(text), expected);
    }

    #[test]
    fn format_number_trims_trailing_zeros() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn record_preserves_field_order_and_reads_numbers_from_text() {
        let record = ComponentRecord::new()
            .with("Qty", "3")
            .with("Item_Name", "MCB 6A")
            .with("Unit_Cost", FieldValue::Null);

        let keys: Vec<&str> = record.fields().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["Qty", "Item_Name", "Unit_Cost"]);
        assert_eq!(record.number("Qty"), Some(3.0));
        assert_eq!(record.number("Unit_Cost"), None);
        assert_eq!(record.text("Unit_Cost"), None);
    }

    #[test]
    fn matches_text_is_case_insensitive() {
        let record = ComponentRecord::new().with("description", "Main Contactor 50A");
        assert!(record.matches_text("contactor"));
        assert!(record.matches_text("  "));
        assert!(!record.matches_text("relay"));
    }

    #[test]
    fn record_serializes_as_plain_object() {
        let record = ComponentRecord::new().with("Qty", 2_i64).with("Remarks", "spare");
        let json = serde_json::to_string(&record).expect("record should serialize");
        assert_eq!(json, r#"{"Qty":2.0,"Remarks":"spare"}"#);

        let back: ComponentRecord = serde_json::from_str(&json).expect("record should parse");
        assert_eq!(back, record);
    }
}
