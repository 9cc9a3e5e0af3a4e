use serde::Deserialize;

use crate::error::{TableError, TableKind};

/// A numeric field as it appears in the source tables: a JSON number, a numeric
/// string such as `"0.150"`, or something else entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumericField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumericField {
    pub(crate) fn parse(&self, table: TableKind, key: &str, field: &str) -> Result<f64, TableError> {
        let parsed = match self {
            NumericField::Number(value) => Some(*value),
            NumericField::Text(text) => text.trim().parse::<f64>().ok(),
            NumericField::Other(_) => None,
        };

        match parsed {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(TableError::InvalidWeightFormat {
                table,
                key: key.to_string(),
                field: field.to_string(),
                value: self.raw(),
            }),
        }
    }

    pub(crate) fn parse_integer(
        &self,
        table: TableKind,
        key: &str,
        field: &str,
    ) -> Result<i64, TableError> {
        let value = self.parse(table, key, field)?;
        if value.fract() != 0.0 {
            return Err(TableError::InvalidWeightFormat {
                table,
                key: key.to_string(),
                field: field.to_string(),
                value: self.raw(),
            });
        }
        Ok(value as i64)
    }

    fn raw(&self) -> String {
        match self {
            NumericField::Number(value) => value.to_string(),
            NumericField::Text(text) => text.clone(),
            NumericField::Other(value) => value.to_string(),
        }
    }
}

pub(crate) fn parse_optional(
    field: Option<&NumericField>,
    table: TableKind,
    key: &str,
    name: &str,
) -> Result<f64, TableError> {
    match field {
        Some(value) => value.parse(table, key, name),
        None => Ok(0.0),
    }
}
