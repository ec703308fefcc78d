//! Conversion between dataset values and JSON.

use anyhow::{Result, bail};
use parqset::{FieldSpec, FieldType, Value};
use serde_json::{Map, Number, Value as Json};

/// Render a cell as JSON. Bytes become an array of octets; non-finite
/// floats become `null`.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(v) => Json::Bool(*v),
        Value::I8(v) => Json::from(*v),
        Value::I16(v) => Json::from(*v),
        Value::I32(v) => Json::from(*v),
        Value::I64(v) => Json::from(*v),
        Value::U8(v) => Json::from(*v),
        Value::U16(v) => Json::from(*v),
        Value::U32(v) => Json::from(*v),
        Value::U64(v) => Json::from(*v),
        Value::F32(v) => Number::from_f64(f64::from(*v)).map_or(Json::Null, Json::Number),
        Value::F64(v) => Number::from_f64(*v).map_or(Json::Null, Json::Number),
        Value::String(v) => Json::String(v.to_string()),
        Value::Bytes(v) => Json::Array(v.iter().map(|b| Json::from(*b)).collect()),
    }
}

/// Render a row as a JSON object in column order.
pub fn row_to_object(columns: &[String], row: &[Value]) -> Json {
    let map: Map<String, Json> = columns
        .iter()
        .zip(row)
        .map(|(name, value)| (name.clone(), value_to_json(value)))
        .collect();
    Json::Object(map)
}

/// Parse one JSON cell for a field.
///
/// Binary fields accept an array of octets or a string (its UTF-8 bytes);
/// range and type checks are left to schema coercion.
pub fn json_to_value(field: &str, json: &Json, spec: &FieldSpec) -> Result<Value> {
    let binary = matches!(
        spec.field_type(),
        FieldType::Binary | FieldType::FixedSizeBinary
    );
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(*v),
        Json::Number(n) => number(n),
        Json::String(s) if binary => Value::bytes(s.as_bytes()),
        Json::String(s) => Value::string(s),
        Json::Array(items) if binary => {
            let bytes = items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>();
            match bytes {
                Some(bytes) => Value::from(bytes),
                None => bail!("field '{field}': expected an array of octets"),
            }
        }
        Json::Array(_) | Json::Object(_) => {
            bail!("field '{field}': nested JSON values are not supported")
        }
    })
}

fn number(n: &Number) -> Value {
    if let Some(v) = n.as_i64() {
        Value::I64(v)
    } else if let Some(v) = n.as_u64() {
        Value::U64(v)
    } else {
        Value::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use parqset::{RawFieldSpec, Schema, type_catalog};

    use super::*;

    fn spec(raw: RawFieldSpec) -> FieldSpec {
        let schema = Schema::try_new(type_catalog(), [("f", raw)]).unwrap();
        *schema.spec_of("f").unwrap()
    }

    #[test]
    fn numbers_keep_their_widest_exact_form() {
        let int = spec(RawFieldSpec::new("INT64"));
        let json: Json = serde_json::from_str("[-3, 18446744073709551615, 1.5]").unwrap();
        let Json::Array(items) = json else {
            unreachable!()
        };
        assert_eq!(json_to_value("f", &items[0], &int).unwrap(), Value::I64(-3));
        assert_eq!(
            json_to_value("f", &items[1], &int).unwrap(),
            Value::U64(u64::MAX)
        );
        assert_eq!(json_to_value("f", &items[2], &int).unwrap(), Value::F64(1.5));
    }

    #[test]
    fn binary_fields_accept_octets_or_text() {
        let bin = spec(RawFieldSpec::new("BINARY"));
        assert_eq!(
            json_to_value("f", &serde_json::json!([1, 2, 255]), &bin).unwrap(),
            Value::bytes([1, 2, 255])
        );
        assert_eq!(
            json_to_value("f", &serde_json::json!("hi"), &bin).unwrap(),
            Value::bytes(b"hi")
        );
        assert!(json_to_value("f", &serde_json::json!([256]), &bin).is_err());

        let text = spec(RawFieldSpec::new("UTF8"));
        assert!(json_to_value("f", &serde_json::json!([1]), &text).is_err());
    }

    #[test]
    fn rows_render_in_column_order() {
        let columns = vec!["z".to_string(), "a".to_string()];
        let row = [Value::bytes([7]), Value::F64(f64::INFINITY)];
        assert_eq!(
            serde_json::to_string(&row_to_object(&columns, &row)).unwrap(),
            r#"{"z":[7],"a":null}"#
        );
    }
}
