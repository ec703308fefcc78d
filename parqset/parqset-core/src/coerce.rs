//! Conversion of loosely typed input values to a field's canonical value.

use crate::{
    error::CoercionError,
    schema::{FieldSpec, FieldType},
    value::Value,
};

/// Coerce `value` to the canonical [`Value`] variant for `spec`.
///
/// | field type                    | canonical variant |
/// |-------------------------------|-------------------|
/// | BOOL                          | `Bool`            |
/// | INT*/UINT*                    | same-width integer |
/// | FLOAT / DOUBLE                | `F32` / `F64`     |
/// | UTF8                          | `String`          |
/// | BINARY / FIXED_SIZE_BINARY    | `Bytes`           |
/// | DATE32 / TIME32               | `I32`             |
/// | TIMESTAMP / TIME64            | `I64`             |
///
/// Integers convert between widths when the value fits; floats convert to
/// integers only when integral. `Null` is accepted only for nullable fields.
pub fn coerce(field: &str, value: &Value, spec: &FieldSpec) -> Result<Value, CoercionError> {
    let field_type = spec.field_type();
    let mismatch = || CoercionError::new(field, expected_name(spec), value.variant_name());

    if value.is_null() {
        return if spec.is_nullable() {
            Ok(Value::Null)
        } else {
            Err(CoercionError::new(
                field,
                format!("non-null {}", expected_name(spec)),
                "Null",
            ))
        };
    }

    let coerced = match field_type {
        FieldType::Bool => value.as_bool().map(Value::Bool),
        FieldType::Int8 => integer(value).and_then(|v| i8::try_from(v).ok()).map(Value::I8),
        FieldType::Int16 => integer(value).and_then(|v| i16::try_from(v).ok()).map(Value::I16),
        FieldType::Int32 | FieldType::Date32 | FieldType::Time32 => {
            integer(value).and_then(|v| i32::try_from(v).ok()).map(Value::I32)
        }
        FieldType::Int64 | FieldType::Timestamp | FieldType::Time64 => {
            integer(value).and_then(|v| i64::try_from(v).ok()).map(Value::I64)
        }
        FieldType::UInt8 => integer(value).and_then(|v| u8::try_from(v).ok()).map(Value::U8),
        FieldType::UInt16 => integer(value).and_then(|v| u16::try_from(v).ok()).map(Value::U16),
        FieldType::UInt32 => integer(value).and_then(|v| u32::try_from(v).ok()).map(Value::U32),
        FieldType::UInt64 => integer(value).and_then(|v| u64::try_from(v).ok()).map(Value::U64),
        FieldType::Float => value.as_f64().and_then(|v| {
            // finite input must stay finite after narrowing
            let narrowed = v as f32;
            (narrowed.is_finite() || !v.is_finite()).then_some(Value::F32(narrowed))
        }),
        FieldType::Double => value.as_f64().map(Value::F64),
        FieldType::Utf8 => value.as_str().map(Value::string),
        FieldType::Binary => value.as_bytes().map(Value::bytes),
        FieldType::FixedSizeBinary => {
            let bytes = value.as_bytes().ok_or_else(mismatch)?;
            let width = spec.width().unwrap_or_default();
            if bytes.len() != width {
                return Err(CoercionError::new(
                    field,
                    expected_name(spec),
                    format!("Bytes(len={})", bytes.len()),
                ));
            }
            Some(Value::bytes(bytes))
        }
    };

    coerced.ok_or_else(mismatch)
}

fn integer(value: &Value) -> Option<i128> {
    if let Some(v) = value.as_i128() {
        return Some(v);
    }
    match value {
        Value::F32(v) => integral_float((*v).into()),
        Value::F64(v) => integral_float(*v),
        _ => None,
    }
}

fn integral_float(v: f64) -> Option<i128> {
    // i64 range covers every integer column; larger floats are rejected.
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= 9.223_372_036_854_775e18 {
        Some(v as i128)
    } else {
        None
    }
}

fn expected_name(spec: &FieldSpec) -> String {
    match (spec.unit(), spec.width()) {
        (Some(unit), _) => format!("{}({unit})", spec.field_type()),
        (_, Some(width)) => format!("{}({width})", spec.field_type()),
        _ => spec.field_type().to_string(),
    }
}
