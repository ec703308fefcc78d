use arrow::datatypes::{DataType, TimeUnit};
use parqset_core::Value;

use crate::error::ArrowConvertError;

/// A cell checked against its column type, ready to append.
pub(super) enum ScalarValue<'a> {
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Utf8(Option<&'a str>),
    Binary(Option<&'a [u8]>),
    FixedSizeBinary(Option<&'a [u8]>),
    Date32(Option<i32>),
    Timestamp(TimeUnit, Option<i64>),
    Time32(TimeUnit, Option<i32>),
    Time64(TimeUnit, Option<i64>),
}

macro_rules! expect_variant {
    ($dt:expr, $value:expr, $variant:ident) => {
        match $value {
            Value::Null => None,
            Value::$variant(v) => Some(*v),
            other => return Err(mismatch($dt, other)),
        }
    };
}

fn mismatch(dt: &DataType, value: &Value) -> ArrowConvertError {
    ArrowConvertError::ValueType {
        expected: dt.to_string(),
        found: value.variant_name().to_string(),
    }
}

fn bytes<'a>(dt: &DataType, value: &'a Value) -> Result<Option<&'a [u8]>, ArrowConvertError> {
    match value {
        Value::Null => Ok(None),
        Value::Bytes(b) => Ok(Some(b.as_ref())),
        other => Err(mismatch(dt, other)),
    }
}

/// Check `value` against `dt`. Values must already be in canonical form.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: &'a Value,
) -> Result<ScalarValue<'a>, ArrowConvertError> {
    Ok(match dt {
        DataType::Boolean => ScalarValue::Boolean(expect_variant!(dt, value, Bool)),
        DataType::Int8 => ScalarValue::Int8(expect_variant!(dt, value, I8)),
        DataType::Int16 => ScalarValue::Int16(expect_variant!(dt, value, I16)),
        DataType::Int32 => ScalarValue::Int32(expect_variant!(dt, value, I32)),
        DataType::Int64 => ScalarValue::Int64(expect_variant!(dt, value, I64)),
        DataType::UInt8 => ScalarValue::UInt8(expect_variant!(dt, value, U8)),
        DataType::UInt16 => ScalarValue::UInt16(expect_variant!(dt, value, U16)),
        DataType::UInt32 => ScalarValue::UInt32(expect_variant!(dt, value, U32)),
        DataType::UInt64 => ScalarValue::UInt64(expect_variant!(dt, value, U64)),
        DataType::Float32 => ScalarValue::Float32(expect_variant!(dt, value, F32)),
        DataType::Float64 => ScalarValue::Float64(expect_variant!(dt, value, F64)),
        DataType::Utf8 => ScalarValue::Utf8(match value {
            Value::Null => None,
            Value::String(s) => Some(s.as_ref()),
            other => return Err(mismatch(dt, other)),
        }),
        DataType::Binary => ScalarValue::Binary(bytes(dt, value)?),
        DataType::FixedSizeBinary(width) => {
            let b = bytes(dt, value)?;
            if let Some(b) = b
                && i32::try_from(b.len()).ok() != Some(*width)
            {
                return Err(ArrowConvertError::ValueType {
                    expected: dt.to_string(),
                    found: format!("Bytes(len={})", b.len()),
                });
            }
            ScalarValue::FixedSizeBinary(b)
        }
        DataType::Date32 => ScalarValue::Date32(expect_variant!(dt, value, I32)),
        DataType::Timestamp(unit, _) => {
            ScalarValue::Timestamp(*unit, expect_variant!(dt, value, I64))
        }
        DataType::Time32(unit) => ScalarValue::Time32(*unit, expect_variant!(dt, value, I32)),
        DataType::Time64(unit) => ScalarValue::Time64(*unit, expect_variant!(dt, value, I64)),
        other => {
            return Err(ArrowConvertError::ValueType {
                expected: other.to_string(),
                found: value.variant_name().to_string(),
            });
        }
    })
}
