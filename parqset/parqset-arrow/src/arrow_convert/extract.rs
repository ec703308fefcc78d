use arrow::{
    array::{Array, AsArray},
    datatypes::{
        DataType, Date32Type, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type,
        Int64Type, Time32MillisecondType, Time32SecondType, Time64MicrosecondType,
        Time64NanosecondType, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
        TimestampNanosecondType, TimestampSecondType, UInt8Type, UInt16Type, UInt32Type,
        UInt64Type,
    },
    record_batch::RecordBatch,
};
use parqset_core::{ArrayRow, Value};

/// Decode the cell at `row` of `array`.
///
/// Column types with no [`Value`] counterpart decode as [`Value::Null`], as
/// do null slots. `row` must be in bounds.
pub fn value_at(array: &dyn Array, row: usize) -> Value {
    if array.is_null(row) {
        return Value::Null;
    }

    match array.data_type() {
        DataType::Boolean => Value::Bool(array.as_boolean().value(row)),
        DataType::Int8 => Value::I8(array.as_primitive::<Int8Type>().value(row)),
        DataType::Int16 => Value::I16(array.as_primitive::<Int16Type>().value(row)),
        DataType::Int32 => Value::I32(array.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => Value::I64(array.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::U8(array.as_primitive::<UInt8Type>().value(row)),
        DataType::UInt16 => Value::U16(array.as_primitive::<UInt16Type>().value(row)),
        DataType::UInt32 => Value::U32(array.as_primitive::<UInt32Type>().value(row)),
        DataType::UInt64 => Value::U64(array.as_primitive::<UInt64Type>().value(row)),
        DataType::Float32 => Value::F32(array.as_primitive::<Float32Type>().value(row)),
        DataType::Float64 => Value::F64(array.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => Value::string(array.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Value::string(array.as_string::<i64>().value(row)),
        DataType::Utf8View => Value::string(array.as_string_view().value(row)),
        DataType::Binary => Value::bytes(array.as_binary::<i32>().value(row)),
        DataType::LargeBinary => Value::bytes(array.as_binary::<i64>().value(row)),
        DataType::BinaryView => Value::bytes(array.as_binary_view().value(row)),
        DataType::FixedSizeBinary(_) => Value::bytes(array.as_fixed_size_binary().value(row)),
        DataType::Date32 => Value::I32(array.as_primitive::<Date32Type>().value(row)),
        DataType::Timestamp(unit, _) => Value::I64(match unit {
            TimeUnit::Second => array.as_primitive::<TimestampSecondType>().value(row),
            TimeUnit::Millisecond => array.as_primitive::<TimestampMillisecondType>().value(row),
            TimeUnit::Microsecond => array.as_primitive::<TimestampMicrosecondType>().value(row),
            TimeUnit::Nanosecond => array.as_primitive::<TimestampNanosecondType>().value(row),
        }),
        DataType::Time32(TimeUnit::Second) => {
            Value::I32(array.as_primitive::<Time32SecondType>().value(row))
        }
        DataType::Time32(TimeUnit::Millisecond) => {
            Value::I32(array.as_primitive::<Time32MillisecondType>().value(row))
        }
        DataType::Time64(TimeUnit::Microsecond) => {
            Value::I64(array.as_primitive::<Time64MicrosecondType>().value(row))
        }
        DataType::Time64(TimeUnit::Nanosecond) => {
            Value::I64(array.as_primitive::<Time64NanosecondType>().value(row))
        }
        _ => Value::Null,
    }
}

/// Decode every column of `row` in column order.
pub fn record_batch_row(batch: &RecordBatch, row: usize) -> ArrayRow {
    batch
        .columns()
        .iter()
        .map(|column| value_at(column.as_ref(), row))
        .collect()
}
