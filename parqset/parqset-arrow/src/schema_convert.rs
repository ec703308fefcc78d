use arrow::datatypes::{DataType, Field, Schema as ArrowSchema, TimeUnit as ArrowTimeUnit};
use parqset_core::{FieldKind, FieldSpec, FieldType, Schema, TimeUnit};

use crate::error::ArrowConvertError;

/// Convert a dataset schema to an Arrow schema, preserving field order.
pub fn schema_to_arrow(schema: &Schema) -> ArrowSchema {
    let fields: Vec<Field> = schema
        .fields()
        .map(|(name, spec)| Field::new(name, field_spec_to_datatype(spec), spec.is_nullable()))
        .collect();
    ArrowSchema::new(fields)
}

pub fn field_spec_to_datatype(spec: &FieldSpec) -> DataType {
    match spec.kind() {
        FieldKind::Scalar(t) => scalar_datatype(t),
        FieldKind::Temporal(FieldType::Time32, unit) => DataType::Time32(arrow_unit(unit)),
        FieldKind::Temporal(FieldType::Time64, unit) => DataType::Time64(arrow_unit(unit)),
        FieldKind::Temporal(_, unit) => DataType::Timestamp(arrow_unit(unit), None),
        // widths beyond i32 are unrepresentable on disk anyway
        FieldKind::FixedBinary(width) => {
            DataType::FixedSizeBinary(i32::try_from(width.get()).unwrap_or(i32::MAX))
        }
    }
}

fn scalar_datatype(t: FieldType) -> DataType {
    match t {
        FieldType::Bool => DataType::Boolean,
        FieldType::UInt8 => DataType::UInt8,
        FieldType::Int8 => DataType::Int8,
        FieldType::UInt16 => DataType::UInt16,
        FieldType::Int16 => DataType::Int16,
        FieldType::UInt32 => DataType::UInt32,
        FieldType::Int32 => DataType::Int32,
        FieldType::UInt64 => DataType::UInt64,
        FieldType::Int64 => DataType::Int64,
        FieldType::Float => DataType::Float32,
        FieldType::Double => DataType::Float64,
        FieldType::Utf8 => DataType::Utf8,
        FieldType::Binary => DataType::Binary,
        FieldType::Date32 => DataType::Date32,
        // parameterised types never appear as Scalar
        FieldType::FixedSizeBinary
        | FieldType::Timestamp
        | FieldType::Time32
        | FieldType::Time64 => DataType::Null,
    }
}

fn arrow_unit(unit: TimeUnit) -> ArrowTimeUnit {
    match unit {
        TimeUnit::Second => ArrowTimeUnit::Second,
        TimeUnit::Milli => ArrowTimeUnit::Millisecond,
        TimeUnit::Micro => ArrowTimeUnit::Microsecond,
        TimeUnit::Nano => ArrowTimeUnit::Nanosecond,
    }
}

fn unit_from_arrow(unit: &ArrowTimeUnit) -> TimeUnit {
    match unit {
        ArrowTimeUnit::Second => TimeUnit::Second,
        ArrowTimeUnit::Millisecond => TimeUnit::Milli,
        ArrowTimeUnit::Microsecond => TimeUnit::Micro,
        ArrowTimeUnit::Nanosecond => TimeUnit::Nano,
    }
}

/// Derive a dataset schema from an Arrow schema.
///
/// Fails on the first column whose type has no [`FieldType`] counterpart.
/// Large and view string/binary layouts map to UTF8 and BINARY.
pub fn arrow_to_schema(schema: &ArrowSchema) -> Result<Schema, ArrowConvertError> {
    let mut specs = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let spec = datatype_to_field_spec(field.data_type())
            .ok_or_else(|| ArrowConvertError::UnsupportedType {
                column: field.name().clone(),
                data_type: field.data_type().clone(),
            })?
            .with_nullable(field.is_nullable());
        specs.push((field.name().clone(), spec));
    }
    Ok(Schema::from_specs(specs)?)
}

fn datatype_to_field_spec(dt: &DataType) -> Option<FieldSpec> {
    let (field_type, unit, width) = match dt {
        DataType::Boolean => (FieldType::Bool, None, None),
        DataType::UInt8 => (FieldType::UInt8, None, None),
        DataType::Int8 => (FieldType::Int8, None, None),
        DataType::UInt16 => (FieldType::UInt16, None, None),
        DataType::Int16 => (FieldType::Int16, None, None),
        DataType::UInt32 => (FieldType::UInt32, None, None),
        DataType::Int32 => (FieldType::Int32, None, None),
        DataType::UInt64 => (FieldType::UInt64, None, None),
        DataType::Int64 => (FieldType::Int64, None, None),
        DataType::Float32 => (FieldType::Float, None, None),
        DataType::Float64 => (FieldType::Double, None, None),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => (FieldType::Utf8, None, None),
        DataType::Binary | DataType::LargeBinary | DataType::BinaryView => {
            (FieldType::Binary, None, None)
        }
        DataType::FixedSizeBinary(w) => (FieldType::FixedSizeBinary, None, Some(i64::from(*w))),
        DataType::Date32 => (FieldType::Date32, None, None),
        DataType::Timestamp(unit, _) => (FieldType::Timestamp, Some(unit_from_arrow(unit)), None),
        DataType::Time32(unit) => (FieldType::Time32, Some(unit_from_arrow(unit)), None),
        DataType::Time64(unit) => (FieldType::Time64, Some(unit_from_arrow(unit)), None),
        _ => return None,
    };
    FieldSpec::try_new("", field_type, unit, width).ok()
}
