use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, FixedSizeBinaryBuilder,
        Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
        StringBuilder, Time32MillisecondBuilder, Time32SecondBuilder, Time64MicrosecondBuilder,
        Time64NanosecondBuilder, TimestampMicrosecondBuilder, TimestampMillisecondBuilder,
        TimestampNanosecondBuilder, TimestampSecondBuilder, UInt8Builder, UInt16Builder,
        UInt32Builder, UInt64Builder,
    },
    datatypes::TimeUnit,
};

use super::scalar::ScalarValue;
use crate::error::ArrowConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .ok_or(ArrowConvertError::BuilderMismatch(stringify!($T)))?
    };
}

pub(super) fn append_scalar(
    builder: &mut Box<dyn ArrayBuilder>,
    scalar: &ScalarValue<'_>,
) -> Result<(), ArrowConvertError> {
    match scalar {
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder).append_option(*v),
        ScalarValue::Int8(v) => cast_builder!(builder, Int8Builder).append_option(*v),
        ScalarValue::Int16(v) => cast_builder!(builder, Int16Builder).append_option(*v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder).append_option(*v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder).append_option(*v),
        ScalarValue::UInt8(v) => cast_builder!(builder, UInt8Builder).append_option(*v),
        ScalarValue::UInt16(v) => cast_builder!(builder, UInt16Builder).append_option(*v),
        ScalarValue::UInt32(v) => cast_builder!(builder, UInt32Builder).append_option(*v),
        ScalarValue::UInt64(v) => cast_builder!(builder, UInt64Builder).append_option(*v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder).append_option(*v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder).append_option(*v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder).append_option(*v),
        ScalarValue::Binary(v) => cast_builder!(builder, BinaryBuilder).append_option(*v),
        ScalarValue::FixedSizeBinary(v) => {
            let b = cast_builder!(builder, FixedSizeBinaryBuilder);
            match v {
                Some(bytes) => b.append_value(bytes)?,
                None => b.append_null(),
            }
        }
        ScalarValue::Date32(v) => cast_builder!(builder, Date32Builder).append_option(*v),
        ScalarValue::Timestamp(unit, v) => match unit {
            TimeUnit::Second => cast_builder!(builder, TimestampSecondBuilder).append_option(*v),
            TimeUnit::Millisecond => {
                cast_builder!(builder, TimestampMillisecondBuilder).append_option(*v)
            }
            TimeUnit::Microsecond => {
                cast_builder!(builder, TimestampMicrosecondBuilder).append_option(*v)
            }
            TimeUnit::Nanosecond => {
                cast_builder!(builder, TimestampNanosecondBuilder).append_option(*v)
            }
        },
        ScalarValue::Time32(TimeUnit::Second, v) => {
            cast_builder!(builder, Time32SecondBuilder).append_option(*v)
        }
        ScalarValue::Time32(_, v) => {
            cast_builder!(builder, Time32MillisecondBuilder).append_option(*v)
        }
        ScalarValue::Time64(TimeUnit::Microsecond, v) => {
            cast_builder!(builder, Time64MicrosecondBuilder).append_option(*v)
        }
        ScalarValue::Time64(_, v) => {
            cast_builder!(builder, Time64NanosecondBuilder).append_option(*v)
        }
    }
    Ok(())
}
