use std::{fmt, num::NonZeroUsize};

use crate::error::SchemaError;

/// Symbolic field type understood by the columnar engine.
///
/// [`FieldType::code`] yields the engine's numeric id (the Arrow columnar
/// type id), so schemas never carry magic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float,
    Double,
    Utf8,
    Binary,
    FixedSizeBinary,
    Date32,
    Timestamp,
    Time32,
    Time64,
}

impl FieldType {
    pub const ALL: [FieldType; 18] = [
        FieldType::Bool,
        FieldType::UInt8,
        FieldType::Int8,
        FieldType::UInt16,
        FieldType::Int16,
        FieldType::UInt32,
        FieldType::Int32,
        FieldType::UInt64,
        FieldType::Int64,
        FieldType::Float,
        FieldType::Double,
        FieldType::Utf8,
        FieldType::Binary,
        FieldType::FixedSizeBinary,
        FieldType::Date32,
        FieldType::Timestamp,
        FieldType::Time32,
        FieldType::Time64,
    ];

    pub fn code(self) -> i32 {
        match self {
            FieldType::Bool => 1,
            FieldType::UInt8 => 2,
            FieldType::Int8 => 3,
            FieldType::UInt16 => 4,
            FieldType::Int16 => 5,
            FieldType::UInt32 => 6,
            FieldType::Int32 => 7,
            FieldType::UInt64 => 8,
            FieldType::Int64 => 9,
            FieldType::Float => 11,
            FieldType::Double => 12,
            FieldType::Utf8 => 13,
            FieldType::Binary => 14,
            FieldType::FixedSizeBinary => 15,
            FieldType::Date32 => 16,
            FieldType::Timestamp => 18,
            FieldType::Time32 => 19,
            FieldType::Time64 => 20,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Bool => "BOOL",
            FieldType::UInt8 => "UINT8",
            FieldType::Int8 => "INT8",
            FieldType::UInt16 => "UINT16",
            FieldType::Int16 => "INT16",
            FieldType::UInt32 => "UINT32",
            FieldType::Int32 => "INT32",
            FieldType::UInt64 => "UINT64",
            FieldType::Int64 => "INT64",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Utf8 => "UTF8",
            FieldType::Binary => "BINARY",
            FieldType::FixedSizeBinary => "FIXED_SIZE_BINARY",
            FieldType::Date32 => "DATE32",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Time32 => "TIME32",
            FieldType::Time64 => "TIME64",
        }
    }

    /// Whether the type needs a [`TimeUnit`] to be fully specified.
    pub fn requires_unit(self) -> bool {
        matches!(
            self,
            FieldType::Timestamp | FieldType::Time32 | FieldType::Time64
        )
    }

    /// Whether the type needs a byte width to be fully specified.
    pub fn requires_width(self) -> bool {
        matches!(self, FieldType::FixedSizeBinary)
    }

    pub fn supports_unit(self, unit: TimeUnit) -> bool {
        match self {
            FieldType::Timestamp => true,
            FieldType::Time32 => matches!(unit, TimeUnit::Second | TimeUnit::Milli),
            FieldType::Time64 => matches!(unit, TimeUnit::Micro | TimeUnit::Nano),
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution of a temporal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Milli,
    Micro,
    Nano,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Second,
        TimeUnit::Milli,
        TimeUnit::Micro,
        TimeUnit::Nano,
    ];

    pub fn code(self) -> i32 {
        match self {
            TimeUnit::Second => 0,
            TimeUnit::Milli => 1,
            TimeUnit::Micro => 2,
            TimeUnit::Nano => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Second => "SECOND",
            TimeUnit::Milli => "MILLI",
            TimeUnit::Micro => "MICRO",
            TimeUnit::Nano => "NANO",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type family of a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(FieldType),
    Temporal(FieldType, TimeUnit),
    FixedBinary(NonZeroUsize),
}

/// Validated description of one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    kind: FieldKind,
    nullable: bool,
}

impl FieldSpec {
    /// Validate a field description.
    ///
    /// `unit` is required iff the type is temporal and `width` is required iff
    /// the type is fixed-size binary; `width` must be positive.
    pub fn try_new(
        field: &str,
        field_type: FieldType,
        unit: Option<TimeUnit>,
        width: Option<i64>,
    ) -> Result<Self, SchemaError> {
        if !field_type.requires_width() && width.is_some() {
            return Err(SchemaError::UnexpectedWidth {
                field: field.to_string(),
                field_type: field_type.to_string(),
            });
        }
        if !field_type.requires_unit() && unit.is_some() {
            return Err(SchemaError::UnexpectedUnit {
                field: field.to_string(),
                field_type: field_type.to_string(),
            });
        }

        let kind = if field_type.requires_unit() {
            let unit = unit.ok_or_else(|| SchemaError::MissingUnit {
                field: field.to_string(),
                field_type: field_type.to_string(),
            })?;
            if !field_type.supports_unit(unit) {
                return Err(SchemaError::UnsupportedUnit {
                    field: field.to_string(),
                    field_type: field_type.to_string(),
                    unit: unit.to_string(),
                });
            }
            FieldKind::Temporal(field_type, unit)
        } else if field_type.requires_width() {
            let width = width
                .and_then(|w| usize::try_from(w).ok())
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| SchemaError::MissingWidth {
                    field: field.to_string(),
                    field_type: field_type.to_string(),
                })?;
            FieldKind::FixedBinary(width)
        } else {
            FieldKind::Scalar(field_type)
        };

        Ok(Self {
            kind,
            nullable: false,
        })
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Scalar(t) | FieldKind::Temporal(t, _) => t,
            FieldKind::FixedBinary(_) => FieldType::FixedSizeBinary,
        }
    }

    pub fn unit(&self) -> Option<TimeUnit> {
        match self.kind {
            FieldKind::Temporal(_, unit) => Some(unit),
            _ => None,
        }
    }

    pub fn width(&self) -> Option<usize> {
        match self.kind {
            FieldKind::FixedBinary(w) => Some(w.get()),
            _ => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}
