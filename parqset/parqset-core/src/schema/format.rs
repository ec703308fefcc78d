use std::fmt::Write as _;

use super::{FieldKind, Schema};

/// Format a schema one field per line:
/// `name: { type: TIMESTAMP, unit: MILLI, nullable: false }`.
pub fn format_schema(schema: &Schema) -> String {
    let mut out = String::new();

    for (name, spec) in schema.fields() {
        let _ = write!(out, "{name}: {{ type: {}", spec.field_type());
        match spec.kind() {
            FieldKind::Temporal(_, unit) => {
                let _ = write!(out, ", unit: {unit}");
            }
            FieldKind::FixedBinary(width) => {
                let _ = write!(out, ", width: {width}");
            }
            FieldKind::Scalar(_) => {}
        }
        let _ = writeln!(out, ", nullable: {} }}", spec.is_nullable());
    }

    out
}
