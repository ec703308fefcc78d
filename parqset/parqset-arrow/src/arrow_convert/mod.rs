//! Conversion between array rows and Arrow `RecordBatch`es.
//!
//! Writing goes through [`RowBuffer`], which accumulates rows in one Arrow
//! builder per column until a batch is cut. Reading goes through
//! [`value_at`], which decodes a single cell back into a [`Value`].

mod append;
mod builder;
mod extract;
mod scalar;

use arrow::{
    array::{ArrayBuilder, ArrayRef},
    datatypes::SchemaRef,
    record_batch::RecordBatch,
};
use parqset_core::{ArrayRow, Value};

pub use extract::{record_batch_row, value_at};

use crate::error::ArrowConvertError;

/// Column builders for the rows of one in-progress batch.
pub struct RowBuffer {
    schema: SchemaRef,
    builders: Vec<Box<dyn ArrayBuilder>>,
    len: usize,
}

impl RowBuffer {
    pub fn try_new(schema: SchemaRef, capacity: usize) -> Result<Self, ArrowConvertError> {
        let builders = schema
            .fields()
            .iter()
            .map(|f| builder::make_builder(f.name(), f.data_type(), capacity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            schema,
            builders,
            len: 0,
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Rows buffered since the last [`finish`](Self::finish).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one row. On error nothing is appended to any column.
    pub fn push(&mut self, row: &[Value]) -> Result<(), ArrowConvertError> {
        let fields = self.schema.fields();
        if row.len() != fields.len() {
            return Err(ArrowConvertError::Arity {
                expected: fields.len(),
                actual: row.len(),
            });
        }

        let scalars = fields
            .iter()
            .zip(row)
            .map(|(f, v)| scalar::scalar_value_for_datatype(f.data_type(), v))
            .collect::<Result<Vec<_>, _>>()?;
        for (builder, scalar) in self.builders.iter_mut().zip(&scalars) {
            append::append_scalar(builder, scalar)?;
        }
        self.len += 1;
        Ok(())
    }

    /// Drain the buffered rows into a batch; the buffer is left empty.
    pub fn finish(&mut self) -> Result<RecordBatch, ArrowConvertError> {
        let arrays: Vec<ArrayRef> = self.builders.iter_mut().map(|b| b.finish()).collect();
        self.len = 0;
        Ok(RecordBatch::try_new(self.schema.clone(), arrays)?)
    }
}

/// Convert rows to a single batch in one go.
pub fn rows_to_record_batch(
    schema: &SchemaRef,
    rows: &[ArrayRow],
) -> Result<RecordBatch, ArrowConvertError> {
    let mut buffer = RowBuffer::try_new(schema.clone(), rows.len())?;
    for row in rows {
        buffer.push(row)?;
    }
    buffer.finish()
}
