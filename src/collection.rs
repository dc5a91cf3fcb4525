//! Record collection sink and tabular conversion.
//!
//! [`CollectionBuilder`] accumulates records against a frozen schema and
//! produces the [`ParsedCollection`] returned by the parser. Collections
//! convert to a polars `DataFrame` with one column per schema field.

use crate::error::{Result, SosError};
use crate::models::{Dialect, ObservationRecord, ParsedCollection, RecordSchema, ValueKind};
use polars::prelude::*;
use tracing::debug;

/// Accumulates records for one document
#[derive(Debug)]
pub struct CollectionBuilder {
    dialect: Dialect,
    schema: RecordSchema,
    records: Vec<ObservationRecord>,
}

impl CollectionBuilder {
    pub fn new(dialect: Dialect, schema: RecordSchema) -> Self {
        Self::with_capacity(dialect, schema, 0)
    }

    pub fn with_capacity(dialect: Dialect, schema: RecordSchema, capacity: usize) -> Self {
        Self {
            dialect,
            schema,
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Append a record; it must line up with the schema
    pub fn push(&mut self, record: ObservationRecord) -> Result<()> {
        if !record.conforms_to(&self.schema) {
            let field = self
                .schema
                .fields
                .iter()
                .zip(record.values())
                .find(|(field, value)| field.kind != value.kind())
                .map(|(field, _)| field.name.clone())
                .unwrap_or_else(|| format!("{} values", record.len()));
            return Err(SosError::schema_mismatch(field, &self.schema.type_name));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> ParsedCollection {
        debug!(
            "Built {} collection with {} records",
            self.schema.type_name,
            self.records.len()
        );
        ParsedCollection {
            dialect: self.dialect,
            schema: self.schema,
            records: self.records,
        }
    }
}

impl ParsedCollection {
    /// Convert to a DataFrame
    ///
    /// XML-backed values become string columns holding the source fragment,
    /// lists are newline-joined, timestamps become millisecond datetimes and
    /// absent optional values become nulls.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let values = self.records.iter().map(|record| record.get(index));
                let series = match field.kind {
                    ValueKind::Timestamp => Int64Chunked::from_iter_options(
                        field.name.as_str().into(),
                        values.map(|value| {
                            value
                                .and_then(|v| v.as_timestamp())
                                .map(|ts| ts.timestamp_millis())
                        }),
                    )
                    .into_datetime(TimeUnit::Milliseconds, None)
                    .into_series(),
                    _ => {
                        let cells: Vec<Option<String>> = values
                            .map(|value| value.and_then(|v| v.to_cell()))
                            .collect();
                        Series::new(field.name.as_str().into(), cells)
                    }
                };
                series.into_column()
            })
            .collect::<Vec<_>>();

        DataFrame::new(columns)
    }
}
