//! Accumulation of decoded messages into uniform tables.
//!
//! Messages of one type rarely share an identical field set (a ride's
//! first records may lack position fields, say), so rows are normalized
//! into a single column set with absent cells left null. A message type
//! whose rows cannot agree on a column's kind is dropped as a whole and
//! reported, leaving the remaining types intact.

use std::collections::BTreeMap;

use crate::decode::DecodedMessage;
use crate::value::{Value, ValueKind};

/// One message type's rows, with a uniform column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
}

impl Table {
    /// Column names, in first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, each as wide as [`Table::columns`].
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Value>]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// A single cell by row number and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let column = self.column_index(column)?;
        self.rows.get(row)?.get(column)?.as_ref()
    }
}

/// An ordered collection of tables keyed by message type name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCollection {
    tables: BTreeMap<String, Table>,
}

impl TableCollection {
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Accumulates decoded messages into tables, dropping message types whose
/// rows cannot share one schema.
#[derive(Debug, Default)]
pub struct Assembler {
    builders: BTreeMap<String, Builder>,
}

#[derive(Debug, Default)]
struct Builder {
    columns: Vec<String>,
    kinds: Vec<Option<ValueKind>>,
    rows: Vec<Vec<Option<Value>>>,
    /// Name of the first conflicting column, if any; poisons the builder.
    conflict: Option<String>,
}

impl Assembler {
    /// Add one decoded message to its table.
    pub fn push(&mut self, message: DecodedMessage) {
        let builder = self.builders.entry(message.table).or_default();
        builder.push(message.fields);
    }

    /// Finish assembly, returning the tables and the dropped message types
    /// with their conflicting columns.
    pub fn finish(self) -> (TableCollection, Vec<(String, String)>) {
        let mut tables = BTreeMap::new();
        let mut dropped = Vec::new();

        for (name, builder) in self.builders {
            match builder.conflict {
                Some(column) => dropped.push((name, column)),
                None => {
                    tables.insert(
                        name,
                        Table {
                            columns: builder.columns,
                            rows: builder.rows,
                        },
                    );
                }
            }
        }

        (TableCollection { tables }, dropped)
    }
}

impl Builder {
    fn push(&mut self, fields: Vec<(String, Value)>) {
        if self.conflict.is_some() {
            return;
        }

        let mut row = vec![None; self.columns.len()];
        for (name, value) in fields {
            let index = match self.columns.iter().position(|c| *c == name) {
                Some(index) => index,
                None => {
                    // First sighting of this column; pad every earlier row.
                    self.columns.push(name);
                    self.kinds.push(None);
                    for earlier in &mut self.rows {
                        earlier.push(None);
                    }
                    row.push(None);
                    self.columns.len() - 1
                }
            };

            match self.kinds[index] {
                None => self.kinds[index] = Some(value.kind()),
                Some(kind) if kind != value.kind() => {
                    self.conflict = Some(self.columns[index].clone());
                    return;
                }
                Some(_) => {}
            }

            row[index] = Some(value);
        }

        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(table: &str, fields: &[(&str, Value)]) -> DecodedMessage {
        DecodedMessage {
            table: table.to_string(),
            fields: fields
                .iter()
                .map(|(n, v)| (n.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn late_columns_are_backfilled() {
        let mut assembler = Assembler::default();
        assembler.push(message("record_mesgs", &[("heart_rate", Value::Unsigned(120))]));
        assembler.push(message(
            "record_mesgs",
            &[("heart_rate", Value::Unsigned(125)), ("cadence", Value::Unsigned(80))],
        ));

        let (tables, dropped) = assembler.finish();
        assert!(dropped.is_empty());

        let table = tables.get("record_mesgs").unwrap();
        assert_eq!(table.columns(), ["heart_rate", "cadence"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "cadence"), None);
        assert_eq!(table.get(1, "cadence"), Some(&Value::Unsigned(80)));
    }

    #[test]
    fn kind_conflicts_drop_the_type() {
        let mut assembler = Assembler::default();
        assembler.push(message("a_mesgs", &[("x", Value::Unsigned(1))]));
        assembler.push(message("a_mesgs", &[("x", Value::Float(1.0))]));
        assembler.push(message("b_mesgs", &[("y", Value::Unsigned(2))]));

        let (tables, dropped) = assembler.finish();
        assert_eq!(dropped, vec![("a_mesgs".to_string(), "x".to_string())]);
        assert!(tables.get("a_mesgs").is_none());
        assert_eq!(tables.get("b_mesgs").unwrap().len(), 1);
    }

    #[test]
    fn signed_and_unsigned_share_a_column() {
        let mut assembler = Assembler::default();
        assembler.push(message("a_mesgs", &[("x", Value::Unsigned(1))]));
        assembler.push(message("a_mesgs", &[("x", Value::Signed(-1))]));

        let (tables, dropped) = assembler.finish();
        assert!(dropped.is_empty());
        assert_eq!(tables.get("a_mesgs").unwrap().len(), 2);
    }
}
