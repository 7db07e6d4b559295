//! The output table.
//!
//! Rows are typed, so every record already has all five columns and a
//! missing value is already [`BLANK`](fx_types::BLANK). The table fixes the
//! column order and keeps the header even when there are no rows.

use fx_types::{DeliveryRow, COLUMNS};

/// Delivery rows in output order, with the five-column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<DeliveryRow>,
}

impl Table {
    pub fn new(rows: Vec<DeliveryRow>) -> Self {
        Self { rows }
    }

    /// Header row, in file order.
    pub fn columns(&self) -> [&'static str; 5] {
        COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DeliveryRow] {
        &self.rows
    }

    /// Records as field values in [`Table::columns`] order.
    pub fn records(&self) -> impl Iterator<Item = [&str; 5]> {
        self.rows.iter().map(DeliveryRow::values)
    }
}

impl From<Vec<DeliveryRow>> for Table {
    fn from(rows: Vec<DeliveryRow>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<DeliveryRow> for Table {
    fn from_iter<I: IntoIterator<Item = DeliveryRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
