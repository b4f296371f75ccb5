//! Listing view model: the materialized set of rows shown to the operator.
//!
//! Each row carries an `EditAction` built from that row's own record id, so an
//! edit control can never observe another row's record.

use crate::core::error::StockroomError;
use crate::core::form::RecordForm;
use crate::core::output;
use crate::core::record::{FormField, Record, RecordId};
use crate::core::store::RecordStore;

/// Widest cell before truncation in the text table.
const MAX_CELL_CHARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditAction {
    record_id: RecordId,
}

impl EditAction {
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Re-read the bound record and open it in an edit form.
    pub fn open(&self, store: &RecordStore) -> Result<RecordForm, StockroomError> {
        let record = store.get(self.record_id)?;
        Ok(RecordForm::edit(record))
    }
}

#[derive(Debug, Clone)]
pub struct ListingRow<'a> {
    pub record: &'a Record,
    pub edit: EditAction,
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
    records: Vec<Record>,
}

impl Listing {
    pub fn load(store: &RecordStore) -> Result<Self, StockroomError> {
        let mut listing = Self::default();
        listing.refresh(store)?;
        Ok(listing)
    }

    /// Replace the rows with a fresh read of the store.
    pub fn refresh(&mut self, store: &RecordStore) -> Result<(), StockroomError> {
        self.records = store.list_all()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = ListingRow<'_>> {
        self.records.iter().map(|record| ListingRow {
            record,
            edit: EditAction {
                record_id: record.id,
            },
        })
    }

    pub fn edit_action(&self, id: RecordId) -> Option<EditAction> {
        self.rows().find(|row| row.record.id == id).map(|row| row.edit)
    }

    pub fn headers() -> Vec<&'static str> {
        std::iter::once("ID")
            .chain(FormField::ALL.into_iter().map(FormField::heading))
            .collect()
    }

    /// Fixed-width text table, one line per record.
    pub fn render_table(&self) -> String {
        let mut grid: Vec<Vec<String>> = vec![
            Self::headers()
                .into_iter()
                .map(str::to_string)
                .collect(),
        ];
        for row in self.rows() {
            let mut cells = vec![row.record.id.to_string()];
            cells.extend(
                FormField::ALL
                    .into_iter()
                    .map(|f| output::compact_line(&row.record.fields.text(f), MAX_CELL_CHARS)),
            );
            grid.push(cells);
        }

        let widths: Vec<usize> = (0..grid[0].len())
            .map(|col| {
                grid.iter()
                    .map(|cells| cells[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        grid.iter()
            .map(|cells| {
                cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, w)| output::pad_right(cell, *w))
                    .collect::<Vec<_>>()
                    .join(" | ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(&self) -> Result<String, StockroomError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}
