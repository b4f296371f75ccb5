//! Record Store: the only component that talks to the `items` table.
//!
//! A `RecordStore` wraps the single SQLite connection opened for the life of
//! the process. It is constructed explicitly at startup, handed by reference to
//! the form and the listing, and closed explicitly at shutdown.

use crate::core::db;
use crate::core::error::StockroomError;
use crate::core::record::{Record, RecordFields, RecordId};
use crate::core::schemas;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

/// Write surface the form controller dispatches a validated save to.
pub trait RecordWriter {
    /// Persist a new record and return it with its assigned id.
    fn insert(&self, fields: &RecordFields) -> Result<Record, StockroomError>;
    /// Overwrite every field of an existing record.
    fn update(&self, id: RecordId, fields: &RecordFields) -> Result<(), StockroomError>;
}

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    pub fn open(db_path: &Path) -> Result<Self, StockroomError> {
        let conn = db::db_connect(db_path)?;
        tracing::debug!(path = %db_path.display(), "record store opened");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StockroomError> {
        let conn = db::db_connect_in_memory()?;
        Ok(Self { conn })
    }

    /// Idempotent. Never touches existing rows.
    pub fn create_schema_if_absent(&self) -> Result<(), StockroomError> {
        self.conn.execute(schemas::ITEMS_SCHEMA, [])?;
        Ok(())
    }

    /// Drop `items` and recreate it empty. Destroys every record.
    pub fn reset_schema(&self) -> Result<(), StockroomError> {
        tracing::warn!(table = schemas::ITEMS_TABLE, "dropping and recreating table");
        // Dropping the table also clears its sqlite_sequence row, so ids restart at 1.
        self.conn.execute(schemas::ITEMS_DROP, [])?;
        self.create_schema_if_absent()
    }

    /// Every stored record, ascending by id.
    pub fn list_all(&self) -> Result<Vec<Record>, StockroomError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM items ORDER BY id ASC",
            schemas::ITEMS_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_record)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        tracing::debug!(count = out.len(), "listed records");
        Ok(out)
    }

    pub fn get(&self, id: RecordId) -> Result<Record, StockroomError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM items WHERE id = ?1", schemas::ITEMS_COLUMNS),
                params![id.0],
                row_to_record,
            )
            .optional()?
            .ok_or(StockroomError::NotFound(id))
    }

    pub fn count(&self) -> Result<usize, StockroomError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn close(self) -> Result<(), StockroomError> {
        self.conn
            .close()
            .map_err(|(_, e)| StockroomError::PersistenceError(e))?;
        tracing::debug!("record store closed");
        Ok(())
    }
}

impl RecordWriter for RecordStore {
    fn insert(&self, fields: &RecordFields) -> Result<Record, StockroomError> {
        self.conn.execute(
            "INSERT INTO items(name, quantity, price, description, russian_license, phone_number,
                               vin, status, comments, full_name, passport_number)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                fields.name,
                fields.quantity,
                fields.price.to_string(),
                fields.description,
                fields.russian_license,
                fields.phone_number,
                fields.vin,
                fields.status,
                fields.comments,
                fields.full_name,
                fields.passport_number,
            ],
        )?;
        let id = RecordId(self.conn.last_insert_rowid());
        tracing::debug!(%id, "inserted record");
        Ok(Record {
            id,
            fields: fields.clone(),
        })
    }

    fn update(&self, id: RecordId, fields: &RecordFields) -> Result<(), StockroomError> {
        let changed = self.conn.execute(
            "UPDATE items SET name = ?2, quantity = ?3, price = ?4, description = ?5,
                    russian_license = ?6, phone_number = ?7, vin = ?8, status = ?9,
                    comments = ?10, full_name = ?11, passport_number = ?12
             WHERE id = ?1",
            params![
                id.0,
                fields.name,
                fields.quantity,
                fields.price.to_string(),
                fields.description,
                fields.russian_license,
                fields.phone_number,
                fields.vin,
                fields.status,
                fields.comments,
                fields.full_name,
                fields.passport_number,
            ],
        )?;
        if changed == 0 {
            return Err(StockroomError::NotFound(id));
        }
        tracing::debug!(%id, "updated record");
        Ok(())
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    let price_text: String = row.get(3)?;
    let price = Decimal::from_str(&price_text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(Record {
        id: RecordId(row.get(0)?),
        fields: RecordFields {
            name: row.get(1)?,
            quantity: row.get(2)?,
            price,
            description: row.get(4)?,
            russian_license: row.get(5)?,
            phone_number: row.get(6)?,
            vin: row.get(7)?,
            status: row.get(8)?,
            comments: row.get(9)?,
            full_name: row.get(10)?,
            passport_number: row.get(11)?,
        },
    })
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "items",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Inventory records (single flat table, no deletes)",
        "columns": [
            { "name": "id", "type": "integer", "constraint": "system-assigned, unique, immutable" },
            { "name": "name", "type": "text", "constraint": "required, non-empty" },
            { "name": "quantity", "type": "integer", "constraint": "required, default 0" },
            { "name": "price", "type": "decimal", "constraint": "required" },
            { "name": "description", "type": "text" },
            { "name": "russian_license", "type": "text" },
            { "name": "phone_number", "type": "text" },
            { "name": "vin", "type": "text" },
            { "name": "status", "type": "text" },
            { "name": "comments", "type": "text" },
            { "name": "full_name", "type": "text" },
            { "name": "passport_number", "type": "text" }
        ],
        "commands": [
            { "name": "list", "description": "Print every record" },
            { "name": "add", "description": "Create a record through the form" },
            { "name": "edit", "description": "Full-replace an existing record through the form" },
            { "name": "form", "description": "Interactive add/edit session" }
        ],
        "storage": [schemas::DEFAULT_DB_NAME]
    })
}
