//! Schema definitions for the inventory database.
//!
//! One SQLite file, one table. Price is kept as canonical decimal text so that
//! no binary float ever sits between the form and the disk.

pub const DEFAULT_DB_NAME: &str = "inventory.db";

pub const ITEMS_TABLE: &str = "items";

pub const ITEMS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(trim(name)) > 0),
        quantity INTEGER NOT NULL DEFAULT 0,
        price TEXT NOT NULL,
        description TEXT,
        russian_license TEXT,
        phone_number TEXT,
        vin TEXT,
        status TEXT,
        comments TEXT,
        full_name TEXT,
        passport_number TEXT
    )
";

pub const ITEMS_DROP: &str = "DROP TABLE IF EXISTS items";

/// Column list shared by every SELECT, in `Record` field order.
pub const ITEMS_COLUMNS: &str = "id, name, quantity, price, description, russian_license, \
     phone_number, vin, status, comments, full_name, passport_number";
