use crate::core::error;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

const BUSY_TIMEOUT_SECS: u64 = 5;

pub fn db_connect(db_path: &Path) -> Result<Connection, error::StockroomError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(error::StockroomError::IoError)?;
    }
    let conn = Connection::open(db_path)?;
    configure(&conn)?;
    Ok(conn)
}

pub fn db_connect_in_memory() -> Result<Connection, error::StockroomError> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<(), error::StockroomError> {
    conn.busy_timeout(std::time::Duration::from_secs(BUSY_TIMEOUT_SECS))
        .map_err(error::StockroomError::PersistenceError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::StockroomError::PersistenceError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::StockroomError::PersistenceError)?;
    Ok(())
}

/// Resolve the configured database file against the launch directory.
pub fn inventory_db_path(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}
