//! Stockroom: a single-operator inventory tracker.
//!
//! Records live in one local SQLite table (`items`). An operator creates and
//! edits them through a form that validates raw text before anything is
//! written; the listing is re-read from the store after every successful save.
//!
//! # Lifecycle
//!
//! 1. Load `stockroom.toml` (optional) from the launch directory. `schema`
//!    is answered before this step and never reads the config or the store.
//! 2. Open the [`core::store::RecordStore`] once and ensure the schema exists.
//! 3. Run one command (or the interactive session).
//! 4. Close the store.
//!
//! # Examples
//!
//! ```bash
//! # Interactive listing + forms
//! stockroom
//!
//! # One-shot create and edit
//! stockroom add --name Widget --quantity 5 --price 9.99 --status pending
//! stockroom edit 1 --status sold
//! stockroom list --format json
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: record model, store, form controller, listing, session, ambient helpers

pub mod core;

mod cli;

use crate::cli::{Cli, Command, ListFormat, RecordArgs};
use crate::core::config::{self, Config};
use crate::core::error::StockroomError;
use crate::core::form::RecordForm;
use crate::core::listing::Listing;
use crate::core::record::RecordId;
use crate::core::session::InventorySession;
use crate::core::store::{self, RecordStore};
use crate::core::tui::{self, BoxStyle, LineStatus};
use crate::core::{db, logging};

use clap::Parser;
use std::io::{self, Write};

pub fn run() -> Result<(), StockroomError> {
    let cli = Cli::parse();
    let command = match cli.command.unwrap_or(Command::Form) {
        Command::Schema => return print_schema(),
        command => command,
    };

    let root = std::env::current_dir()?;
    let config = config::load_config(&root)?;
    logging::init(&config.log_filter);

    let db_path = db::inventory_db_path(&root, &config.database_path);
    let store = RecordStore::open(&db_path)?;
    let result = dispatch(&store, &config, command);
    let closed = store.close();
    result?;
    closed
}

fn dispatch(store: &RecordStore, config: &Config, command: Command) -> Result<(), StockroomError> {
    store.create_schema_if_absent()?;
    match command {
        Command::Form => {
            if config.reset_on_start {
                store.reset_schema()?;
                tui::render_box(
                    &mut io::stdout(),
                    "Inventory reset",
                    "reset_on_start is set; all records were removed",
                    BoxStyle::Warning,
                )?;
            }
            let stdin = io::stdin();
            let mut session = InventorySession::new(store, stdin.lock(), io::stdout())?;
            session.run()
        }
        Command::List { format } => {
            let listing = Listing::load(store)?;
            let mut out = io::stdout().lock();
            match format {
                ListFormat::Json => writeln!(out, "{}", listing.render_json()?)?,
                ListFormat::Text if listing.is_empty() => {
                    tui::print_status_line(&mut out, "No items yet", LineStatus::Info)?
                }
                ListFormat::Text => writeln!(out, "{}", listing.render_table())?,
            }
            Ok(())
        }
        Command::Add(args) => {
            let mut form = RecordForm::create();
            apply_args(&mut form, &args);
            let record = form.save(store)?;
            tui::print_status_line(
                &mut io::stdout(),
                &format!("Created item {} ({})", record.id, record.fields.name),
                LineStatus::Created,
            )?;
            Ok(())
        }
        Command::Edit { id, fields, clear } => {
            let listing = Listing::load(store)?;
            let action = listing
                .edit_action(RecordId(id))
                .ok_or(StockroomError::NotFound(RecordId(id)))?;
            let mut form = action.open(store)?;
            apply_args(&mut form, &fields);
            for field in clear {
                form.set(field, "");
            }
            let record = form.save(store)?;
            tui::print_status_line(
                &mut io::stdout(),
                &format!("Updated item {} ({})", record.id, record.fields.name),
                LineStatus::Updated,
            )?;
            Ok(())
        }
        Command::Schema => print_schema(),
    }
}

fn print_schema() -> Result<(), StockroomError> {
    println!("{}", serde_json::to_string_pretty(&store::schema())?);
    Ok(())
}

fn apply_args(form: &mut RecordForm, args: &RecordArgs) {
    for (field, value) in args.supplied() {
        form.set(field, value);
    }
}
