//! Interactive line-oriented session: the listing plus add/edit forms.
//!
//! Input and output are injected so the same loop drives a terminal or a test
//! buffer. Every error is shown in a blocking box that must be acknowledged
//! with Enter before the operator can continue.

use crate::core::error::StockroomError;
use crate::core::form::{FormMode, RecordForm};
use crate::core::listing::Listing;
use crate::core::record::{FormField, RecordId};
use crate::core::store::RecordStore;
use crate::core::output;
use crate::core::tui::{self, BoxStyle, LineStatus};
use std::io::{BufRead, Write};

const PROMPT_PREVIEW_CHARS: usize = 40;

/// Entered at a field prompt to clear an optional value in an edit form.
pub const CLEAR_MARKER: &str = "-";

/// Trailing a line of a multi-line field, asks for another line.
pub const CONTINUATION_MARKER: char = '\\';

enum FormStep {
    Save,
    Cancel,
    Change(FormField),
    Unknown(String),
}

pub struct InventorySession<'s, R, W> {
    store: &'s RecordStore,
    listing: Listing,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> InventorySession<'s, R, W> {
    /// Reads the listing once up front.
    pub fn new(store: &'s RecordStore, input: R, output: W) -> Result<Self, StockroomError> {
        let listing = Listing::load(store)?;
        Ok(Self {
            store,
            listing,
            input,
            output,
        })
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Main loop; returns on `quit` or end of input.
    pub fn run(&mut self) -> Result<(), StockroomError> {
        tui::render_box(
            &mut self.output,
            "Inventory Management System",
            &format!("{} record(s)", self.listing.len()),
            BoxStyle::Info,
        )?;
        self.show_listing()?;

        loop {
            let Some(line) = self.prompt("\n[a]dd, [e]dit <id>, [l]ist, [q]uit > ")? else {
                return Ok(());
            };
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (None, _) => continue,
                (Some("a" | "add"), _) => self.add()?,
                (Some("e" | "edit"), Some(id)) => match id.parse::<i64>() {
                    Ok(id) => self.edit(RecordId(id))?,
                    Err(_) => self.acknowledge(&format!("'{}' is not a record id", id))?,
                },
                (Some("e" | "edit"), None) => self.acknowledge("edit needs a record id")?,
                (Some("l" | "list"), _) => self.reload()?,
                (Some("q" | "quit" | "exit"), _) => return Ok(()),
                (Some(other), _) => self.acknowledge(&format!("unknown command '{}'", other))?,
            }
        }
    }

    pub fn add(&mut self) -> Result<(), StockroomError> {
        self.run_form(RecordForm::create())
    }

    /// Opens the form through the row's own edit action.
    pub fn edit(&mut self, id: RecordId) -> Result<(), StockroomError> {
        let Some(action) = self.listing.edit_action(id) else {
            return self.acknowledge(&format!("no record with id {} in the listing", id));
        };
        match action.open(self.store) {
            Ok(form) => self.run_form(form),
            Err(e) => self.recover(e),
        }
    }

    /// Re-read the listing from the store, then show it.
    fn reload(&mut self) -> Result<(), StockroomError> {
        match self.listing.refresh(self.store) {
            Ok(()) => self.show_listing(),
            Err(e) => self.recover(e),
        }
    }

    fn show_listing(&mut self) -> Result<(), StockroomError> {
        if self.listing.is_empty() {
            tui::print_status_line(&mut self.output, "No items yet", LineStatus::Info)?;
        } else {
            writeln!(self.output, "{}", self.listing.render_table())?;
        }
        Ok(())
    }

    fn run_form(&mut self, mut form: RecordForm) -> Result<(), StockroomError> {
        tui::render_box(&mut self.output, form.title(), "", BoxStyle::Info)?;
        for field in FormField::ALL {
            if !self.fill_field(&mut form, field)? {
                return self.cancel(form);
            }
        }

        loop {
            let Some(line) = self.prompt("[s]ave, [c]ancel, or a field name to change > ")? else {
                return self.cancel(form);
            };
            match parse_step(&line) {
                FormStep::Save => match form.save(self.store) {
                    Ok(record) => {
                        let status = match form.mode() {
                            FormMode::Edit(_) => LineStatus::Updated,
                            FormMode::Create => LineStatus::Created,
                        };
                        tui::print_status_line(
                            &mut self.output,
                            &format!("Saved item {} ({})", record.id, record.fields.name),
                            status,
                        )?;
                        return self.reload();
                    }
                    Err(e) => self.recover(e)?,
                },
                FormStep::Cancel => return self.cancel(form),
                FormStep::Change(field) => {
                    if !self.fill_field(&mut form, field)? {
                        return self.cancel(form);
                    }
                }
                FormStep::Unknown(text) => {
                    self.acknowledge(&format!("unknown field or action '{}'", text))?
                }
            }
        }
    }

    /// Prompt for one field. Blank keeps the current text; `-` clears it.
    /// Multi-line fields keep reading while a line ends in `\`.
    /// Returns `false` at end of input.
    fn fill_field(&mut self, form: &mut RecordForm, field: FormField) -> Result<bool, StockroomError> {
        let current = output::compact_line(form.value(field), PROMPT_PREVIEW_CHARS);
        let marker = if field.is_required() { "*" } else { "" };
        let hint = if field.is_multiline() { " (\\ continues)" } else { "" };
        let prompt = if current.is_empty() {
            format!("  {}{}{}: ", field.label(), marker, hint)
        } else {
            format!("  {}{}{} [{}]: ", field.label(), marker, hint, current)
        };
        let Some(mut line) = self.prompt(&prompt)? else {
            return Ok(false);
        };
        if field.is_multiline() {
            while let Some(head) = line.strip_suffix(CONTINUATION_MARKER) {
                let head = head.to_string();
                let Some(next) = self.prompt("  ... ")? else {
                    return Ok(false);
                };
                line = format!("{}\n{}", head, next);
            }
        }
        if line == CLEAR_MARKER {
            form.set(field, "");
        } else if !line.is_empty() {
            form.set(field, line);
        }
        Ok(true)
    }

    fn cancel(&mut self, mut form: RecordForm) -> Result<(), StockroomError> {
        form.cancel()?;
        tui::print_status_line(&mut self.output, "Cancelled, nothing saved", LineStatus::Cancelled)?;
        Ok(())
    }

    /// Terminal I/O failures end the session; anything else is shown and acknowledged.
    fn recover(&mut self, error: StockroomError) -> Result<(), StockroomError> {
        match error {
            StockroomError::IoError(_) => Err(error),
            other => self.acknowledge(&other.to_string()),
        }
    }

    /// Blocking error box; waits for Enter (or end of input).
    fn acknowledge(&mut self, message: &str) -> Result<(), StockroomError> {
        tracing::warn!(%message, "operator error");
        tui::render_box(&mut self.output, "Error", message, BoxStyle::Error)?;
        self.prompt("Press Enter to continue")?;
        Ok(())
    }

    /// `None` at end of input. Trailing newline stripped.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, StockroomError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn parse_step(line: &str) -> FormStep {
    match line.trim() {
        "s" | "save" => FormStep::Save,
        "c" | "cancel" => FormStep::Cancel,
        other => match FormField::parse(other) {
            Some(field) => FormStep::Change(field),
            None => FormStep::Unknown(other.to_string()),
        },
    }
}
