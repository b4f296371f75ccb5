//! CLI struct definitions for the stockroom command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use crate::core::record::FormField;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[clap(
    name = "stockroom",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track inventory records in a local SQLite file. Run without a subcommand for the interactive form."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Interactive session: listing plus add/edit forms (default)
    Form,
    /// Print every record
    List {
        /// Output format.
        #[clap(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Create a record through the form
    Add(RecordArgs),
    /// Replace a record through the form; omitted fields keep their stored values
    Edit {
        /// Id of the record to edit.
        id: i64,
        #[clap(flatten)]
        fields: RecordArgs,
        /// Clear an optional field (repeatable), e.g. `--clear vin`.
        #[clap(long = "clear", value_name = "FIELD", value_parser = parse_form_field)]
        clear: Vec<FormField>,
    },
    /// Print the table and command schema as JSON
    Schema,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ListFormat {
    Text,
    Json,
}

/// Raw field text exactly as typed; the form does all validation.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct RecordArgs {
    /// Item name (required).
    #[clap(long)]
    pub name: Option<String>,
    /// Whole-number quantity (required).
    #[clap(long, allow_hyphen_values = true)]
    pub quantity: Option<String>,
    /// Decimal price (required).
    #[clap(long, allow_hyphen_values = true)]
    pub price: Option<String>,
    #[clap(long)]
    pub description: Option<String>,
    #[clap(long)]
    pub russian_license: Option<String>,
    #[clap(long)]
    pub phone_number: Option<String>,
    #[clap(long)]
    pub vin: Option<String>,
    #[clap(long)]
    pub status: Option<String>,
    #[clap(long)]
    pub comments: Option<String>,
    #[clap(long)]
    pub full_name: Option<String>,
    #[clap(long)]
    pub passport_number: Option<String>,
}

fn parse_form_field(input: &str) -> Result<FormField, String> {
    FormField::parse(input).ok_or_else(|| {
        let known = FormField::ALL.map(FormField::key).join(", ");
        format!("unknown field '{}' (expected one of: {})", input, known)
    })
}

impl RecordArgs {
    /// Fields the operator actually supplied, in form order.
    pub fn supplied(&self) -> Vec<(FormField, &str)> {
        let all = [
            (FormField::Name, &self.name),
            (FormField::Quantity, &self.quantity),
            (FormField::Price, &self.price),
            (FormField::Description, &self.description),
            (FormField::RussianLicense, &self.russian_license),
            (FormField::PhoneNumber, &self.phone_number),
            (FormField::Vin, &self.vin),
            (FormField::Status, &self.status),
            (FormField::Comments, &self.comments),
            (FormField::FullName, &self.full_name),
            (FormField::PassportNumber, &self.passport_number),
        ];
        all.into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect()
    }
}
