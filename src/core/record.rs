//! The inventory record and its field catalogue.
//!
//! `RecordFields` is everything an operator supplies; `Record` adds the
//! store-assigned identity. Optional text is `None` rather than an empty
//! string so that an untouched form field round-trips to `NULL`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identity of a record. Never reassigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub description: Option<String>,
    pub russian_license: Option<String>,
    pub phone_number: Option<String>,
    pub vin: Option<String>,
    pub status: Option<String>,
    pub comments: Option<String>,
    pub full_name: Option<String>,
    pub passport_number: Option<String>,
}

impl RecordFields {
    /// Required fields only; every optional field empty.
    pub fn new(name: impl Into<String>, quantity: i64, price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            description: None,
            russian_license: None,
            phone_number: None,
            vin: None,
            status: None,
            comments: None,
            full_name: None,
            passport_number: None,
        }
    }

    /// Text rendering of one field, as a form would show it.
    pub fn text(&self, field: FormField) -> String {
        let optional = |v: &Option<String>| v.clone().unwrap_or_default();
        match field {
            FormField::Name => self.name.clone(),
            FormField::Quantity => self.quantity.to_string(),
            FormField::Price => self.price.to_string(),
            FormField::Description => optional(&self.description),
            FormField::RussianLicense => optional(&self.russian_license),
            FormField::PhoneNumber => optional(&self.phone_number),
            FormField::Vin => optional(&self.vin),
            FormField::Status => optional(&self.status),
            FormField::Comments => optional(&self.comments),
            FormField::FullName => optional(&self.full_name),
            FormField::PassportNumber => optional(&self.passport_number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: RecordFields,
}

/// Every operator-editable field, in form and table order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Quantity,
    Price,
    Description,
    RussianLicense,
    PhoneNumber,
    Vin,
    Status,
    Comments,
    FullName,
    PassportNumber,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Name,
        FormField::Quantity,
        FormField::Price,
        FormField::Description,
        FormField::RussianLicense,
        FormField::PhoneNumber,
        FormField::Vin,
        FormField::Status,
        FormField::Comments,
        FormField::FullName,
        FormField::PassportNumber,
    ];

    /// Column / config key.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Quantity => "quantity",
            FormField::Price => "price",
            FormField::Description => "description",
            FormField::RussianLicense => "russian_license",
            FormField::PhoneNumber => "phone_number",
            FormField::Vin => "vin",
            FormField::Status => "status",
            FormField::Comments => "comments",
            FormField::FullName => "full_name",
            FormField::PassportNumber => "passport_number",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Item Name",
            FormField::Quantity => "Quantity",
            FormField::Price => "Price",
            FormField::Description => "Description",
            FormField::RussianLicense => "Russian License",
            FormField::PhoneNumber => "Phone Number",
            FormField::Vin => "VIN",
            FormField::Status => "Status",
            FormField::Comments => "Comments",
            FormField::FullName => "Full Name",
            FormField::PassportNumber => "Passport Number",
        }
    }

    /// Column heading in the listing table.
    pub fn heading(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            other => other.label(),
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, FormField::Name | FormField::Quantity | FormField::Price)
    }

    /// Free text that may span several lines.
    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::Description | FormField::Comments)
    }

    /// Accepts the column key, with `-` or `_` separators, case-insensitively.
    pub fn parse(input: &str) -> Option<FormField> {
        let normalized = input.trim().to_ascii_lowercase().replace('-', "_");
        FormField::ALL
            .into_iter()
            .find(|f| f.key() == normalized)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
