//! Form controller: raw operator text in, validated store write out.
//!
//! A form is opened in `Create` or `Edit` mode, edited field by field, and then
//! either saved or cancelled. Saving runs the required-field check and the type
//! coercion before the store is touched; a failed save leaves the form open.

use crate::core::error::{StockroomError, ValidationError};
use crate::core::record::{FormField, Record, RecordFields};
use crate::core::store::RecordWriter;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Record),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Accepted(Record),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Opened,
    Closed(FormOutcome),
}

#[derive(Debug, Clone)]
pub struct RecordForm {
    mode: FormMode,
    values: HashMap<FormField, String>,
    state: FormState,
}

impl RecordForm {
    /// Blank form; saving it creates a new record.
    pub fn create() -> Self {
        Self::open(FormMode::Create)
    }

    /// Form pre-populated with `record`; saving it replaces that record.
    pub fn edit(record: Record) -> Self {
        Self::open(FormMode::Edit(record))
    }

    pub fn open(mode: FormMode) -> Self {
        let values = match &mode {
            FormMode::Create => FormField::ALL
                .into_iter()
                .map(|f| (f, String::new()))
                .collect(),
            FormMode::Edit(record) => FormField::ALL
                .into_iter()
                .map(|f| (f, record.fields.text(f)))
                .collect(),
        };
        Self {
            mode,
            values,
            state: FormState::Opened,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == FormState::Opened
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Item",
            FormMode::Edit(_) => "Edit Item",
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FormField, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }

    /// Required-field check followed by type coercion. Never touches a store.
    pub fn validate(&self) -> Result<RecordFields, ValidationError> {
        for field in [FormField::Name, FormField::Quantity, FormField::Price] {
            if self.value(field).trim().is_empty() {
                return Err(ValidationError::MissingRequiredField(field.key()));
            }
        }

        let quantity_text = self.value(FormField::Quantity).trim();
        let quantity =
            quantity_text
                .parse::<i64>()
                .map_err(|_| ValidationError::TypeMismatch {
                    field: FormField::Quantity.key(),
                    expected: "an integer",
                    value: quantity_text.to_string(),
                })?;

        let price_text = self.value(FormField::Price).trim();
        let price = parse_decimal(price_text).ok_or_else(|| ValidationError::TypeMismatch {
            field: FormField::Price.key(),
            expected: "a decimal number",
            value: price_text.to_string(),
        })?;

        let optional = |field: FormField| {
            let text = self.value(field);
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        };

        Ok(RecordFields {
            name: self.value(FormField::Name).to_string(),
            quantity,
            price,
            description: optional(FormField::Description),
            russian_license: optional(FormField::RussianLicense),
            phone_number: optional(FormField::PhoneNumber),
            vin: optional(FormField::Vin),
            status: optional(FormField::Status),
            comments: optional(FormField::Comments),
            full_name: optional(FormField::FullName),
            passport_number: optional(FormField::PassportNumber),
        })
    }

    /// Validate, then insert (create) or full-replace (edit).
    ///
    /// On success the form closes as `Accepted` and the persisted record is
    /// returned; the caller refreshes its listing. On any error the form stays
    /// open and no partial record reaches the store.
    pub fn save<S: RecordWriter + ?Sized>(&mut self, store: &S) -> Result<Record, StockroomError> {
        if !self.is_open() {
            return Err(StockroomError::FormClosed);
        }

        let fields = self.validate().inspect_err(|e| {
            tracing::info!(form = self.title(), error = %e, "save rejected");
        })?;

        let record = match &self.mode {
            FormMode::Edit(existing) => {
                store.update(existing.id, &fields)?;
                Record {
                    id: existing.id,
                    fields,
                }
            }
            FormMode::Create => store.insert(&fields)?,
        };

        tracing::info!(id = %record.id, form = self.title(), "record saved");
        self.state = FormState::Closed(FormOutcome::Accepted(record.clone()));
        Ok(record)
    }

    /// Abandon the form. No validation, no store call.
    pub fn cancel(&mut self) -> Result<(), StockroomError> {
        if !self.is_open() {
            return Err(StockroomError::FormClosed);
        }
        self.state = FormState::Closed(FormOutcome::Cancelled);
        Ok(())
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
