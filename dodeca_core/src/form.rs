//! # Calculator Form
//!
//! State behind the calculator panel: one checkbox and one text field per
//! quantity, the last result, and a status line that clears itself.
//!
//! The form owns everything a front end needs; rendering it is the front
//! end's business. Changes go through [`FormMessage`] and
//! [`CalculatorForm::update`], the same message/update loop a GUI uses.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use dodeca_core::calculations::QuantityKind;
//! use dodeca_core::form::{CalculatorForm, FormMessage};
//!
//! let mut form = CalculatorForm::new();
//! let now = Utc::now();
//! form.update(FormMessage::Toggle(QuantityKind::EdgeLength), now);
//! form.update(FormMessage::Edit(QuantityKind::EdgeLength, "2".into()), now);
//! form.update(FormMessage::Submit, now);
//!
//! // Unchecked fields are filled in with the derived values
//! assert_eq!(form.field(QuantityKind::Volume).text, "61.30");
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::{
    calculate, DodecahedronProperties, ParameterSet, QuantityKind, MAX_SELECTED,
};
use crate::errors::CalculatorError;
use crate::i18n::{parse_localized_number, Language, MessageKey};

/// How long a status message stays visible
pub const STATUS_DURATION_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// A transient line under the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub key: MessageKey,
    pub shown_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn success(key: MessageKey, now: DateTime<Utc>) -> Self {
        StatusMessage {
            kind: StatusKind::Success,
            key,
            shown_at: now,
        }
    }

    pub fn error(key: MessageKey, now: DateTime<Utc>) -> Self {
        StatusMessage {
            kind: StatusKind::Error,
            key,
            shown_at: now,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + Duration::seconds(STATUS_DURATION_SECS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn text(&self, language: Language) -> &'static str {
        language.translate(self.key)
    }
}

/// Checkbox and text of one quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub selected: bool,
    pub text: String,
}

static EMPTY_FIELD: FieldState = FieldState {
    selected: false,
    text: String::new(),
};

/// User interactions with the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    /// Flip a checkbox
    Toggle(QuantityKind),
    /// Replace the text of a field
    Edit(QuantityKind, String),
    /// Press "Calculate"
    Submit,
    /// Periodic tick, used to clear an expired status
    Tick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorForm {
    fields: BTreeMap<QuantityKind, FieldState>,
    result: Option<DodecahedronProperties>,
    status: Option<StatusMessage>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        CalculatorForm {
            fields: QuantityKind::ALL
                .into_iter()
                .map(|kind| (kind, FieldState::default()))
                .collect(),
            result: None,
            status: None,
        }
    }
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, kind: QuantityKind) -> &FieldState {
        self.fields.get(&kind).unwrap_or(&EMPTY_FIELD)
    }

    fn field_mut(&mut self, kind: QuantityKind) -> &mut FieldState {
        self.fields.entry(kind).or_default()
    }

    pub fn result(&self) -> Option<&DodecahedronProperties> {
        self.result.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn selected_count(&self) -> usize {
        self.fields.values().filter(|f| f.selected).count()
    }

    /// Check or uncheck a quantity.
    ///
    /// Checking a third quantity is refused: the checkbox stays unchecked and
    /// an error status is shown.
    pub fn set_selected(
        &mut self,
        kind: QuantityKind,
        selected: bool,
        now: DateTime<Utc>,
    ) -> Result<(), CalculatorError> {
        if selected && !self.field(kind).selected && self.selected_count() >= MAX_SELECTED {
            let err = CalculatorError::TooManySelected {
                selected: self.selected_count() + 1,
                max: MAX_SELECTED,
            };
            debug!(%kind, "selection refused");
            self.status = Some(StatusMessage::error(err.message_key(), now));
            return Err(err);
        }
        self.field_mut(kind).selected = selected;
        Ok(())
    }

    pub fn set_text(&mut self, kind: QuantityKind, text: impl Into<String>) {
        self.field_mut(kind).text = text.into();
    }

    /// Calculator input built from the fields.
    ///
    /// Text that is not a number becomes NaN, which the calculator reports
    /// as an invalid value if the field is selected.
    pub fn parameter_set(&self) -> ParameterSet {
        self.fields.iter().fold(ParameterSet::new(), |set, (kind, field)| {
            let value = parse_localized_number(&field.text).unwrap_or(f64::NAN);
            set.with_entry(*kind, field.selected, value)
        })
    }

    /// Run the calculator on the current fields.
    ///
    /// On success every unchecked field is overwritten with its derived value
    /// rounded to two decimals.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<DodecahedronProperties, CalculatorError> {
        match calculate(&self.parameter_set()) {
            Ok(props) => {
                for (kind, field) in self.fields.iter_mut() {
                    if !field.selected {
                        field.text = format!("{:.2}", props.get(*kind));
                    }
                }
                info!(edge_length = props.edge_length, "calculation succeeded");
                self.result = Some(props);
                self.status = Some(StatusMessage::success(MessageKey::CalculationSuccess, now));
                Ok(props)
            }
            Err(err) => {
                info!(code = err.error_code(), "calculation rejected");
                self.status = Some(StatusMessage::error(err.message_key(), now));
                Err(err)
            }
        }
    }

    /// Drop the status message once it has been visible long enough
    pub fn clear_expired(&mut self, now: DateTime<Utc>) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    /// Apply one interaction. Errors end up in [`CalculatorForm::status`].
    pub fn update(&mut self, message: FormMessage, now: DateTime<Utc>) {
        match message {
            FormMessage::Toggle(kind) => {
                let selected = !self.field(kind).selected;
                let _ = self.set_selected(kind, selected, now);
            }
            FormMessage::Edit(kind, text) => self.set_text(kind, text),
            FormMessage::Submit => {
                let _ = self.submit(now);
            }
            FormMessage::Tick => self.clear_expired(now),
        }
    }
}
