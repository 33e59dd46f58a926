use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

/// Names of the inputs on the evaluation form.
pub mod fields {
    pub const CUSTOMER_ID: &str = "kunde_ID";
    pub const LOAN_TYPE: &str = "laanetype_ønsket";
    pub const REQUESTED_LOAN: &str = "laan_oensket";
    pub const PROPERTY_VALUE: &str = "bolig_verdi";
    pub const EQUITY: &str = "egenkapital";
    pub const EQUITY_SOURCE: &str = "egenkapital_kilde";
    pub const STUDENT_LOAN: &str = "studielaan";
    pub const CONSUMER_LOAN: &str = "forbrukslaan";
    pub const CREDIT_CARD_LIMIT: &str = "kredittkort_ramme";
    pub const CAR_LOAN: &str = "billaan";
    pub const BANKS_APPLIED: &str = "banker_soekt";
    pub const PRIMARY_INCOME: &str = "inntekt_hovedsoker";
    pub const PRIMARY_EMPLOYMENT: &str = "arbeidsstatus_hovedsoker";
    pub const CO_APPLICANT_SELECTOR: &str = "har_medsoker";
    pub const CO_APPLICANT_INCOME: &str = "inntekt_medsoker";
    pub const CO_APPLICANT_EMPLOYMENT: &str = "arbeidsstatus_medsoker";
    pub const CHILDREN_UNDER_18: &str = "barn_under_18";

    // Flat single-applicant layout.
    pub const INCOME: &str = "inntekt";
    pub const TOTAL_DEBT: &str = "total_gjeld";
    pub const HOUSEHOLD_SIZE: &str = "husholdning_størrelse";
    pub const EXPENSES: &str = "utgifter";
    pub const MONTHLY_INCOME: &str = "inntekt_mnd";
    pub const CREDIT_REMARK: &str = "anmerkning";
}

/// Selector value that opens the co-applicant section.
pub const AFFIRMATIVE: &str = "Ja";

/// Literal the remark field submits when a negative credit mark is registered.
pub const TRUE_LITERAL: &str = "True";

const CO_APPLICANT_SECTION: [&str; 2] = [fields::CO_APPLICANT_INCOME, fields::CO_APPLICANT_EMPLOYMENT];

/// Raw value of one input plus its presentation flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub required: bool,
    pub visible: bool,
}

impl FieldState {
    fn shown(value: String) -> Self {
        Self {
            value,
            required: false,
            visible: true,
        }
    }
}

/// Snapshot of the evaluation form as the user left it.
///
/// Values are kept as entered. Coercion happens on read and never rejects input: a
/// number that does not parse reads as NaN (or `None` for counts) and is passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: BTreeMap<String, FieldState>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let mut form = Self {
            fields: BTreeMap::new(),
        };
        form.sync_co_applicant();
        form
    }

    /// Builds a form from `key=value` pairs, applying each one as a user edit.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = Self::new();
        form.apply_pairs(pairs)?;
        Ok(form)
    }

    /// Applies `key=value` edits on top of the current values, in order.
    pub fn apply_pairs<I, S>(&mut self, pairs: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| FormError::MalformedPair(pair.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(FormError::MalformedPair(pair.to_string()));
            }
            self.set(name, value);
        }
        self.sync_co_applicant();
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self, FormError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Builds a form from a JSON object of field names to scalar values.
    pub fn from_value(value: Value) -> Result<Self, FormError> {
        let Value::Object(entries) = value else {
            return Err(FormError::NotAnObject);
        };

        let mut form = Self::new();
        for (name, raw) in entries {
            let value = match raw {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(true) => TRUE_LITERAL.to_string(),
                Value::Bool(false) => "False".to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(FormError::UnsupportedValue { field: name })
                }
            };
            form.set(&name, value);
        }
        form.sync_co_applicant();
        Ok(form)
    }

    /// Records a new raw value for `name`. Changing the co-applicant selector
    /// resynchronises the co-applicant section immediately.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.get_mut(name) {
            Some(field) => field.value = value,
            None => {
                self.fields
                    .insert(name.to_string(), FieldState::shown(value));
            }
        }

        if name == fields::CO_APPLICANT_SELECTOR {
            self.sync_co_applicant();
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.field(name).map(|field| field.required).unwrap_or(false)
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.field(name).map(|field| field.visible).unwrap_or(false)
    }

    pub fn has_co_applicant(&self) -> bool {
        self.flag(fields::CO_APPLICANT_SELECTOR, AFFIRMATIVE)
    }

    /// Raw text of a field; missing fields read as empty.
    pub fn text(&self, name: &str) -> String {
        self.raw(name).to_string()
    }

    /// Decimal amount; empty or unparseable input reads as NaN.
    pub fn decimal(&self, name: &str) -> f64 {
        self.raw(name)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .unwrap_or(f64::NAN)
    }

    /// Whole number; empty or non-integer input such as `"3.5"` or `"2 barn"` reads as `None`.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.raw(name).trim().parse::<i64>().ok()
    }

    /// True only when the raw value is exactly `literal`.
    pub fn flag(&self, name: &str, literal: &str) -> bool {
        self.raw(name) == literal
    }

    fn raw(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    fn sync_co_applicant(&mut self) {
        let shown = self.has_co_applicant();

        for name in CO_APPLICANT_SECTION {
            self.fields
                .entry(name.to_string())
                .or_insert_with(|| FieldState::shown(String::new()))
                .visible = shown;
        }

        if let Some(income) = self.fields.get_mut(fields::CO_APPLICANT_INCOME) {
            income.required = shown;
            if !shown {
                income.value = "0".to_string();
            }
        }

        debug!(co_applicant = shown, "co-applicant section synchronised");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form snapshot must be a JSON object of field values")]
    NotAnObject,
    #[error("field '{field}' must hold a scalar value")]
    UnsupportedValue { field: String },
    #[error("expected key=value, got '{0}'")]
    MalformedPair(String),
    #[error("form snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
