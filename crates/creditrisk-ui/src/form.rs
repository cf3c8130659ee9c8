//! Form layout and submission parsing.
//!
//! The form has three sections of widgets covering all 31 columns. A
//! submission arrives as label text; [`parse_submission`] turns it into
//! the canonical JSON record the service expects.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::catalog::{Catalog, FieldProblem};

/// Input control for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Integer { min: i64, max: Option<i64>, default: i64 },
    Decimal { min: f64, default: f64 },
    Slider { min: f64, max: f64, step: f64, default: f64 },
    /// Integer picked from a fixed list.
    Fixed { options: &'static [i64], default: i64 },
    /// Localized choices from the catalog; defaults to the first one.
    Select,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub column: &'static str,
    pub widget: Widget,
}

const fn int(column: &'static str, min: i64, max: Option<i64>, default: i64) -> Field {
    Field { column, widget: Widget::Integer { min, max, default } }
}

const fn dec(column: &'static str, min: f64, default: f64) -> Field {
    Field { column, widget: Widget::Decimal { min, default } }
}

const fn slider(column: &'static str, max: f64, step: f64, default: f64) -> Field {
    Field { column, widget: Widget::Slider { min: 0.0, max, step, default } }
}

const fn select(column: &'static str) -> Field {
    Field { column, widget: Widget::Select }
}

/// Widgets per section, in display order.
pub const SECTIONS: [&[Field]; 3] = [
    &[
        int("Credit_Score", 500, Some(900), 750),
        dec("income", 0.0, 5000.0),
        slider("dtir1", 60.0, 0.5, 35.0),
        int("loan_amount", 10_000, None, 250_000),
        slider("LTV", 100.0, 0.1, 70.0),
        int("property_value", 10_000, None, 350_000),
        select("open_credit"),
        select("credit_type"),
        select("co-applicant_credit_type"),
        dec("Credit_Worthiness", 0.0, 1.0),
        dec("rate_of_interest", 0.0, 4.5),
    ],
    &[
        select("loan_type"),
        select("loan_purpose"),
        select("Gender"),
        select("approv_in_adv"),
        select("business_or_commercial"),
        select("occupancy_type"),
        Field { column: "term", widget: Widget::Fixed { options: &[180, 360], default: 360 } },
        int("age", 18, Some(80), 40),
        int("total_units", 1, Some(4), 1),
    ],
    &[
        select("Region"),
        select("Secured_by"),
        select("Security_Type"),
        select("submission_of_application"),
        select("construction_type"),
        select("loan_limit"),
        select("Neg_ammortization"),
        select("interest_only"),
        select("lump_sum_payment"),
        dec("Interest_rate_spread", -5.0, 1.0),
        dec("Upfront_charges", 0.0, 1500.0),
    ],
];

pub fn fields() -> impl Iterator<Item = &'static Field> {
    SECTIONS.iter().flat_map(|section| section.iter())
}

impl Field {
    /// Display text of the widget's initial value.
    pub fn default_text(&self, catalog: &Catalog) -> String {
        match self.widget {
            Widget::Integer { default, .. } | Widget::Fixed { default, .. } => default.to_string(),
            Widget::Decimal { default, .. } | Widget::Slider { default, .. } => {
                format!("{default:.1}")
            }
            Widget::Select => catalog
                .choices(self.column)
                .first()
                .map(|choice| choice.label.to_string())
                .unwrap_or_default(),
        }
    }

    fn parse(&self, raw: &str, catalog: &Catalog) -> Result<Value, FieldProblem> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FieldProblem::Required);
        }

        match self.widget {
            Widget::Integer { min, max, .. } => {
                let n: i64 = raw.parse().map_err(|_| FieldProblem::NotANumber)?;
                if n < min {
                    return Err(FieldProblem::BelowMin(min as f64));
                }
                if let Some(max) = max.filter(|max| n > *max) {
                    return Err(FieldProblem::AboveMax(max as f64));
                }
                Ok(json!(n))
            }
            Widget::Decimal { min, .. } => {
                let x = parse_decimal(raw)?;
                if x < min {
                    return Err(FieldProblem::BelowMin(min));
                }
                Ok(json!(x))
            }
            Widget::Slider { min, max, step, .. } => {
                let x = parse_decimal(raw)?;
                if x < min {
                    return Err(FieldProblem::BelowMin(min));
                }
                if x > max {
                    return Err(FieldProblem::AboveMax(max));
                }
                let steps = (x - min) / step;
                if (steps - steps.round()).abs() > STEP_TOLERANCE {
                    return Err(FieldProblem::OffStep(step));
                }
                Ok(json!(x))
            }
            Widget::Fixed { options, .. } => {
                let n: i64 = raw.parse().map_err(|_| FieldProblem::NotANumber)?;
                if options.contains(&n) {
                    Ok(json!(n))
                } else {
                    Err(FieldProblem::UnknownOption)
                }
            }
            Widget::Select => catalog
                .code_for(self.column, raw)
                .map(|code| json!(code))
                .ok_or(FieldProblem::UnknownOption),
        }
    }
}

/// Slack for decimal steps such as 0.1 that floats cannot represent exactly.
const STEP_TOLERANCE: f64 = 1e-6;

fn parse_decimal(raw: &str) -> Result<f64, FieldProblem> {
    raw.parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or(FieldProblem::NotANumber)
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub column: &'static str,
    pub problem: FieldProblem,
}

/// Current text of every widget, keyed by column.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<&'static str, String>,
}

impl FormState {
    pub fn defaults(catalog: &Catalog) -> Self {
        let values = fields()
            .map(|field| (field.column, field.default_text(catalog)))
            .collect();
        Self { values }
    }

    /// Keeps what the user submitted so the form re-renders with it.
    /// Columns absent from the submission fall back to their defaults.
    pub fn from_submission(submitted: &HashMap<String, String>, catalog: &Catalog) -> Self {
        let values = fields()
            .map(|field| {
                let text = submitted
                    .get(field.column)
                    .cloned()
                    .unwrap_or_else(|| field.default_text(catalog));
                (field.column, text)
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Converts submitted widget text into the service's JSON record.
///
/// Select labels are mapped back to codes and numeric bounds are checked.
/// The record always carries exactly the 31 schema columns.
pub fn parse_submission(
    submitted: &HashMap<String, String>,
    catalog: &Catalog,
) -> Result<Map<String, Value>, Vec<FieldError>> {
    let mut record = Map::new();
    let mut errors = Vec::new();

    for field in fields() {
        let raw = submitted.get(field.column).map(String::as_str).unwrap_or("");
        match field.parse(raw, catalog) {
            Ok(value) => {
                record.insert(field.column.to_string(), value);
            }
            Err(problem) => errors.push(FieldError { column: field.column, problem }),
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}

/// The record produced by submitting the untouched form.
pub fn default_record(catalog: &Catalog) -> Result<Map<String, Value>, Vec<FieldError>> {
    let submitted = fields()
        .map(|field| (field.column.to_string(), field.default_text(catalog)))
        .collect();
    parse_submission(&submitted, catalog)
}
