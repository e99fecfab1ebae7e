// src/factory.rs
use crate::workout::{Coords, Workout, WorkoutKind};
use std::fmt;
use thiserror::Error;

const RADIX_PREFIXES: [(&str, u32); 6] = [
    ("0x", 16),
    ("0X", 16),
    ("0o", 8),
    ("0O", 8),
    ("0b", 2),
    ("0B", 2),
];

/// Input fields of the workout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Kind,
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl FormField {
    /// The field holding the kind-specific metric.
    pub const fn metric_for(kind: WorkoutKind) -> Self {
        match kind {
            WorkoutKind::Running => FormField::Cadence,
            WorkoutKind::Cycling => FormField::Elevation,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Kind => write!(f, "type"),
            FormField::Distance => write!(f, "distance"),
            FormField::Duration => write!(f, "duration"),
            FormField::Cadence => write!(f, "cadence"),
            FormField::Elevation => write!(f, "elevation gain"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{} - {field} has to be a number (got '{raw}').", .kind.label())]
    NotAFiniteNumber {
        kind: WorkoutKind,
        field: FormField,
        raw: String,
    },
    #[error("{} - {field} has to be a positive number (got {value}).", .kind.label())]
    NotPositive {
        kind: WorkoutKind,
        field: FormField,
        value: f64,
    },
    #[error("Unknown workout type: '{0}'. Use 'running' or 'cycling'.")]
    UnknownKind(String),
}

impl ValidationError {
    /// Stable machine-readable reason code.
    pub const fn reason(&self) -> &'static str {
        match self {
            ValidationError::NotAFiniteNumber { .. } => "not-a-finite-number",
            ValidationError::NotPositive { .. } => "not-positive",
            ValidationError::UnknownKind(_) => "unknown-kind",
        }
    }

    /// The field the user should correct.
    pub const fn field(&self) -> FormField {
        match self {
            ValidationError::NotAFiniteNumber { field, .. }
            | ValidationError::NotPositive { field, .. } => *field,
            ValidationError::UnknownKind(_) => FormField::Kind,
        }
    }
}

/// Raw string values of the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormFields {
    /// Validates the fields and builds a workout located at `coords`.
    /// Only the metric field matching the selected kind is read.
    /// # Errors
    /// Returns `ValidationError` if the kind is unknown or a numeric field is rejected.
    pub fn build(&self, coords: Coords) -> Result<Workout, ValidationError> {
        let kind = parse_kind(&self.kind)?;
        let raw_metric = match kind {
            WorkoutKind::Running => &self.cadence,
            WorkoutKind::Cycling => &self.elevation,
        };
        build_workout(kind, coords, &self.distance, &self.duration, raw_metric)
    }
}

/// Validates raw form values and builds the workout variant named by `kind`.
/// # Errors
/// - `ValidationError::UnknownKind` if `kind` is not "running" or "cycling".
/// - `ValidationError::NotAFiniteNumber` if any value does not coerce to a finite number.
/// - `ValidationError::NotPositive` if distance, duration or (running only) cadence is not > 0.
pub fn create_workout(
    kind: &str,
    coords: Coords,
    raw_distance: &str,
    raw_duration: &str,
    raw_kind_metric: &str,
) -> Result<Workout, ValidationError> {
    let kind = parse_kind(kind)?;
    build_workout(kind, coords, raw_distance, raw_duration, raw_kind_metric)
}

fn parse_kind(raw: &str) -> Result<WorkoutKind, ValidationError> {
    WorkoutKind::try_from(raw).map_err(|_| ValidationError::UnknownKind(raw.trim().to_string()))
}

fn build_workout(
    kind: WorkoutKind,
    coords: Coords,
    raw_distance: &str,
    raw_duration: &str,
    raw_kind_metric: &str,
) -> Result<Workout, ValidationError> {
    let metric_field = FormField::metric_for(kind);

    // Finiteness is checked for every field before any positivity check.
    let distance = finite(kind, FormField::Distance, raw_distance)?;
    let duration = finite(kind, FormField::Duration, raw_duration)?;
    let metric = finite(kind, metric_field, raw_kind_metric)?;

    positive(kind, FormField::Distance, distance)?;
    positive(kind, FormField::Duration, duration)?;

    // Elevation gain may be zero or negative (downhill rides are accepted).
    let workout = match kind {
        WorkoutKind::Running => {
            positive(kind, metric_field, metric)?;
            Workout::running(coords, distance, duration, metric)
        }
        WorkoutKind::Cycling => Workout::cycling(coords, distance, duration, metric),
    };
    Ok(workout)
}

fn finite(kind: WorkoutKind, field: FormField, raw: &str) -> Result<f64, ValidationError> {
    let value = coerce_number(raw);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotAFiniteNumber {
            kind,
            field,
            raw: raw.to_string(),
        })
    }
}

fn positive(kind: WorkoutKind, field: FormField, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { kind, field, value })
    }
}

/// Coerces a form value to a number the way a browser does for `+input.value`.
///
/// Blank input is `0`, `0x`/`0o`/`0b` prefixed integers are accepted, `Infinity`
/// is infinite, and everything unparsable is `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in RADIX_PREFIXES {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return fold_digits(digits, radix);
        }
    }

    // `str::parse` also takes "inf" and "nan", which a form would reject.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// Accumulates in f64 so literals wider than u64 stay finite.
fn fold_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    acc
}
