// src/workout.rs
use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;
use uuid::Uuid;

// Indexed by `month0()`
const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A `[latitude, longitude]` pair taken from a map click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lng)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumIter)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Capitalized name used in descriptions ("Running", "Cycling").
    pub const fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

// Parse the lowercase form value ("running" / "cycling")
impl TryFrom<&str> for WorkoutKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            _ => anyhow::bail!("Invalid workout kind: {}", value),
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "running"),
            WorkoutKind::Cycling => write!(f, "cycling"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkoutId(String);

impl WorkoutId {
    fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-specific payload. Derived metrics are filled in by the constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

/// A single logged workout.
///
/// Every field, including pace/speed and the description, is fixed when the
/// value is built. There are no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Local>,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    description: String,
    details: WorkoutDetails,
}

impl Workout {
    /// Builds a running workout timestamped now.
    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self::running_at(Local::now(), coords, distance_km, duration_min, cadence_spm)
    }

    /// Builds a cycling workout timestamped now.
    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::cycling_at(Local::now(), coords, distance_km, duration_min, elevation_gain_m)
    }

    pub fn running_at(
        created_at: DateTime<Local>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        Self::build(
            created_at,
            coords,
            distance_km,
            duration_min,
            WorkoutKind::Running,
            cadence_spm,
        )
    }

    pub fn cycling_at(
        created_at: DateTime<Local>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::build(
            created_at,
            coords,
            distance_km,
            duration_min,
            WorkoutKind::Cycling,
            elevation_gain_m,
        )
    }

    fn build(
        created_at: DateTime<Local>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        kind: WorkoutKind,
        kind_metric: f64,
    ) -> Self {
        let details = match kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence_spm: kind_metric,
                pace_min_per_km: duration_min / distance_km,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain_m: kind_metric,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        };

        Self {
            id: WorkoutId::generate(),
            created_at,
            coords,
            distance_km,
            duration_min,
            description: describe(kind, &created_at),
            details,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km; `None` for cycling.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace_min_per_km, .. } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Speed in km/h; `None` for running.
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }
}

/// "<Kind> on <Month> <Day>, <Year>" for the given creation instant.
pub fn describe(kind: WorkoutKind, created_at: &DateTime<Local>) -> String {
    format!(
        "{} on {} {}, {}",
        kind.label(),
        MONTHS[created_at.month0() as usize],
        created_at.day(),
        created_at.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strum::IntoEnumIterator;

    fn march_fifth() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn running_derives_pace_and_description() {
        let w = Workout::running_at(march_fifth(), Coords::new(10.0, 20.0), 5.0, 30.0, 150.0);
        assert_eq!(w.kind(), WorkoutKind::Running);
        assert_eq!(w.pace_min_per_km(), Some(6.0));
        assert_eq!(w.speed_km_per_h(), None);
        assert_eq!(w.description(), "Running on March 5, 2024");
    }

    #[test]
    fn cycling_derives_speed() {
        let w = Workout::cycling_at(march_fifth(), Coords::new(10.0, 20.0), 20.0, 60.0, 300.0);
        assert_eq!(w.kind(), WorkoutKind::Cycling);
        assert_eq!(w.speed_km_per_h(), Some(20.0));
        assert_eq!(w.description(), "Cycling on March 5, 2024");
        assert_eq!(
            w.details(),
            &WorkoutDetails::Cycling {
                elevation_gain_m: 300.0,
                speed_km_per_h: 20.0
            }
        );
    }

    #[test]
    fn description_is_stable() {
        let w = Workout::running_at(march_fifth(), Coords::new(0.0, 0.0), 1.0, 1.0, 1.0);
        let again = describe(w.kind(), &w.created_at());
        assert_eq!(again, w.description());
        assert_eq!(describe(w.kind(), &w.created_at()), again);
    }

    #[test]
    fn ids_are_unique() {
        let a = Workout::running(Coords::new(0.0, 0.0), 1.0, 1.0, 1.0);
        let b = Workout::running(Coords::new(0.0, 0.0), 1.0, 1.0, 1.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in WorkoutKind::iter() {
            let parsed = WorkoutKind::try_from(kind.to_string().as_str()).unwrap();
            assert_eq!(parsed, kind);
        }
        assert_eq!(WorkoutKind::try_from(" Cycling ").unwrap(), WorkoutKind::Cycling);
        assert!(WorkoutKind::try_from("swimming").is_err());
    }
}
