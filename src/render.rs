// src/render.rs
use crate::config::PopupConfig;
use crate::workout::{Coords, Workout, WorkoutDetails, WorkoutId, WorkoutKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Running,
    Cycling,
    Stopwatch,
    Lightning,
    Footprint,
    Mountain,
}

impl Icon {
    pub const fn for_kind(kind: WorkoutKind) -> Self {
        match kind {
            WorkoutKind::Running => Icon::Running,
            WorkoutKind::Cycling => Icon::Cycling,
        }
    }

    /// Stable key for hosts that draw their own icons.
    pub const fn key(self) -> &'static str {
        match self {
            Icon::Running => "running",
            Icon::Cycling => "cycling",
            Icon::Stopwatch => "duration",
            Icon::Lightning => "rate",
            Icon::Footprint => "cadence",
            Icon::Mountain => "elevation",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Icon::Running => "🏃‍♂️",
            Icon::Cycling => "🚴‍♀️",
            Icon::Stopwatch => "⏱",
            Icon::Lightning => "⚡️",
            Icon::Footprint => "🦶🏼",
            Icon::Mountain => "⛰",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub coords: Coords,
    pub popup_text: String,
    pub style_class: String,
    pub popup: PopupConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub icon: Icon,
    pub value: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub rows: Vec<ListRow>,
}

pub fn describe_marker(workout: &Workout, popup: PopupConfig) -> MarkerDescriptor {
    let kind = workout.kind();
    MarkerDescriptor {
        coords: workout.coords(),
        popup_text: format!("{} {}", Icon::for_kind(kind).glyph(), workout.description()),
        style_class: format!("{kind}-popup"),
        popup,
    }
}

/// Rows for the workout list, common rows first.
/// Pace and speed are shown with one decimal; entered values are shown as typed.
pub fn describe_list_entry(workout: &Workout) -> ListEntry {
    let kind = workout.kind();
    let mut rows = vec![
        row(Icon::for_kind(kind), workout.distance_km().to_string(), "km"),
        row(Icon::Stopwatch, workout.duration_min().to_string(), "min"),
    ];

    match *workout.details() {
        WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } => {
            rows.push(row(Icon::Lightning, format!("{pace_min_per_km:.1}"), "min/km"));
            rows.push(row(Icon::Footprint, cadence_spm.to_string(), "spm"));
        }
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => {
            rows.push(row(Icon::Lightning, format!("{speed_km_per_h:.1}"), "km/h"));
            rows.push(row(Icon::Mountain, elevation_gain_m.to_string(), "m"));
        }
    }

    ListEntry {
        id: workout.id().clone(),
        kind,
        title: workout.description().to_string(),
        rows,
    }
}

fn row(icon: Icon, value: String, unit: &'static str) -> ListRow {
    ListRow { icon, value, unit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn at_noon() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2023, 11, 28, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn marker_uses_kind_class_and_icon() {
        let w = Workout::cycling_at(at_noon(), Coords::new(1.0, 2.0), 20.0, 60.0, 300.0);
        let marker = describe_marker(&w, PopupConfig::default());
        assert_eq!(marker.coords, Coords::new(1.0, 2.0));
        assert_eq!(marker.style_class, "cycling-popup");
        assert_eq!(marker.popup_text, "🚴‍♀️ Cycling on November 28, 2023");
        assert_eq!(marker.popup.max_width, 250);
    }

    #[test]
    fn running_rows_round_pace_only() {
        let w = Workout::running_at(at_noon(), Coords::new(0.0, 0.0), 3.0, 20.0, 172.0);
        let entry = describe_list_entry(&w);
        let rows: Vec<(&str, &str, &str)> = entry
            .rows
            .iter()
            .map(|r| (r.icon.key(), r.value.as_str(), r.unit))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("running", "3", "km"),
                ("duration", "20", "min"),
                ("rate", "6.7", "min/km"),
                ("cadence", "172", "spm"),
            ]
        );
        assert_eq!(entry.title, "Running on November 28, 2023");
        assert_eq!(&entry.id, w.id());
    }

    #[test]
    fn cycling_rows_keep_entered_elevation() {
        let w = Workout::cycling_at(at_noon(), Coords::new(0.0, 0.0), 27.5, 95.0, 523.5);
        let entry = describe_list_entry(&w);
        assert_eq!(entry.kind, WorkoutKind::Cycling);
        assert_eq!(entry.rows[0].value, "27.5");
        assert_eq!(entry.rows[2].value, "17.4");
        assert_eq!(entry.rows[2].unit, "km/h");
        assert_eq!(entry.rows[3].value, "523.5");
        assert_eq!(entry.rows[3].icon, Icon::Mountain);
    }
}
