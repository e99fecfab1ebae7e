// src/terminal.rs
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use map_workout_lib::{
    describe_list_entry, Coords, FormField, FormView, GeolocationError, GeolocationProvider,
    ListEntry, ListView, MapView, MarkerDescriptor, Notifier, Workout,
};
use tracing::debug;

/// Prints every UI signal from the controller to the terminal.
pub struct TerminalUi {
    header_color: Color,
    tile_url: String,
    attribution: String,
}

impl TerminalUi {
    pub fn new(header_color: Color, tile_url: String, attribution: String) -> Self {
        Self {
            header_color,
            tile_url,
            attribution,
        }
    }

    fn map_banner(&self, center: Coords, zoom: u8) -> String {
        format!(
            "Map centred on {center} at zoom {zoom} (tiles: {}, {})",
            self.tile_url, self.attribution
        )
    }
}

impl MapView for TerminalUi {
    fn init(&mut self, center: Coords, zoom: u8) {
        println!("{}", self.map_banner(center, zoom));
    }

    fn place_marker(&mut self, marker: &MarkerDescriptor) {
        println!("📍 {} {} [{}]", marker.coords, marker.popup_text, marker.style_class);
    }
}

impl FormView for TerminalUi {
    fn show(&mut self) {
        debug!("form shown");
    }

    fn hide(&mut self) {
        debug!("form hidden");
    }

    fn reset(&mut self) {
        debug!("form cleared");
    }

    fn focus_field(&mut self, field: FormField) {
        println!("Enter workout details ({field} field focused)");
    }

    fn toggle_kind_field(&mut self) {
        println!("Switched between cadence and elevation gain fields");
    }
}

impl ListView for TerminalUi {
    fn append_entry(&mut self, entry: &ListEntry) {
        print_entry_table(entry, self.header_color);
    }
}

impl Notifier for TerminalUi {
    fn alert(&mut self, message: &str) {
        eprintln!("⚠ {message}");
    }
}

/// Reports a position fixed up front, or a denied permission when there is none.
pub struct FixedPosition(pub Option<Coords>);

impl GeolocationProvider for FixedPosition {
    fn current_position(&mut self) -> Result<Coords, GeolocationError> {
        self.0.ok_or(GeolocationError::PermissionDenied)
    }
}

fn print_entry_table(entry: &ListEntry, header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(&entry.title).fg(header_color), Cell::new(""), Cell::new("")]);

    for row in &entry.rows {
        table.add_row(vec![
            Cell::new(row.icon.glyph()),
            Cell::new(&row.value),
            Cell::new(row.unit),
        ]);
    }
    println!("{table}");
}

/// Prints the whole log, newest first like the on-page list.
pub fn print_workout_table(workouts: &[Workout], header_color: Color) {
    if workouts.is_empty() {
        println!("No workouts logged yet. Click the map to add one.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Workout").fg(header_color),
            Cell::new("Location").fg(header_color),
            Cell::new("Distance (km)").fg(header_color),
            Cell::new("Duration (min)").fg(header_color),
            Cell::new("Pace / Speed").fg(header_color),
            Cell::new("Cadence / Elevation").fg(header_color),
        ]);

    for workout in workouts.iter().rev() {
        let entry = describe_list_entry(workout);
        let value = |i: usize| entry.rows.get(i).map_or("", |r| r.value.as_str());
        let with_unit = |i: usize| {
            entry
                .rows
                .get(i)
                .map_or_else(String::new, |r| format!("{} {}", r.value, r.unit))
        };
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(workout.coords().to_string()),
            Cell::new(value(0)),
            Cell::new(value(1)),
            Cell::new(with_unit(2)),
            Cell::new(with_unit(3)),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_banner_credits_the_tile_source() {
        let ui = TerminalUi::new(
            Color::Green,
            "https://tile.example/{z}/{x}/{y}.png".to_string(),
            "© Example contributors".to_string(),
        );
        let banner = ui.map_banner(Coords::new(1.0, 2.0), 15);
        assert!(banner.contains("zoom 15"));
        assert!(banner.contains("https://tile.example/{z}/{x}/{y}.png"));
        assert!(banner.ends_with("© Example contributors)"));
    }
}
