// src/controller.rs
use crate::config::{Config, PopupConfig};
use crate::factory::{FormField, FormFields, ValidationError};
use crate::render::{describe_list_entry, describe_marker, ListEntry, MarkerDescriptor};
use crate::workout::{Coords, Workout, WorkoutId};
use thiserror::Error;
use tracing::{debug, info, warn};

// --- Collaborator interfaces ---

pub trait MapView {
    /// Shows the map centred on `center`. Called at most once per controller.
    fn init(&mut self, center: Coords, zoom: u8);
    fn place_marker(&mut self, marker: &MarkerDescriptor);
}

pub trait FormView {
    fn show(&mut self);
    fn hide(&mut self);
    /// Clears every input value.
    fn reset(&mut self);
    fn focus_field(&mut self, field: FormField);
    /// Swaps the visible kind-specific row (cadence <-> elevation).
    fn toggle_kind_field(&mut self);
}

pub trait ListView {
    fn append_entry(&mut self, entry: &ListEntry);
}

pub trait Notifier {
    /// Blocking notice shown to the user.
    fn alert(&mut self, message: &str);
}

/// Everything the controller drives.
pub trait Ui: MapView + FormView + ListView + Notifier {}

impl<T: MapView + FormView + ListView + Notifier> Ui for T {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("User denied Geolocation")]
    PermissionDenied,
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("Timeout expired while acquiring position")]
    Timeout,
    #[error("Geolocation is not supported")]
    Unsupported,
}

/// One-shot position lookup. No retry is attempted on failure.
pub trait GeolocationProvider {
    fn current_position(&mut self) -> Result<Coords, GeolocationError>;
}

// --- State ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending click, form hidden.
    Idle,
    /// A click is pending and the form is visible.
    AwaitingInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStatus {
    Locating,
    Ready,
    /// Geolocation failed; the map stays uninitialised for the session.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    AwaitingInput { pending: Coords },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Position(Result<Coords, GeolocationError>),
    MapClick(Coords),
    KindToggle,
    Submit(FormFields),
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(WorkoutId),
    Rejected(ValidationError),
    /// Submitted without a pending click.
    Ignored,
}

/// Owns the workout log and the pending click, and drives the UI through
/// map-click -> form -> submit -> render.
pub struct Controller<U: Ui> {
    ui: U,
    map: MapStatus,
    state: State,
    workouts: Vec<Workout>,
    zoom: u8,
    popup: PopupConfig,
}

impl<U: Ui> Controller<U> {
    pub fn new(mut ui: U, config: &Config) -> Self {
        ui.reset();
        Self {
            ui,
            map: MapStatus::Locating,
            state: State::Idle,
            workouts: Vec::new(),
            zoom: config.map.zoom,
            popup: config.popup,
        }
    }

    /// Asks `provider` for the current position and feeds the result to `on_position`.
    pub fn locate<G: GeolocationProvider>(&mut self, provider: &mut G) {
        let result = provider.current_position();
        self.on_position(result);
    }

    pub fn on_position(&mut self, result: Result<Coords, GeolocationError>) {
        if self.map != MapStatus::Locating {
            debug!("Ignoring position delivered after map status settled ({:?})", self.map);
            return;
        }
        match result {
            Ok(center) => {
                self.ui.init(center, self.zoom);
                self.map = MapStatus::Ready;
                info!(%center, zoom = self.zoom, "Map initialised");
            }
            Err(e) => {
                self.map = MapStatus::Unavailable;
                warn!("Could not get your position: {e}. The map will not be available.");
            }
        }
    }

    pub fn on_map_click(&mut self, coords: Coords) {
        if self.map != MapStatus::Ready {
            warn!(%coords, "Ignoring map click, map is not initialised ({:?})", self.map);
            return;
        }
        self.state = State::AwaitingInput { pending: coords };
        self.ui.show();
        self.ui.focus_field(FormField::Distance);
    }

    pub fn on_kind_toggle(&mut self) {
        self.ui.toggle_kind_field();
    }

    /// Builds a workout at the pending click from the submitted form.
    ///
    /// On a validation error the pending click is kept, so correcting the
    /// form and submitting again logs the workout at the same spot.
    pub fn on_submit(&mut self, fields: &FormFields) -> SubmitOutcome {
        let State::AwaitingInput { pending } = self.state else {
            warn!("Form submitted without a pending map click; ignoring");
            return SubmitOutcome::Ignored;
        };

        match fields.build(pending) {
            Ok(workout) => {
                debug!(?workout, "Workout created");
                let id = workout.id().clone();
                self.ui.place_marker(&describe_marker(&workout, self.popup));
                self.ui.append_entry(&describe_list_entry(&workout));
                self.workouts.push(workout);
                self.close_form();
                SubmitOutcome::Created(id)
            }
            Err(e) => {
                debug!(reason = e.reason(), field = %e.field(), "Workout rejected");
                self.ui.alert(&e.to_string());
                self.ui.focus_field(FormField::Distance);
                SubmitOutcome::Rejected(e)
            }
        }
    }

    pub fn on_cancel(&mut self) {
        if self.state != State::Idle {
            self.close_form();
        }
    }

    /// Routes an event to its handler. Returns the outcome for submissions.
    pub fn handle(&mut self, event: Event) -> Option<SubmitOutcome> {
        match event {
            Event::Position(result) => self.on_position(result),
            Event::MapClick(coords) => self.on_map_click(coords),
            Event::KindToggle => self.on_kind_toggle(),
            Event::Submit(fields) => return Some(self.on_submit(&fields)),
            Event::Cancel => self.on_cancel(),
        }
        None
    }

    fn close_form(&mut self) {
        self.state = State::Idle;
        self.ui.reset();
        self.ui.hide();
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::AwaitingInput { .. } => Phase::AwaitingInput,
        }
    }

    pub fn map_status(&self) -> MapStatus {
        self.map
    }

    /// Logged workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingUi {
        shown: usize,
        hidden: usize,
        toggles: usize,
        markers: usize,
        alerts: Vec<String>,
        focused: Vec<FormField>,
    }

    impl MapView for CountingUi {
        fn init(&mut self, _center: Coords, _zoom: u8) {}
        fn place_marker(&mut self, _marker: &MarkerDescriptor) {
            self.markers += 1;
        }
    }

    impl FormView for CountingUi {
        fn show(&mut self) {
            self.shown += 1;
        }
        fn hide(&mut self) {
            self.hidden += 1;
        }
        fn reset(&mut self) {}
        fn focus_field(&mut self, field: FormField) {
            self.focused.push(field);
        }
        fn toggle_kind_field(&mut self) {
            self.toggles += 1;
        }
    }

    impl ListView for CountingUi {
        fn append_entry(&mut self, _entry: &ListEntry) {}
    }

    impl Notifier for CountingUi {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    fn ready() -> Controller<CountingUi> {
        let mut c = Controller::new(CountingUi::default(), &Config::default());
        c.on_position(Ok(Coords::new(0.0, 0.0)));
        c
    }

    fn running(distance: &str) -> FormFields {
        FormFields {
            kind: "running".into(),
            distance: distance.into(),
            duration: "30".into(),
            cadence: "150".into(),
            ..Default::default()
        }
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut c = ready();
        c.on_map_click(Coords::new(1.0, 1.0));
        assert_eq!(c.phase(), Phase::AwaitingInput);
        assert_eq!(c.ui.shown, 1);
        c.on_cancel();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.ui.hidden, 1);
        assert_eq!(c.on_submit(&running("5")), SubmitOutcome::Ignored);
    }

    #[test]
    fn cancel_when_idle_does_nothing() {
        let mut c = ready();
        c.on_cancel();
        assert_eq!(c.ui.hidden, 0);
    }

    #[test]
    fn toggle_is_ui_only() {
        let mut c = ready();
        c.handle(Event::KindToggle);
        c.handle(Event::KindToggle);
        assert_eq!(c.ui.toggles, 2);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn rejected_submit_keeps_pending_click() {
        let mut c = ready();
        c.on_map_click(Coords::new(3.0, 4.0));
        let outcome = c.on_submit(&running("-1"));
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(c.ui.alerts.len(), 1);
        assert_eq!(c.ui.focused, vec![FormField::Distance, FormField::Distance]);
        assert_eq!(c.phase(), Phase::AwaitingInput);

        let outcome = c.on_submit(&running("5"));
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(c.workouts()[0].coords(), Coords::new(3.0, 4.0));
        assert_eq!(c.ui.markers, 1);
    }

    #[test]
    fn second_position_is_ignored() {
        let mut c = Controller::new(CountingUi::default(), &Config::default());
        c.on_position(Err(GeolocationError::Timeout));
        c.on_position(Ok(Coords::new(1.0, 1.0)));
        assert_eq!(c.map_status(), MapStatus::Unavailable);
    }
}
