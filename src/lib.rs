// src/lib.rs

// --- Declare modules ---
mod config;
pub mod controller;
pub mod factory;
pub mod render;
pub mod workout;

// --- Expose public types ---
pub use config::{
    get_config_path as get_config_path_util,
    load as load_config_util,
    parse_color,
    save as save_config_util,
    Config,
    ConfigError,
    MapConfig,
    PopupConfig,
    StandardColor,
    ThemeConfig,
};

pub use controller::{
    Controller, Event, FormView, GeolocationError, GeolocationProvider, ListView, MapStatus,
    MapView, Notifier, Phase, SubmitOutcome, Ui,
};
pub use factory::{coerce_number, create_workout, FormField, FormFields, ValidationError};
pub use render::{describe_list_entry, describe_marker, Icon, ListEntry, ListRow, MarkerDescriptor};
pub use workout::{Coords, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
