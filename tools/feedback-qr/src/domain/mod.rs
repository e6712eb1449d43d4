//! Domain models for the terminal front end.

mod app;

pub use app::{App, AppState};
