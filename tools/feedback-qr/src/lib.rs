//! Feedback-QR: terminal front end for the feedback publisher.
//!
//! Runs one activation for a solved challenge and shows its state: a
//! placeholder while publishing, then a QR code for the published file, or
//! a failure panel.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  FEEDBACK-QR v0.1.0  ● READY              │
//! ├───────────────────────────────────────────┤
//! │  Two Sum                                  │
//! │              █▀▀▀▀▀█ ▄▀ █▀▀▀▀▀█           │
//! │              █ ███ █ ▀█ █ ███ █           │
//! │              ▀▀▀▀▀▀▀ ▀ ▀▀▀▀▀▀▀▀           │
//! │       Scan to open: https://...           │
//! └───────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod domain;
pub mod dry_run;
pub mod ui;

pub use cli::Args;
pub use domain::{App, AppState};
