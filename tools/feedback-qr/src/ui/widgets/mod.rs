//! Reusable UI components.

mod help_overlay;
pub mod qr;
pub mod view_panel;

pub use help_overlay::render_help_overlay;
