//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Main layout orchestration
//! - `widgets/`: QR, placeholder and failure panels, help overlay

mod layout;

pub mod widgets;

pub use layout::render;
