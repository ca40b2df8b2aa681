//! Tray Bridge
//!
//! A bridge for managing a system-tray (macOS status bar) menu: creating the
//! status item from icon bytes, appending flat and nested menu entries,
//! toggling checkmarks, and clearing the menu wholesale.
//!
//! # Features
//! - Owned [`StatusMenu`] handle instead of process-wide singleton state
//! - Distinct [`ItemId`] and [`SubmenuId`] identifier namespaces
//! - [`MenuEntry`] tagged variant instead of separator boolean flags
//! - Generation tracking: clearing invalidates all previously issued IDs
//! - Clicks forwarded as `ItemId`s over a tokio channel

pub mod config;
pub mod error;
pub mod tray;

pub use config::TrayConfig;
pub use error::TrayMenuError;
pub use tray::{icon_from_png, ItemId, MenuEntry, MenuLayout, StatusMenu, SubmenuId};
