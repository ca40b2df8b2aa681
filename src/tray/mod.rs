//! Tray module - status bar item and menu bridge

mod icon;
mod layout;
mod menu;

pub use icon::{icon_from_png, png_to_rgba};
pub use layout::{ItemId, MenuEntry, MenuLayout, SubmenuId, TopEntry};
pub use menu::StatusMenu;
