//! Error types for the tray menu bridge

use crate::tray::{ItemId, SubmenuId};
use thiserror::Error;

/// Tray menu error type
#[derive(Debug, Error)]
pub enum TrayMenuError {
    #[error("unknown or stale menu item ID: {0}")]
    UnknownItem(ItemId),

    #[error("unknown or stale submenu index: {0}")]
    UnknownSubmenu(SubmenuId),

    #[error("{0} is a separator and has no checked state")]
    NotCheckable(ItemId),

    #[error("icon data is empty")]
    EmptyIcon,

    #[error("unsupported icon color type: {0}")]
    UnsupportedIconFormat(&'static str),

    #[error(transparent)]
    Png(#[from] png::DecodingError),

    #[error(transparent)]
    BadIcon(#[from] tray_icon::BadIcon),

    #[error(transparent)]
    Menu(#[from] tray_icon::menu::Error),

    #[error(transparent)]
    Tray(#[from] tray_icon::Error),
}
