//! Status bar menu handle
//!
//! [`StatusMenu`] owns one tray (status bar) item and its menu and exposes
//! the bridge operations: append flat entries, append submenus and their
//! children, toggle checkmarks, and clear the menu wholesale.
//!
//! The handle is not `Send`; create it and call it on the thread that runs
//! the host GUI loop. Clicks are forwarded as [`ItemId`]s over the channel
//! supplied at construction.

use crate::error::TrayMenuError;
use crate::tray::icon::icon_from_png;
use crate::tray::layout::{ItemId, MenuEntry, MenuLayout, SubmenuId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tray_icon::{
    menu::{CheckMenuItem, Menu, MenuEvent, MenuId, PredefinedMenuItem, Submenu},
    TrayIcon as TrayIconHandle, TrayIconBuilder,
};

/// Maps platform menu-item IDs to bridge IDs, shared with the click thread.
type ClickRoutes = Arc<Mutex<HashMap<MenuId, ItemId>>>;

/// Owned handle over the status bar item and its menu.
pub struct StatusMenu {
    /// Tray icon handle
    tray: TrayIconHandle,
    /// Platform menu currently installed on the tray item
    menu: Menu,
    /// Generation, ID, and checked-state bookkeeping
    layout: MenuLayout,
    /// Retained platform handles for checkable entries
    items: HashMap<ItemId, CheckMenuItem>,
    /// Retained platform handles for submenus
    submenus: HashMap<SubmenuId, Submenu>,
    /// Click routing table
    routes: ClickRoutes,
}

impl StatusMenu {
    /// Create the status bar item with the given PNG icon.
    ///
    /// Clicks on any non-separator entry are sent as [`ItemId`]s over
    /// `click_tx`. The underlying click receiver is process-global; create at
    /// most one `StatusMenu` per process.
    pub fn new(
        icon_png: &[u8],
        click_tx: mpsc::UnboundedSender<ItemId>,
    ) -> Result<Self, TrayMenuError> {
        let icon = icon_from_png(icon_png)?;

        let menu = Menu::new();
        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu.clone()))
            .with_icon(icon)
            .build()?;

        info!("Status bar item created");

        let routes: ClickRoutes = Arc::new(Mutex::new(HashMap::new()));
        spawn_click_handler(Arc::clone(&routes), click_tx);

        Ok(Self {
            tray,
            menu,
            layout: MenuLayout::new(),
            items: HashMap::new(),
            submenus: HashMap::new(),
            routes,
        })
    }

    /// Append a top-level entry. The returned ID stays valid until the next
    /// [`clear`](Self::clear).
    pub fn add_item(&mut self, entry: MenuEntry) -> Result<ItemId, TrayMenuError> {
        match &entry {
            MenuEntry::Separator => {
                self.menu.append(&PredefinedMenuItem::separator())?;
                Ok(self.layout.add_item(entry))
            }
            MenuEntry::Item {
                title,
                checked,
                disabled,
            } => {
                let item = CheckMenuItem::new(title, !disabled, *checked, None);
                self.menu.append(&item)?;
                let id = self.layout.add_item(entry.clone());
                self.routes.lock().insert(item.id().clone(), id);
                self.items.insert(id, item);
                Ok(id)
            }
        }
    }

    /// Append a top-level submenu. The returned index stays valid until the
    /// next [`clear`](Self::clear).
    pub fn add_submenu(&mut self, title: &str) -> Result<SubmenuId, TrayMenuError> {
        let submenu = Submenu::new(title, true);
        self.menu.append(&submenu)?;
        let id = self.layout.add_submenu(title);
        self.submenus.insert(id, submenu);
        Ok(id)
    }

    /// Append a child entry to an existing submenu.
    pub fn add_submenu_item(
        &mut self,
        submenu: SubmenuId,
        entry: MenuEntry,
    ) -> Result<ItemId, TrayMenuError> {
        let id = self.layout.add_submenu_item(submenu, entry.clone())?;
        let handle = self
            .submenus
            .get(&submenu)
            .ok_or(TrayMenuError::UnknownSubmenu(submenu))?;
        match &entry {
            MenuEntry::Separator => {
                handle.append(&PredefinedMenuItem::separator())?;
            }
            MenuEntry::Item {
                title,
                checked,
                disabled,
            } => {
                let item = CheckMenuItem::new(title, !disabled, *checked, None);
                handle.append(&item)?;
                self.routes.lock().insert(item.id().clone(), id);
                self.items.insert(id, item);
            }
        }
        Ok(id)
    }

    /// Append a separator inside an existing submenu.
    pub fn add_submenu_separator(&mut self, submenu: SubmenuId) -> Result<(), TrayMenuError> {
        self.add_submenu_item(submenu, MenuEntry::Separator)
            .map(|_| ())
    }

    /// Update the checkmark of a live entry.
    ///
    /// Stale IDs from before the last [`clear`](Self::clear) fail without
    /// touching the current menu; separators fail as not checkable.
    pub fn set_checked(&mut self, id: ItemId, checked: bool) -> Result<(), TrayMenuError> {
        self.layout.set_checked(id, checked)?;
        let item = self
            .items
            .get(&id)
            .ok_or(TrayMenuError::UnknownItem(id))?;
        item.set_checked(checked);
        Ok(())
    }

    /// Remove every entry and submenu.
    ///
    /// Installs a fresh platform menu and invalidates all previously issued
    /// IDs and indices; pending clicks on old entries are dropped.
    pub fn clear(&mut self) {
        let menu = Menu::new();
        self.tray.set_menu(Some(Box::new(menu.clone())));
        self.menu = menu;
        self.items.clear();
        self.submenus.clear();
        self.routes.lock().clear();
        self.layout.clear();
        debug!("Menu cleared, generation {}", self.layout.generation());
    }

    /// Replace the status item icon from PNG bytes.
    pub fn set_icon(&mut self, icon_png: &[u8]) -> Result<(), TrayMenuError> {
        let icon = icon_from_png(icon_png)?;
        self.tray.set_icon(Some(icon))?;
        Ok(())
    }

    /// Set the status item tooltip.
    pub fn set_tooltip(&mut self, tooltip: &str) -> Result<(), TrayMenuError> {
        self.tray.set_tooltip(Some(tooltip))?;
        Ok(())
    }

    /// Bookkeeping view of the current menu generation.
    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }
}

/// Forward platform menu events to the click channel.
fn spawn_click_handler(routes: ClickRoutes, click_tx: mpsc::UnboundedSender<ItemId>) {
    std::thread::spawn(move || {
        let receiver = MenuEvent::receiver();
        loop {
            if let Ok(event) = receiver.recv() {
                let target = routes.lock().get(&event.id).copied();
                match target {
                    Some(id) => {
                        debug!("Menu click: {}", id);
                        if click_tx.send(id).is_err() {
                            break;
                        }
                    }
                    None => {
                        debug!("Dropping click on stale or unknown entry: {:?}", event.id);
                    }
                }
            }
        }
    });
}
