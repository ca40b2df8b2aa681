//! Menu bookkeeping: identifier allocation, generations, and per-entry state
//!
//! `MenuLayout` is the platform-free record behind [`StatusMenu`]. It owns the
//! two identifier namespaces (top-level/submenu-child items vs. submenus),
//! tracks which generation each entry belongs to, and holds the checked state
//! that the platform menu mirrors.
//!
//! [`StatusMenu`]: crate::tray::StatusMenu

use crate::error::TrayMenuError;
use std::collections::HashMap;
use std::fmt;

/// Handle for a menu entry (top-level or inside a submenu).
///
/// Issued by the add operations and valid until the next
/// [`MenuLayout::clear`]; IDs are never reused across generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Handle for a top-level submenu.
///
/// A separate namespace from [`ItemId`]: a submenu handle addresses the
/// container, not any clickable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmenuId(u32);

impl fmt::Display for SubmenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submenu#{}", self.0)
    }
}

/// A menu entry to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Horizontal separator line. Carries no title or state.
    Separator,
    /// Clickable entry with a title, a checkmark flag, and a disabled flag.
    Item {
        title: String,
        checked: bool,
        disabled: bool,
    },
}

impl MenuEntry {
    /// Plain enabled, unchecked entry.
    pub fn item(title: impl Into<String>) -> Self {
        Self::Item {
            title: title.into(),
            checked: false,
            disabled: false,
        }
    }
}

/// One top-level row, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopEntry {
    Item(ItemId),
    Submenu(SubmenuId),
}

#[derive(Debug)]
struct ItemRecord {
    entry: MenuEntry,
    parent: Option<SubmenuId>,
}

#[derive(Debug)]
struct SubmenuRecord {
    title: String,
    children: Vec<ItemId>,
}

/// Platform-free record of the current menu generation.
#[derive(Debug, Default)]
pub struct MenuLayout {
    next_item: u32,
    next_submenu: u32,
    generation: u64,
    items: HashMap<ItemId, ItemRecord>,
    submenus: HashMap<SubmenuId, SubmenuRecord>,
    top_level: Vec<TopEntry>,
}

impl MenuLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level entry and issue its ID.
    pub fn add_item(&mut self, entry: MenuEntry) -> ItemId {
        let id = self.alloc_item(entry, None);
        self.top_level.push(TopEntry::Item(id));
        id
    }

    /// Append a top-level submenu and issue its index.
    pub fn add_submenu(&mut self, title: &str) -> SubmenuId {
        let id = SubmenuId(self.next_submenu);
        self.next_submenu += 1;
        self.submenus.insert(
            id,
            SubmenuRecord {
                title: title.to_string(),
                children: Vec::new(),
            },
        );
        self.top_level.push(TopEntry::Submenu(id));
        id
    }

    /// Append a child entry to an existing submenu.
    pub fn add_submenu_item(
        &mut self,
        submenu: SubmenuId,
        entry: MenuEntry,
    ) -> Result<ItemId, TrayMenuError> {
        if !self.submenus.contains_key(&submenu) {
            return Err(TrayMenuError::UnknownSubmenu(submenu));
        }
        let id = self.alloc_item(entry, Some(submenu));
        self.submenus
            .get_mut(&submenu)
            .ok_or(TrayMenuError::UnknownSubmenu(submenu))?
            .children
            .push(id);
        Ok(id)
    }

    /// Update the checkmark flag of a live entry.
    ///
    /// Stale or never-issued IDs fail without touching the current
    /// generation; separators have no checked state and fail too.
    pub fn set_checked(&mut self, id: ItemId, checked: bool) -> Result<(), TrayMenuError> {
        match self.items.get_mut(&id) {
            None => Err(TrayMenuError::UnknownItem(id)),
            Some(record) => match &mut record.entry {
                MenuEntry::Separator => Err(TrayMenuError::NotCheckable(id)),
                MenuEntry::Item { checked: flag, .. } => {
                    *flag = checked;
                    Ok(())
                }
            },
        }
    }

    /// Checkmark flag of a live entry, or `None` for stale IDs and separators.
    pub fn checked(&self, id: ItemId) -> Option<bool> {
        match &self.items.get(&id)?.entry {
            MenuEntry::Separator => None,
            MenuEntry::Item { checked, .. } => Some(*checked),
        }
    }

    /// Submenu a live entry belongs to, if any.
    pub fn parent(&self, id: ItemId) -> Option<SubmenuId> {
        self.items.get(&id)?.parent
    }

    /// Title of a live submenu.
    pub fn submenu_title(&self, id: SubmenuId) -> Option<&str> {
        self.submenus.get(&id).map(|s| s.title.as_str())
    }

    /// Children of a live submenu, in insertion order.
    pub fn children(&self, id: SubmenuId) -> Option<&[ItemId]> {
        self.submenus.get(&id).map(|s| s.children.as_slice())
    }

    /// Top-level rows in insertion order.
    pub fn top_level(&self) -> &[TopEntry] {
        &self.top_level
    }

    /// Drop every entry and submenu and start a new generation.
    ///
    /// All previously issued IDs and indices become stale. ID allocation
    /// continues monotonically, so a stale ID can never alias a live entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.submenus.clear();
        self.top_level.clear();
        self.generation += 1;
    }

    /// Generation counter, incremented by each [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn alloc_item(&mut self, entry: MenuEntry, parent: Option<SubmenuId>) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        self.items.insert(id, ItemRecord { entry, parent });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_unique_within_generation() {
        let mut layout = MenuLayout::new();
        let a = layout.add_item(MenuEntry::item("a"));
        let b = layout.add_item(MenuEntry::Separator);
        let sub = layout.add_submenu("sub");
        let c = layout.add_submenu_item(sub, MenuEntry::item("c")).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn submenu_children_share_item_namespace() {
        let mut layout = MenuLayout::new();
        let top = layout.add_item(MenuEntry::item("top"));
        let sub = layout.add_submenu("sub");
        let child = layout.add_submenu_item(sub, MenuEntry::item("child")).unwrap();
        assert_ne!(top, child);
        assert_eq!(layout.parent(child), Some(sub));
        assert_eq!(layout.parent(top), None);
    }

    #[test]
    fn set_checked_roundtrip() {
        let mut layout = MenuLayout::new();
        let id = layout.add_item(MenuEntry::item("entry"));
        assert_eq!(layout.checked(id), Some(false));
        layout.set_checked(id, true).unwrap();
        assert_eq!(layout.checked(id), Some(true));
        layout.set_checked(id, false).unwrap();
        assert_eq!(layout.checked(id), Some(false));
    }

    #[test]
    fn set_checked_on_separator_fails() {
        let mut layout = MenuLayout::new();
        let sep = layout.add_item(MenuEntry::Separator);
        assert!(matches!(
            layout.set_checked(sep, true),
            Err(TrayMenuError::NotCheckable(id)) if id == sep
        ));
    }

    #[test]
    fn stale_id_rejected_after_clear() {
        let mut layout = MenuLayout::new();
        let old = layout.add_item(MenuEntry::item("old"));
        layout.clear();
        let fresh = layout.add_item(MenuEntry::Item {
            title: "fresh".to_string(),
            checked: false,
            disabled: false,
        });

        // The stale ID must fail and must not alias the new entry.
        assert_ne!(old, fresh);
        assert!(matches!(
            layout.set_checked(old, true),
            Err(TrayMenuError::UnknownItem(id)) if id == old
        ));
        assert_eq!(layout.checked(fresh), Some(false));
    }

    #[test]
    fn stale_submenu_rejected_after_clear() {
        let mut layout = MenuLayout::new();
        let old = layout.add_submenu("old");
        layout.clear();
        let fresh = layout.add_submenu("fresh");
        assert_ne!(old, fresh);
        assert!(matches!(
            layout.add_submenu_item(old, MenuEntry::item("x")),
            Err(TrayMenuError::UnknownSubmenu(id)) if id == old
        ));
        assert_eq!(layout.children(fresh), Some(&[][..]));
    }

    #[test]
    fn unknown_submenu_rejected() {
        let mut layout = MenuLayout::new();
        let sub = layout.add_submenu("real");
        layout.clear();
        assert!(layout
            .add_submenu_item(sub, MenuEntry::Separator)
            .is_err());
    }

    #[test]
    fn children_preserve_insertion_order() {
        let mut layout = MenuLayout::new();
        let sub = layout.add_submenu("sub");
        let a = layout.add_submenu_item(sub, MenuEntry::item("a")).unwrap();
        let b = layout.add_submenu_item(sub, MenuEntry::Separator).unwrap();
        let c = layout.add_submenu_item(sub, MenuEntry::item("c")).unwrap();
        assert_eq!(layout.children(sub), Some(&[a, b, c][..]));
    }

    #[test]
    fn top_level_preserves_insertion_order() {
        let mut layout = MenuLayout::new();
        let a = layout.add_item(MenuEntry::item("a"));
        let sub = layout.add_submenu("sub");
        let b = layout.add_item(MenuEntry::item("b"));
        assert_eq!(
            layout.top_level(),
            &[
                TopEntry::Item(a),
                TopEntry::Submenu(sub),
                TopEntry::Item(b)
            ]
        );
        assert_eq!(layout.submenu_title(sub), Some("sub"));
    }

    #[test]
    fn generation_increments_on_clear() {
        let mut layout = MenuLayout::new();
        assert_eq!(layout.generation(), 0);
        layout.clear();
        layout.clear();
        assert_eq!(layout.generation(), 2);
    }

    #[test]
    fn clearing_twice_keeps_ids_monotonic() {
        let mut layout = MenuLayout::new();
        let first = layout.add_item(MenuEntry::item("1"));
        layout.clear();
        let second = layout.add_item(MenuEntry::item("2"));
        layout.clear();
        let third = layout.add_item(MenuEntry::item("3"));
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
    }
}
