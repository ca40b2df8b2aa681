//! Tray Bridge demo - Entry Point
//!
//! Hosts a [`StatusMenu`] inside a winit event loop and builds a small
//! provider-picker menu: flat entries, separators, and a checkable submenu
//! whose checkmarks toggle exclusively on click.

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tray_bridge::{ItemId, MenuEntry, StatusMenu, TrayConfig, TrayMenuError};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

const PROVIDERS: [&str; 3] = ["Anthropic", "OpenAI", "Google"];

/// IDs issued for the current menu generation
struct MenuIds {
    show: ItemId,
    settings: ItemId,
    rebuild: ItemId,
    quit: ItemId,
    /// Provider entries as (menu ID, index into `PROVIDERS`)
    providers: Vec<(ItemId, usize)>,
}

/// Main application handler for the winit event loop
struct App {
    config: TrayConfig,
    click_tx: mpsc::UnboundedSender<ItemId>,
    status_menu: Option<StatusMenu>,
    ids: Option<MenuIds>,
    active_provider: usize,
}

impl App {
    fn new(config: TrayConfig, click_tx: mpsc::UnboundedSender<ItemId>) -> Self {
        Self {
            config,
            click_tx,
            status_menu: None,
            ids: None,
            active_provider: 0,
        }
    }

    /// Create the status item and build the initial menu
    fn create_menu(&mut self) -> Result<()> {
        let icon = if self.config.icon_path.is_empty() {
            builtin_icon_png()?
        } else {
            std::fs::read(&self.config.icon_path)
                .with_context(|| format!("Failed to read icon file: {}", self.config.icon_path))?
        };

        let mut menu = StatusMenu::new(&icon, self.click_tx.clone())?;
        menu.set_tooltip(&self.config.tooltip)?;
        let ids = build_menu(&mut menu, self.active_provider)?;

        self.status_menu = Some(menu);
        self.ids = Some(ids);
        Ok(())
    }

    /// Clear the menu and build it again, invalidating all previous IDs
    fn rebuild_menu(&mut self) {
        let Some(menu) = self.status_menu.as_mut() else {
            return;
        };
        menu.clear();
        match build_menu(menu, self.active_provider) {
            Ok(ids) => {
                info!("Menu rebuilt, generation {}", menu.layout().generation());
                self.ids = Some(ids);
            }
            Err(e) => {
                error!("Failed to rebuild menu: {}", e);
                self.ids = None;
            }
        }
    }

    /// Switch the active provider and update checkmarks exclusively
    fn switch_provider(&mut self, index: usize) {
        let (Some(menu), Some(ids)) = (self.status_menu.as_mut(), self.ids.as_ref()) else {
            return;
        };
        self.active_provider = index;
        for &(id, provider_index) in &ids.providers {
            if let Err(e) = menu.set_checked(id, provider_index == index) {
                error!("Failed to update checkmark for {}: {}", id, e);
            }
        }
        info!("Switched provider to {}", PROVIDERS[index]);
    }
}

impl ApplicationHandler<ItemId> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if self.status_menu.is_some() {
            return;
        }
        match self.create_menu() {
            Ok(()) => info!("Tray menu ready"),
            Err(e) => error!("Failed to create tray menu: {}", e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
        // No windows; the demo is tray-only.
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, clicked: ItemId) {
        let Some(ids) = self.ids.as_ref() else {
            return;
        };
        let (show, settings, rebuild, quit) = (ids.show, ids.settings, ids.rebuild, ids.quit);
        let provider = ids
            .providers
            .iter()
            .find(|(id, _)| *id == clicked)
            .map(|&(_, index)| index);

        if clicked == quit {
            info!("Quit requested from tray");
            event_loop.exit();
        } else if clicked == show {
            info!("Open Dashboard clicked");
        } else if clicked == settings {
            info!("Settings clicked");
        } else if clicked == rebuild {
            self.rebuild_menu();
        } else if let Some(index) = provider {
            self.switch_provider(index);
        }
    }
}

/// Build the demo menu and return the IDs of its clickable entries
fn build_menu(menu: &mut StatusMenu, active_provider: usize) -> Result<MenuIds, TrayMenuError> {
    let show = menu.add_item(MenuEntry::item("Open Dashboard"))?;
    menu.add_item(MenuEntry::Separator)?;

    let submenu = menu.add_submenu("Provider")?;
    menu.add_submenu_item(
        submenu,
        MenuEntry::Item {
            title: "Built-in".to_string(),
            checked: false,
            disabled: true,
        },
    )?;
    menu.add_submenu_separator(submenu)?;

    let mut providers = Vec::new();
    for (index, name) in PROVIDERS.iter().enumerate() {
        let id = menu.add_submenu_item(
            submenu,
            MenuEntry::Item {
                title: name.to_string(),
                checked: index == active_provider,
                disabled: false,
            },
        )?;
        providers.push((id, index));
    }

    menu.add_item(MenuEntry::Separator)?;
    let settings = menu.add_item(MenuEntry::item("Settings"))?;
    let rebuild = menu.add_item(MenuEntry::item("Rebuild Menu"))?;
    let quit = menu.add_item(MenuEntry::item("Quit"))?;

    Ok(MenuIds {
        show,
        settings,
        rebuild,
        quit,
        providers,
    })
}

/// Generate a 32x32 white-dot PNG for when no icon file is configured
fn builtin_icon_png() -> Result<Vec<u8>> {
    const SIZE: u32 = 32;
    let mut rgba = vec![0u8; (SIZE * SIZE * 4) as usize];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as i32 - 16;
            let dy = y as i32 - 16;
            if dx * dx + dy * dy <= 13 * 13 {
                let offset = ((y * SIZE + x) * 4) as usize;
                rgba[offset..offset + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, SIZE, SIZE);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().context("Failed to write PNG header")?;
        writer
            .write_image_data(&rgba)
            .context("Failed to encode icon PNG")?;
    }
    Ok(out)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tray-bridge demo");

    let config = TrayConfig::load()?;

    // Clicks arrive on the tray thread; forward them into the winit loop as
    // user events so the loop can stay in ControlFlow::Wait.
    let (click_tx, mut click_rx) = mpsc::unbounded_channel::<ItemId>();

    let event_loop = EventLoop::<ItemId>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();
    std::thread::spawn(move || {
        while let Some(id) = click_rx.blocking_recv() {
            if proxy.send_event(id).is_err() {
                break;
            }
        }
    });

    let mut app = App::new(config, click_tx);
    event_loop.run_app(&mut app)?;

    Ok(())
}
