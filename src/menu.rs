/// Page context menu: pin or close the tab under the cursor
use log::{error, warn};

use crate::platform::{ContextMenus, MenuItem, TabHost};

pub const PIN_TAB_MENU_ID: &str = "pinTab";
pub const CLOSE_TAB_MENU_ID: &str = "closeTab";

const MENU_CONTEXTS: [&str; 4] = ["page", "frame", "link", "image"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    PinTab,
    CloseTab,
}

impl MenuCommand {
    pub fn from_menu_id(menu_item_id: &str) -> Option<Self> {
        match menu_item_id {
            PIN_TAB_MENU_ID => Some(MenuCommand::PinTab),
            CLOSE_TAB_MENU_ID => Some(MenuCommand::CloseTab),
            _ => None,
        }
    }
}

pub fn menu_items() -> Vec<MenuItem> {
    let contexts: Vec<String> = MENU_CONTEXTS.iter().map(|c| c.to_string()).collect();
    vec![
        MenuItem {
            id: PIN_TAB_MENU_ID.to_string(),
            title: "📌 Pin tab".to_string(),
            contexts: contexts.clone(),
        },
        MenuItem {
            id: CLOSE_TAB_MENU_ID.to_string(),
            title: "✕ Close tab".to_string(),
            contexts,
        },
    ]
}

/// Register the menu items; runs on extension install
pub async fn register_menus<M: ContextMenus>(menus: &M) {
    for item in menu_items() {
        if let Err(e) = menus.create(&item).await {
            warn!("Failed to register menu item {}: {}", item.id, e);
        }
    }
}

/// Run the command for a menu click; failures are logged
pub async fn handle_menu_click<T: TabHost>(
    tabs: &T,
    menu_item_id: &str,
    tab_id: Option<i32>,
) -> Option<MenuCommand> {
    let command = MenuCommand::from_menu_id(menu_item_id)?;
    let tab_id = tab_id?;

    let result = match command {
        MenuCommand::PinTab => tabs.pin_tab(tab_id).await,
        MenuCommand::CloseTab => tabs.remove_tab(tab_id).await,
    };

    match result {
        Ok(()) => Some(command),
        Err(e) => {
            error!("Failed to run {:?} on tab {}: {}", command, tab_id, e);
            None
        }
    }
}
