//! Toolbar action context menu model.

use serde::Serialize;

use crate::prefs::Preferences;
use crate::service::ServiceRegistry;

pub const AUTO_REDIRECT_MENU_ID: &str = "auto_redirection_toggle";
pub const TIP_MENU_ID: &str = "tip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Checkbox,
    Radio,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MenuKind,
    pub checked: bool,
}

/// Auto-redirect toggle, one radio item per configured service, then a tip.
pub fn build_menu(registry: &ServiceRegistry, prefs: &Preferences) -> Vec<MenuItem> {
    let selected = registry.selected(prefs).id;
    let mut items = vec![MenuItem {
        id: AUTO_REDIRECT_MENU_ID.to_string(),
        title: "Auto-redirect medium articles on new tab".to_string(),
        kind: MenuKind::Checkbox,
        checked: prefs.auto_redirect,
    }];
    items.extend(registry.iter().map(|s| MenuItem {
        id: s.id.to_string(),
        title: s.id.to_string(),
        kind: MenuKind::Radio,
        checked: s.id == selected,
    }));
    items.push(MenuItem {
        id: TIP_MENU_ID.to_string(),
        title: "Tip: Press Alt + R or the extension icon to redirect manually".to_string(),
        kind: MenuKind::Normal,
        checked: false,
    });
    items
}

pub fn action_title(registry: &ServiceRegistry, prefs: &Preferences) -> String {
    format!("Redirect to {} (Alt + R)", registry.selected(prefs).id)
}
