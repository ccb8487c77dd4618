//! Agent tests against the in-memory store and recording platform.

use super::*;
use crate::config::InterceptionMode;
use crate::menu::MenuKind;
use crate::platform::{Action, RecordingPlatform};
use crate::prefs::MemoryPreferenceStore;
use crate::rules::RULE_ID;
use crate::service::ServiceRegistry;
use crate::url_model::Classifier;

const CACHE_PATTERN: &str = "https://webcache.googleusercontent.com/*";

fn agent(
    mode: InterceptionMode,
    prefs: Preferences,
) -> RedirectAgent<MemoryPreferenceStore, RecordingPlatform> {
    agent_with_platform(mode, prefs, RecordingPlatform::new(100))
}

fn agent_with_platform(
    mode: InterceptionMode,
    prefs: Preferences,
    platform: RecordingPlatform,
) -> RedirectAgent<MemoryPreferenceStore, RecordingPlatform> {
    let redirector = Redirector::new(Classifier::default(), ServiceRegistry::builtin(), mode);
    RedirectAgent::new(redirector, MemoryPreferenceStore::new(prefs), platform)
}

fn prefs(service: &str, auto_redirect: bool) -> Preferences {
    Preferences {
        selected_service: Some(service.to_string()),
        auto_redirect,
    }
}

fn tab(id: TabId, url: &str) -> TabInfo {
    TabInfo {
        id,
        index: 2,
        url: Some(url.to_string()),
    }
}

fn loading(id: TabId, url: &str) -> Event {
    Event::TabUpdated {
        tab: tab(id, url),
        status: Some(TabStatus::Loading),
    }
}

#[tokio::test]
async fn observe_mode_redirects_loading_article() {
    let a = agent(InterceptionMode::Observe, prefs("Scribe", true));
    a.handle(loading(7, "https://medium.com/@foo/bar-baz-0123abcd?x=1")).await;
    assert_eq!(
        a.platform().actions(),
        vec![Action::UpdateTab {
            tab: 7,
            url: "https://scribe.rip/@foo/bar-baz-0123abcd".to_string()
        }]
    );
}

#[tokio::test]
async fn observe_mode_respects_disabled_flag() {
    let a = agent(InterceptionMode::Observe, prefs("Scribe", false));
    a.handle(loading(7, "https://medium.com/@foo/bar-0123abcd")).await;
    assert!(a.platform().actions().is_empty());
}

#[tokio::test]
async fn observe_mode_ignores_complete_and_non_articles() {
    let a = agent(InterceptionMode::Observe, prefs("Scribe", true));
    a.handle(Event::TabUpdated {
        tab: tab(7, "https://medium.com/@foo/bar-0123abcd"),
        status: Some(TabStatus::Complete),
    })
    .await;
    a.handle(loading(7, "https://medium.com/m/signin-0123abcd")).await;
    a.handle(loading(7, "https://medium.com/@foo")).await;
    a.handle(Event::TabUpdated {
        tab: TabInfo {
            id: 7,
            index: 0,
            url: None,
        },
        status: Some(TabStatus::Loading),
    })
    .await;
    assert!(a.platform().actions().is_empty());
}

#[tokio::test]
async fn declarative_mode_ignores_tab_updates() {
    let a = agent(InterceptionMode::Declarative, prefs("Scribe", true));
    a.handle(loading(7, "https://medium.com/@foo/bar-0123abcd")).await;
    assert!(a.platform().actions().is_empty());
}

#[tokio::test]
async fn flag_change_applies_to_next_navigation() {
    let a = agent(InterceptionMode::Observe, prefs("12ft", true));
    a.handle(Event::MenuClicked {
        item_id: AUTO_REDIRECT_MENU_ID.to_string(),
        checked: Some(false),
    })
    .await;
    a.handle(loading(1, "https://medium.com/a-0123abcd")).await;
    assert!(a.platform().actions().is_empty());

    a.handle(Event::MenuClicked {
        item_id: AUTO_REDIRECT_MENU_ID.to_string(),
        checked: Some(true),
    })
    .await;
    a.handle(loading(1, "https://medium.com/a-0123abcd")).await;
    assert_eq!(
        a.platform().actions(),
        vec![Action::UpdateTab {
            tab: 1,
            url: "https://12ft.io/https://medium.com/a-0123abcd".to_string()
        }]
    );
}

#[tokio::test]
async fn google_cache_blocks_scripts_and_restores_on_close() {
    let a = agent(InterceptionMode::Observe, prefs("GoogleCache", true));
    a.handle(loading(5, "https://medium.com/a-0123abcd")).await;
    assert_eq!(
        a.platform().take_actions(),
        vec![
            Action::SetScriptSetting {
                pattern: CACHE_PATTERN.to_string(),
                setting: ScriptSetting::Block
            },
            Action::MarkTab {
                tab: 5,
                pattern: CACHE_PATTERN.to_string()
            },
            Action::UpdateTab {
                tab: 5,
                url: "https://webcache.googleusercontent.com/search?q=cache:https://medium.com/a-0123abcd"
                    .to_string()
            },
        ]
    );

    a.handle(Event::TabRemoved { tab_id: 5 }).await;
    assert_eq!(
        a.platform().take_actions(),
        vec![Action::SetScriptSetting {
            pattern: CACHE_PATTERN.to_string(),
            setting: ScriptSetting::Allow
        }]
    );

    a.handle(Event::TabRemoved { tab_id: 5 }).await;
    assert!(a.platform().actions().is_empty());
}

#[tokio::test]
async fn google_cache_leaves_existing_block_alone() {
    let platform =
        RecordingPlatform::new(100).with_script_setting(CACHE_PATTERN, ScriptSetting::Block);
    let a = agent_with_platform(InterceptionMode::Observe, prefs("GoogleCache", true), platform);
    a.handle(loading(5, "https://medium.com/a-0123abcd")).await;
    let actions = a.platform().take_actions();
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], Action::UpdateTab { tab: 5, .. }));

    a.handle(Event::TabRemoved { tab_id: 5 }).await;
    assert!(a.platform().actions().is_empty());
}

#[tokio::test]
async fn action_click_opens_next_tab_even_when_disabled() {
    let a = agent(InterceptionMode::Declarative, prefs("LibMedium", false));
    a.handle(Event::ActionClicked {
        tab: tab(3, "https://medium.com/@foo/bar-0123abcd?source=rss"),
    })
    .await;
    assert_eq!(
        a.platform().actions(),
        vec![Action::CreateTab {
            tab: 100,
            index: 3,
            url: "https://libmedium.batsense.net/@foo/bar-0123abcd".to_string()
        }]
    );
}

#[tokio::test]
async fn action_click_marks_new_cache_tab() {
    let a = agent(InterceptionMode::Declarative, prefs("GoogleCache", true));
    a.handle(Event::ActionClicked {
        tab: tab(3, "https://example.com/story"),
    })
    .await;
    let actions = a.platform().take_actions();
    assert_eq!(actions.len(), 3);
    assert!(matches!(&actions[1], Action::CreateTab { tab: 100, url, .. }
        if url == "https://webcache.googleusercontent.com/search?q=cache:https://example.com/story"));
    assert_eq!(
        actions[2],
        Action::MarkTab {
            tab: 100,
            pattern: CACHE_PATTERN.to_string()
        }
    );
}

#[tokio::test]
async fn action_click_ignores_non_http_tabs() {
    let a = agent(InterceptionMode::Declarative, prefs("Scribe", true));
    a.handle(Event::ActionClicked {
        tab: tab(3, "chrome://newtab/"),
    })
    .await;
    a.handle(Event::ActionClicked {
        tab: TabInfo {
            id: 3,
            index: 0,
            url: None,
        },
    })
    .await;
    assert!(a.platform().actions().is_empty());
}

#[tokio::test]
async fn action_click_on_proxy_page_reopens_same_url() {
    let a = agent(InterceptionMode::Declarative, prefs("Scribe", true));
    a.handle(Event::ActionClicked {
        tab: tab(3, "https://scribe.rip/@foo/bar-0123abcd"),
    })
    .await;
    assert!(matches!(&a.platform().actions()[0], Action::CreateTab { url, .. }
        if url == "https://scribe.rip/@foo/bar-0123abcd"));
}

#[tokio::test]
async fn menu_service_click_saves_and_reinstalls_rule() {
    let a = agent(InterceptionMode::Declarative, Preferences::default());
    a.handle(Event::MenuClicked {
        item_id: "12ft".to_string(),
        checked: Some(true),
    })
    .await;

    let stored = a.store().load().await.unwrap();
    assert_eq!(stored.selected_service.as_deref(), Some("12ft"));

    let actions = a.platform().actions();
    assert_eq!(
        actions[0],
        Action::SetActionTitle {
            title: "Redirect to 12ft (Alt + R)".to_string()
        }
    );
    let Action::ApplyRules { update } = &actions[1] else {
        panic!("expected rule update, got {:?}", actions[1]);
    };
    assert_eq!(update.remove_rule_ids, vec![RULE_ID]);
    assert_eq!(update.add_rules.len(), 1);
}

#[tokio::test]
async fn disabling_clears_rule() {
    let a = agent(InterceptionMode::Declarative, prefs("Scribe", true));
    a.handle(Event::MenuClicked {
        item_id: AUTO_REDIRECT_MENU_ID.to_string(),
        checked: Some(false),
    })
    .await;
    assert!(!a.store().load().await.unwrap().auto_redirect);
    let Action::ApplyRules { update } = &a.platform().actions()[0] else {
        panic!("expected rule update");
    };
    assert!(update.add_rules.is_empty());
}

#[tokio::test]
async fn tip_and_unknown_menu_items_are_ignored() {
    let a = agent(InterceptionMode::Declarative, prefs("Scribe", true));
    a.handle(Event::MenuClicked {
        item_id: "tip".to_string(),
        checked: None,
    })
    .await;
    assert!(a.platform().actions().is_empty());
    assert_eq!(a.store().load().await.unwrap(), prefs("Scribe", true));
}

#[tokio::test]
async fn install_builds_menu_title_and_rule() {
    let a = agent(InterceptionMode::Declarative, prefs("Bogus", true));
    a.handle(Event::Installed).await;
    let actions = a.platform().actions();
    assert_eq!(actions.len(), 3);
    let Action::SetMenu { items } = &actions[0] else {
        panic!("expected menu first");
    };
    let checked: Vec<_> = items
        .iter()
        .filter(|i| i.kind == MenuKind::Radio && i.checked)
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(checked, vec!["Scribe"]);
    assert_eq!(
        actions[1],
        Action::SetActionTitle {
            title: "Redirect to Scribe (Alt + R)".to_string()
        }
    );
    assert!(matches!(actions[2], Action::ApplyRules { .. }));
}

#[tokio::test]
async fn observe_mode_install_skips_rules() {
    let a = agent(InterceptionMode::Observe, Preferences::default());
    a.handle(Event::Installed).await;
    assert!(!a
        .platform()
        .actions()
        .iter()
        .any(|x| matches!(x, Action::ApplyRules { .. })));
}

#[tokio::test]
async fn startup_only_sets_title() {
    let a = agent(InterceptionMode::Declarative, prefs("LibMedium", true));
    a.handle(Event::Startup).await;
    assert_eq!(
        a.platform().actions(),
        vec![Action::SetActionTitle {
            title: "Redirect to LibMedium (Alt + R)".to_string()
        }]
    );
}
