//! `redium open <url>` – run a navigation through the redirect agent and
//! print the host actions it would trigger.

use anyhow::Result;
use redium_core::agent::RedirectAgent;
use redium_core::config::InterceptionMode;
use redium_core::pipeline::Redirector;
use redium_core::platform::{Event, RecordingPlatform, TabInfo, TabStatus};
use redium_core::prefs::JsonPreferenceStore;

pub async fn run_open(
    redirector: Redirector,
    store: JsonPreferenceStore,
    url: &str,
    tab: i64,
    manual: bool,
) -> Result<()> {
    // Declarative hosts never see the navigation; simulate what the rule does
    // by letting the agent observe it instead.
    let redirector = redirector.with_mode(InterceptionMode::Observe);
    let agent = RedirectAgent::new(redirector, store, RecordingPlatform::new(tab + 1));
    agent.handle(navigation(url, tab, manual)).await;

    let actions = agent.platform().take_actions();
    if actions.is_empty() {
        println!("no redirect");
    }
    for action in actions {
        println!("{}", serde_json::to_string(&action)?);
    }
    Ok(())
}

fn navigation(url: &str, tab: i64, manual: bool) -> Event {
    let tab = TabInfo {
        id: tab,
        index: 0,
        url: Some(url.to_string()),
    };
    if manual {
        Event::ActionClicked { tab }
    } else {
        Event::TabUpdated {
            tab,
            status: Some(TabStatus::Loading),
        }
    }
}
