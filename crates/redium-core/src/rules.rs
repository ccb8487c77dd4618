//! Declarative rewrite-rule compilation.
//!
//! Produces the dynamic-rule update a host platform installs to intercept
//! article navigations at the network layer. There is exactly one rule, with
//! a fixed id; every update removes it and (when auto-redirect is on) adds a
//! fresh one, so a half-applied patch can never linger.

use serde::{Deserialize, Serialize};

use crate::prefs::Preferences;
use crate::service::{ServiceDescriptor, ServiceRegistry, UrlTransform};
use crate::url_model::Classifier;

/// The single dynamic rule id this crate manages.
pub const RULE_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    pub remove_rule_ids: Vec<u32>,
    pub add_rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: u32,
    pub priority: u32,
    pub condition: RuleCondition,
    pub action: RuleAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    pub regex_filter: String,
    pub is_url_filter_case_sensitive: bool,
    pub resource_types: Vec<ResourceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Redirect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub redirect: RedirectAction,
}

/// How the matched URL is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RedirectAction {
    /// Substitution template; `\1` is the matched URL without query and
    /// fragment (capture group 1 of the filter).
    RegexSubstitution(String),
    /// Structured rewrite of URL components.
    Transform(UrlRewrite),
}

/// Component rewrite. Empty `query`/`fragment` clear those components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRewrite {
    pub scheme: String,
    pub host: String,
    pub query: String,
    pub fragment: String,
}

/// Expresses a service's transform as a redirect action.
pub fn redirect_action(service: &ServiceDescriptor) -> RedirectAction {
    let host = &service.target_host;
    match &service.transform {
        UrlTransform::WholeUrlEmbed => RedirectAction::RegexSubstitution(format!("https://{host}/\\1")),
        UrlTransform::HostSwapLocalePrefix { locale } => {
            RedirectAction::RegexSubstitution(format!("https://{host}/{locale}/\\1"))
        }
        UrlTransform::SearchCache => {
            RedirectAction::RegexSubstitution(format!("https://{host}/search?q=cache:\\1"))
        }
        UrlTransform::HostSwapKeepPath => RedirectAction::Transform(UrlRewrite {
            scheme: "https".to_string(),
            host: host.clone(),
            query: String::new(),
            fragment: String::new(),
        }),
    }
}

/// Builds the full replacement update for the current preferences.
pub fn compile_rules(
    classifier: &Classifier,
    registry: &ServiceRegistry,
    prefs: &Preferences,
) -> RuleUpdate {
    let mut add_rules = Vec::new();
    if prefs.auto_redirect {
        let service = registry.selected(prefs);
        add_rules.push(Rule {
            id: RULE_ID,
            priority: 1,
            condition: RuleCondition {
                regex_filter: classifier.url_filter(),
                is_url_filter_case_sensitive: true,
                resource_types: vec![ResourceType::MainFrame],
            },
            action: RuleAction {
                kind: ActionType::Redirect,
                redirect: redirect_action(service),
            },
        });
        tracing::debug!("compiled redirect rule for {}", service.id);
    } else {
        tracing::debug!("auto-redirect disabled, clearing redirect rule");
    }
    RuleUpdate {
        remove_rule_ids: vec![RULE_ID],
        add_rules,
    }
}
