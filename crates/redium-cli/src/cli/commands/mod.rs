//! CLI command handlers, one file per command.

mod auto_redirect;
mod classify;
mod completions;
mod open;
mod resolve;
mod rules;
mod select;
mod services;

pub use auto_redirect::run_auto_redirect;
pub use classify::run_classify;
pub use completions::run_completions;
pub use open::run_open;
pub use resolve::run_resolve;
pub use rules::run_rules;
pub use select::run_select;
pub use services::run_services;
