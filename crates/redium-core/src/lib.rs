pub mod config;
pub mod logging;

pub mod agent;
pub mod menu;
pub mod pipeline;
pub mod platform;
pub mod prefs;
pub mod resolver;
pub mod rules;
pub mod service;
pub mod url_model;
