//! Client for the Markdown SEO analysis service: local validation, the REST
//! client, report rendering and the interactive shell.

pub mod api;
pub mod cli;
pub mod commands;
pub mod completer;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod report;
pub mod router;
pub mod shell;
pub mod theme;
pub mod validation;
