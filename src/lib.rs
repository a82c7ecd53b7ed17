pub mod browser;
pub mod catalog;
pub mod commands;
pub mod domain;
pub mod http;
pub mod render;
pub mod runtime;
pub mod session;
pub mod source;
