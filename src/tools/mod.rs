// src/tools/mod.rs
pub mod content;
pub mod dialect;
pub mod domain;
pub mod dork;
pub mod sanitize;
pub mod search_url;
pub mod template;
pub mod validate;
