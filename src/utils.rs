pub mod album_store;
pub mod album_types;
pub mod album_utils;
pub mod config;
pub mod errors;
pub mod pretty_json;
