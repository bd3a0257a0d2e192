#![forbid(unsafe_code)]

pub mod artifact_store;
pub mod book_id;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod existence;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod paginate;
pub mod parse;
pub mod sanitize;
