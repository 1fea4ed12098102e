pub mod assembler;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod manual;
pub mod models;
pub mod numeric;
pub mod resolver;
pub(crate) mod retry;
pub mod sources;
pub mod store;
