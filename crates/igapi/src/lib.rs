//! igapi: HTTP front end and CLI over `igcore`.

pub mod cli;
pub mod logging;
pub mod server;
pub mod settings;
