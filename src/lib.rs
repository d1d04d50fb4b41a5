pub mod error;

pub mod client;
pub mod config;
pub mod console;
pub mod federation;
pub mod policy;
pub mod role;
pub mod session;

pub mod cmd;

#[cfg(test)]
pub(crate) mod dev;
