pub mod api;
pub mod config;
pub mod coordinator;
pub mod entities;
pub mod error;
pub mod external;
pub mod location;
pub mod navigation;
pub mod permission;
pub mod planner;
pub mod server;

pub mod simulation;

#[cfg(test)]
mod testing;
