//! Background workers feeding the order board

pub mod core;
pub mod push_listener;
pub mod refresher;
pub mod status_updater;
