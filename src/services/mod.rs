// Service module exports

pub mod collision;
pub mod layout;
pub mod schedule;
pub mod settings;
