// Module exports for models

pub mod conference;
pub mod layout;
pub mod lecture;
pub mod settings;
