// Timetable Layout Library
// Places conference lectures on per-room time columns

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{LayoutError, LayoutResult};
