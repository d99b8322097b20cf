pub mod citizen_handler;

pub use citizen_handler::*;
