pub mod grievance_handler;

pub use grievance_handler::*;
