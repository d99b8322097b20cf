pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use models::ComplaintStatus;
pub use repositories::{PgStatusRepository, StatusRepository};
pub use services::StatusService;
