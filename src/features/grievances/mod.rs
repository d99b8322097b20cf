pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use models::GrievanceStatus;
pub use repositories::{GrievanceRepository, PgGrievanceRepository};
pub use services::GrievanceService;
