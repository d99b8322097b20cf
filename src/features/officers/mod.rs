pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use models::OfficerRank;
pub use repositories::{OfficerRepository, PgOfficerRepository};
pub use services::OfficerService;
