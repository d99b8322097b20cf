mod status_repository;

pub use status_repository::{PgStatusRepository, StatusRepository};
