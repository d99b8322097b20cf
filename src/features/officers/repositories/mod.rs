mod officer_repository;

pub(crate) use officer_repository::OFFICER_SELECT;
pub use officer_repository::{OfficerRepository, PgOfficerRepository};
