mod citizen_repository;

pub(crate) use citizen_repository::CITIZEN_SELECT;
pub use citizen_repository::{CitizenRepository, PgCitizenRepository};
