mod grievance_repository;

pub use grievance_repository::{GrievanceRepository, PgGrievanceRepository};
