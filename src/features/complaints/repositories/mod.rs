mod assignment_repository;
mod complaint_repository;

pub use assignment_repository::{AssignmentRepository, PgAssignmentRepository};
pub use complaint_repository::{ComplaintRepository, PgComplaintRepository};
