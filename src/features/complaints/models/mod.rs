mod assignment;
mod complaint;

pub use assignment::{ComplaintAssignment, NewAssignment};
pub use complaint::{Complaint, ComplaintDetails, ComplaintFilter, NewComplaint, StatusChange};
