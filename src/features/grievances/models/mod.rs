mod grievance;

pub use grievance::{Grievance, GrievanceFilter, GrievanceStatus, NewGrievance};
