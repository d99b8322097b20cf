mod complaint_service;

pub use complaint_service::{format_reference_number, ComplaintService};
