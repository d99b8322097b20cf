mod complaint_status;

pub use complaint_status::{ComplaintStatus, StatusDefinition};
