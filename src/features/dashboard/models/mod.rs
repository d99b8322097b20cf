mod stats;

pub use stats::{DashboardScope, DepartmentCount, StatusCount};
