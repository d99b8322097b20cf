mod escalation;
mod grievance_service;

pub use escalation::find_escalation_target;
pub use grievance_service::GrievanceService;
