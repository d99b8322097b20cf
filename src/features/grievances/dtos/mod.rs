mod grievance_dto;

pub use grievance_dto::*;
