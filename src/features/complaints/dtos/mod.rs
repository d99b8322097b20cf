mod assignment_dto;
mod complaint_dto;

pub use assignment_dto::*;
pub use complaint_dto::*;
