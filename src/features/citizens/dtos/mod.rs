mod citizen_dto;

pub use citizen_dto::*;
