mod citizen;

pub use citizen::{Citizen, CitizenProfileInput, NewCitizen};
