mod officer;
mod rank;

pub use officer::{NewOfficer, Officer, OfficerFilter, OfficerPlacementInput, OfficerProfileInput};
pub use rank::OfficerRank;
