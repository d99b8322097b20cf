use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Officer hierarchy, lowest to highest.
///
/// The ladder only decides where a grievance is escalated; it grants no
/// extra permissions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "officer_rank", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OfficerRank {
    FieldOfficer,
    SeniorOfficer,
    DepartmentHead,
    RegionalHead,
    Commissioner,
}

impl OfficerRank {
    /// The rank directly above this one; `None` for Commissioner
    pub fn next(self) -> Option<OfficerRank> {
        match self {
            OfficerRank::FieldOfficer => Some(OfficerRank::SeniorOfficer),
            OfficerRank::SeniorOfficer => Some(OfficerRank::DepartmentHead),
            OfficerRank::DepartmentHead => Some(OfficerRank::RegionalHead),
            OfficerRank::RegionalHead => Some(OfficerRank::Commissioner),
            OfficerRank::Commissioner => None,
        }
    }

    /// Every rank above this one, nearest first
    pub fn higher_ranks(self) -> impl Iterator<Item = OfficerRank> {
        std::iter::successors(self.next(), |rank| rank.next())
    }
}

impl std::fmt::Display for OfficerRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OfficerRank::FieldOfficer => "Field Officer",
            OfficerRank::SeniorOfficer => "Senior Officer",
            OfficerRank::DepartmentHead => "Department Head",
            OfficerRank::RegionalHead => "Regional Head",
            OfficerRank::Commissioner => "Commissioner",
        };
        f.write_str(label)
    }
}
