use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four ticket categories sold at the gate. Lowercase on the wire,
/// matching the category keys the order endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Adult,
    Child,
    Senior,
    Family,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ticket category: {0}")]
pub struct UnknownCategoryError(pub String);

impl TicketCategory {
    pub const ALL: [TicketCategory; 4] = [
        TicketCategory::Adult,
        TicketCategory::Child,
        TicketCategory::Senior,
        TicketCategory::Family,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketCategory::Adult => "adult",
            TicketCategory::Child => "child",
            TicketCategory::Senior => "senior",
            TicketCategory::Family => "family",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adult" => Ok(TicketCategory::Adult),
            "child" => Ok(TicketCategory::Child),
            "senior" => Ok(TicketCategory::Senior),
            "family" => Ok(TicketCategory::Family),
            other => Err(UnknownCategoryError(other.to_string())),
        }
    }
}

/// Holder gender as captured by the visitor form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}
