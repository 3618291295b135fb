use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EntryError;

/// Sex axis of the grade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M", alias = "m")]
    Male,
    #[serde(rename = "F", alias = "f")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// One-letter code used in tables, filters and CSV.
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Catalogue key of the display name.
    pub fn label_key(&self) -> &'static str {
        match self {
            Sex::Male => "sex-male",
            Sex::Female => "sex-female",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "masculin" | "h" | "homme" => Ok(Sex::Male),
            "f" | "female" | "féminin" | "feminin" | "femme" => Ok(Sex::Female),
            _ => Err(EntryError::InvalidSex(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" f ".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("Féminin".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("X".parse::<Sex>(), Err(EntryError::InvalidSex("X".into())));
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"F\"");
        assert_eq!(serde_json::from_str::<Sex>("\"m\"").unwrap(), Sex::Male);
    }
}
