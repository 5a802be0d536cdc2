//! Patient gender enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use woundcare_core::AppError;

/// Gender as stored in the `patients.gender` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Masculino,
    /// Female.
    Feminino,
    /// Other or undisclosed.
    Outro,
}

impl Gender {
    /// Column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masculino => "masculino",
            Self::Feminino => "feminino",
            Self::Outro => "outro",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "masculino" | "m" => Ok(Self::Masculino),
            "feminino" | "f" => Ok(Self::Feminino),
            "outro" | "o" => Ok(Self::Outro),
            other => Err(AppError::validation(format!(
                "Invalid gender '{other}': expected masculino, feminino or outro"
            ))),
        }
    }
}
