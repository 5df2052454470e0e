//! Artist credits

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an artist on a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Composer,
    Soloist,
    Ensemble,
    Conductor,
    Arranger,
    /// Role not supplied or not recognized; counted as a performer
    #[default]
    Unknown,
}

impl Role {
    /// Everything except composers and arrangers performs on the recording
    pub fn is_performer(self) -> bool {
        !matches!(self, Role::Composer | Role::Arranger)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Composer => "composer",
            Role::Soloist => "soloist",
            Role::Ensemble => "ensemble",
            Role::Conductor => "conductor",
            Role::Arranger => "arranger",
            Role::Unknown => "unknown",
        }
    }
}

impl Role {
    /// Lenient parse; anything unrecognized maps to `Unknown`
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "composer" => Role::Composer,
            "soloist" | "performer" | "artist" => Role::Soloist,
            "ensemble" | "orchestra" | "choir" => Role::Ensemble,
            "conductor" => Role::Conductor,
            "arranger" => Role::Arranger,
            _ => Role::Unknown,
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from_name(s))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from_name(&s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A credited artist with its role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl Artist {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn composer(name: impl Into<String>) -> Self {
        Self::new(name, Role::Composer)
    }

    pub fn soloist(name: impl Into<String>) -> Self {
        Self::new(name, Role::Soloist)
    }

    pub fn ensemble(name: impl Into<String>) -> Self {
        Self::new(name, Role::Ensemble)
    }

    pub fn conductor(name: impl Into<String>) -> Self {
        Self::new(name, Role::Conductor)
    }

    pub fn arranger(name: impl Into<String>) -> Self {
        Self::new(name, Role::Arranger)
    }

    pub fn is_performer(&self) -> bool {
        self.role.is_performer()
    }
}
