use serde::{Deserialize, Serialize};

/// Stable identifier of an advertising location.
///
/// Ids are shared between the French and English datasets, so the same venue
/// keeps the same id whatever the page locale. Zero is never a valid id.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LocationId(pub u32);

impl LocationId {
    pub fn new(n: u32) -> Option<Self> {
        (n != 0).then_some(LocationId(n))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LocationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid location id {s:?}: {e}"))?;
        LocationId::new(n).ok_or_else(|| "location id must be positive".to_string())
    }
}
