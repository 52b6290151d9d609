//! Exchange Policy Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Whether a product can be exchanged after purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Exchange {
    Yes,
    #[default]
    No,
}

impl Exchange {
    /// Get string code for serialization/database
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

impl FromStr for Exchange {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| CatalogError::validation("Exchange must be Yes or No"))
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!("Yes".parse::<Exchange>().unwrap(), Exchange::Yes);
        assert_eq!(" No ".parse::<Exchange>().unwrap(), Exchange::No);
        assert!("yes".parse::<Exchange>().is_err());
        assert!("".parse::<Exchange>().is_err());
        assert_eq!(Exchange::default(), Exchange::No);
        assert_eq!(Exchange::Yes.to_string(), "Yes");
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Exchange::Yes).unwrap(), "\"Yes\"");
        let parsed: Exchange = serde_json::from_str("\"No\"").unwrap();
        assert_eq!(parsed, Exchange::No);
    }
}
