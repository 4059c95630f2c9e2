//! Provider identity value objects

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity of one of the two text-generation providers (Value Object)
///
/// The primary provider drafts and synthesizes; the secondary provider
/// critiques and serves as the direct fallback when drafting fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Primary,
    Secondary,
}

impl ProviderId {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Primary => "primary",
            ProviderId::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(ProviderId::Primary),
            "secondary" => Ok(ProviderId::Secondary),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

/// Set of providers that contributed to an answer (Value Object)
///
/// Serialized as a sorted list, e.g. `["primary", "secondary"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contributors(BTreeSet<ProviderId>);

impl Contributors {
    /// No provider contributed (total failure)
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Exactly one provider contributed
    pub fn only(provider: ProviderId) -> Self {
        Self(BTreeSet::from([provider]))
    }

    /// Both providers contributed
    pub fn both() -> Self {
        Self(BTreeSet::from([ProviderId::Primary, ProviderId::Secondary]))
    }

    pub fn contains(&self, provider: ProviderId) -> bool {
        self.0.contains(&provider)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.0.iter().copied()
    }

    /// Comma-joined provider ids, e.g. `primary,secondary`
    pub fn joined(&self) -> String {
        self.iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<ProviderId> for Contributors {
    fn from_iter<I: IntoIterator<Item = ProviderId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in [ProviderId::Primary, ProviderId::Secondary] {
            let parsed: ProviderId = provider.to_string().parse().unwrap();
            assert_eq!(provider, parsed);
        }
    }

    #[test]
    fn test_unknown_provider() {
        let err = "gemini".parse::<ProviderId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownProvider("gemini".to_string()));
    }

    #[test]
    fn test_contributors_sets() {
        assert!(Contributors::none().is_empty());
        assert_eq!(Contributors::only(ProviderId::Secondary).len(), 1);
        assert!(Contributors::both().contains(ProviderId::Primary));
        assert!(Contributors::both().contains(ProviderId::Secondary));
        assert_eq!(Contributors::both().joined(), "primary,secondary");
    }

    #[test]
    fn test_contributors_deduplicate() {
        let c: Contributors = [ProviderId::Primary, ProviderId::Primary].into_iter().collect();
        assert_eq!(c, Contributors::only(ProviderId::Primary));
    }

    #[test]
    fn test_contributors_serialize_as_list() {
        let json = serde_json::to_string(&Contributors::both()).unwrap();
        assert_eq!(json, r#"["primary","secondary"]"#);
        let none = serde_json::to_string(&Contributors::none()).unwrap();
        assert_eq!(none, "[]");
    }
}
