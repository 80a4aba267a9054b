use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A collection of identifiers for a substance.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Identifier {
    /// CAS number
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas: Option<String>,
    /// Commonly used english name
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// IUPAC name
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    /// Chemical formula
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Alternative names (e.g. "steam", "R718")
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Identifier {
    pub fn new(
        cas: Option<&str>,
        name: Option<&str>,
        iupac_name: Option<&str>,
        formula: Option<&str>,
        aliases: &[&str],
    ) -> Identifier {
        Identifier {
            cas: cas.map(Into::into),
            name: name.map(Into::into),
            iupac_name: iupac_name.map(Into::into),
            formula: formula.map(Into::into),
            aliases: aliases.iter().map(|&a| a.into()).collect(),
        }
    }

    /// Case insensitive comparison of `query` with all identifiers.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        [&self.cas, &self.name, &self.iupac_name, &self.formula]
            .into_iter()
            .flatten()
            .chain(self.aliases.iter())
            .any(|id| id.eq_ignore_ascii_case(query))
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids = Vec::new();
        if let Some(n) = &self.cas {
            ids.push(format!("cas={}", n));
        }
        if let Some(n) = &self.name {
            ids.push(format!("name={}", n));
        }
        if let Some(n) = &self.iupac_name {
            ids.push(format!("iupac_name={}", n));
        }
        if let Some(n) = &self.formula {
            ids.push(format!("formula={}", n));
        }
        write!(f, "Identifier({})", ids.join(", "))
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.cas == other.cas
    }
}
impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cas.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fmt() {
        let id = Identifier::new(None, Some("water"), None, Some("H2O"), &[]);
        assert_eq!(id.to_string(), "Identifier(name=water, formula=H2O)");
    }

    #[test]
    fn test_matches() {
        let id = Identifier::new(Some("7732-18-5"), Some("water"), None, Some("H2O"), &["steam"]);
        assert!(id.matches("Water"));
        assert!(id.matches("7732-18-5"));
        assert!(id.matches("STEAM"));
        assert!(!id.matches("ice"));
    }
}
