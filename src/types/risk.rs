//! Risk catalog entries.

use serde::{Deserialize, Serialize};

/// One selectable risk factor from the catalog endpoint.
///
/// The catalog is produced from a CSV export whose column is `Risk`; both
/// spellings are accepted and other columns are ignored.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RiskDescriptor {
    #[serde(alias = "Risk")]
    pub risk: String,
}

impl RiskDescriptor {
    pub fn new(risk: impl Into<String>) -> Self {
        Self { risk: risk.into() }
    }

    pub fn name(&self) -> &str {
        &self.risk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_spellings() {
        let list: Vec<RiskDescriptor> = serde_json::from_str(
            r#"[{"risk": "Market"}, {"Risk": "Credit", "likelihood": 3, "impact": 15}]"#,
        )
        .unwrap();
        assert_eq!(list[0].name(), "Market");
        assert_eq!(list[1].name(), "Credit");
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&RiskDescriptor::new("Market")).unwrap();
        assert_eq!(json, r#"{"risk":"Market"}"#);
    }
}
