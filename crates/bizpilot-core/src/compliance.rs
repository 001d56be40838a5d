//! Compliance checklist lookup
//!
//! Each industry maps to an ordered set of regulation names. A check takes the
//! policies a business has in place as comma-separated text and reports which
//! regulations are not covered. Matching ignores surrounding whitespace and
//! letter case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const FULLY_COMPLIANT: &str = "Fully Compliant";

pub const DEFAULT_INDUSTRY: &str = "technology";

/// Industry key → regulation set
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceCatalog {
    industries: BTreeMap<String, Vec<String>>,
    default_industry: String,
}

impl Default for ComplianceCatalog {
    fn default() -> Self {
        let mut industries = BTreeMap::new();
        industries.insert(
            "technology".to_string(),
            strings(&["Data privacy", "Software licensing", "Cybersecurity"]),
        );
        industries.insert(
            "healthcare".to_string(),
            strings(&["Patient privacy", "Medical records retention", "Data privacy"]),
        );
        industries.insert(
            "finance".to_string(),
            strings(&["Anti-money laundering", "Know your customer", "Data privacy"]),
        );
        industries.insert(
            "retail".to_string(),
            strings(&["Consumer protection", "Payment card security", "Data privacy"]),
        );

        Self {
            industries,
            default_industry: DEFAULT_INDUSTRY.to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Normalize an industry key for lookup
fn industry_key(industry: &str) -> String {
    industry.trim().to_lowercase()
}

impl ComplianceCatalog {
    /// Build a catalog, validating that the default industry exists
    pub fn new(
        industries: BTreeMap<String, Vec<String>>,
        default_industry: impl Into<String>,
    ) -> Result<Self> {
        let industries: BTreeMap<String, Vec<String>> = industries
            .into_iter()
            .map(|(k, v)| (industry_key(&k), v))
            .collect();
        let default_industry = industry_key(&default_industry.into());

        if !industries.contains_key(&default_industry) {
            return Err(Error::InvalidData(format!(
                "default industry '{}' has no regulation set",
                default_industry
            )));
        }

        Ok(Self {
            industries,
            default_industry,
        })
    }

    pub fn default_industry(&self) -> &str {
        &self.default_industry
    }

    /// Known industry keys, sorted
    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.industries.keys().map(String::as_str)
    }

    pub fn regulations(&self, industry: &str) -> Option<&[String]> {
        self.industries
            .get(&industry_key(industry))
            .map(Vec::as_slice)
    }

    /// Check policies against an industry's regulations
    pub fn check(&self, industry: &str, policies: &str) -> Result<ComplianceReport> {
        let key = industry_key(industry);
        let regulations = self.industries.get(&key).ok_or_else(|| {
            Error::InvalidData(format!(
                "Unknown industry: {}. Known industries: {}",
                industry.trim(),
                self.industries().collect::<Vec<_>>().join(", ")
            ))
        })?;

        let have: Vec<String> = parse_policies(policies)
            .iter()
            .map(|p| p.to_lowercase())
            .collect();

        let missing: Vec<String> = regulations
            .iter()
            .filter(|r| !have.contains(&r.to_lowercase()))
            .cloned()
            .collect();

        Ok(ComplianceReport::new(key, missing))
    }

    /// Check against the default industry
    pub fn check_default(&self, policies: &str) -> Result<ComplianceReport> {
        self.check(&self.default_industry, policies)
    }
}

/// Split comma-separated policy text into trimmed, non-empty entries
pub fn parse_policies(policies: &str) -> Vec<String> {
    policies
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub industry: String,
    pub missing: Vec<String>,
    pub fully_compliant: bool,
    /// "Fully Compliant" or the missing regulations as text
    pub summary: String,
}

impl ComplianceReport {
    fn new(industry: String, missing: Vec<String>) -> Self {
        let fully_compliant = missing.is_empty();
        let summary = if fully_compliant {
            FULLY_COMPLIANT.to_string()
        } else {
            format!("Missing: {}", missing.join(", "))
        };
        Self {
            industry,
            missing,
            fully_compliant,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technology_missing_software_licensing() {
        let catalog = ComplianceCatalog::default();
        let report = catalog
            .check("technology", "Data privacy, Cybersecurity")
            .unwrap();
        assert_eq!(report.missing, vec!["Software licensing".to_string()]);
        assert!(!report.fully_compliant);
        assert_eq!(report.summary, "Missing: Software licensing");
    }

    #[test]
    fn test_fully_compliant() {
        let catalog = ComplianceCatalog::default();
        let report = catalog
            .check_default("cybersecurity,software LICENSING , Data privacy, Extra policy")
            .unwrap();
        assert!(report.missing.is_empty());
        assert_eq!(report.summary, FULLY_COMPLIANT);
    }

    #[test]
    fn test_empty_policies_misses_everything_in_order() {
        let catalog = ComplianceCatalog::default();
        let report = catalog.check("Technology", "  ").unwrap();
        assert_eq!(
            report.missing,
            vec!["Data privacy", "Software licensing", "Cybersecurity"]
        );
        assert_eq!(report.industry, "technology");
    }

    #[test]
    fn test_unknown_industry() {
        let catalog = ComplianceCatalog::default();
        let err = catalog.check("aerospace", "Data privacy").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("technology"));
    }

    #[test]
    fn test_custom_catalog() {
        let mut industries = BTreeMap::new();
        industries.insert("Food".to_string(), strings(&["Food safety"]));
        let catalog = ComplianceCatalog::new(industries, "food").unwrap();
        assert_eq!(catalog.default_industry(), "food");
        assert_eq!(catalog.regulations("FOOD").unwrap(), &["Food safety".to_string()]);
        assert!(catalog.check_default("food safety").unwrap().fully_compliant);
    }

    #[test]
    fn test_catalog_default_industry_must_exist() {
        let result = ComplianceCatalog::new(BTreeMap::new(), "technology");
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!(parse_policies("a, b,,c ,"), vec!["a", "b", "c"]);
        assert!(parse_policies("").is_empty());
    }
}
