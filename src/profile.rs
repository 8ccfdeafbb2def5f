//! Structured tax profile extracted from the conversation
//!
//! The extraction stage returns free text; it is parsed and validated
//! here before the computation stage sees it, so a malformed extraction
//! surfaces as a distinct error instead of a nonsensical final answer.

use crate::error::InterviewError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    OldRegime,
    NewRegime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrimaryIncome {
    pub source: String,
    pub annual_income: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investments {
    pub section_80c: f64,
    pub nps_voluntary_contribution: f64,
    pub nps_employer_contribution: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapitalGains {
    pub long_term_capital_gains: f64,
    pub short_term_capital_gains: f64,
}

/// The record of income, investments and regime choice produced by the
/// extraction stage. All amounts are annual INR values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxProfile {
    pub primary_income: PrimaryIncome,
    pub additional_income: f64,
    pub house_rent: f64,
    pub investments: Investments,
    pub capital_gains: CapitalGains,
    pub tax_regime: TaxRegime,
}

impl TaxProfile {
    /// Parse the extraction stage's raw output into a validated profile.
    ///
    /// The model is asked for bare JSON but sometimes wraps it in a
    /// markdown fence; strip that before parsing.
    pub fn parse(raw: &str) -> crate::Result<Self> {
        let cleaned = raw
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        let profile: TaxProfile = serde_json::from_str(cleaned).map_err(|e| {
            InterviewError::MalformedProfile(format!(
                "extraction output is not a valid tax profile: {} | raw={}",
                e, raw
            ))
        })?;

        profile.validate()?;
        Ok(profile)
    }

    /// All monetary fields must be finite and non-negative
    fn validate(&self) -> crate::Result<()> {
        let amounts = [
            ("primary_income.annual_income", self.primary_income.annual_income),
            ("additional_income", self.additional_income),
            ("house_rent", self.house_rent),
            ("investments.section_80c", self.investments.section_80c),
            (
                "investments.nps_voluntary_contribution",
                self.investments.nps_voluntary_contribution,
            ),
            (
                "investments.nps_employer_contribution",
                self.investments.nps_employer_contribution,
            ),
            (
                "capital_gains.long_term_capital_gains",
                self.capital_gains.long_term_capital_gains,
            ),
            (
                "capital_gains.short_term_capital_gains",
                self.capital_gains.short_term_capital_gains,
            ),
        ];

        for (field, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(InterviewError::MalformedProfile(format!(
                    "{} must be a non-negative amount, got {}",
                    field, amount
                )));
            }
        }

        Ok(())
    }

    /// Serialized form embedded into the computation prompt
    pub fn to_prompt_text(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "primary_income": {"source": "Salary", "annual_income": 1200000},
            "additional_income": 50000,
            "house_rent": 240000,
            "investments": {
                "section_80c": 150000,
                "nps_voluntary_contribution": 50000,
                "nps_employer_contribution": 60000
            },
            "capital_gains": {
                "long_term_capital_gains": 100000,
                "short_term_capital_gains": 0
            },
            "tax_regime": "old_regime"
        }"#
        .to_string()
    }

    #[test]
    fn test_parse_valid_profile() {
        let profile = TaxProfile::parse(&sample_json()).unwrap();
        assert_eq!(profile.primary_income.source, "Salary");
        assert_eq!(profile.tax_regime, TaxRegime::OldRegime);
        assert_eq!(profile.investments.section_80c, 150000.0);
    }

    #[test]
    fn test_parse_fenced_profile() {
        let fenced = format!("```json\n{}\n```", sample_json());
        let profile = TaxProfile::parse(&fenced).unwrap();
        assert_eq!(profile.house_rent, 240000.0);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = TaxProfile::parse("I could not determine the values.").unwrap_err();
        assert!(matches!(err, InterviewError::MalformedProfile(_)));
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        let json = sample_json().replace("\"house_rent\": 240000", "\"house_rent\": -1");
        let err = TaxProfile::parse(&json).unwrap_err();
        assert!(err.to_string().contains("house_rent"));
    }

    #[test]
    fn test_parse_rejects_unknown_regime() {
        let json = sample_json().replace("old_regime", "middle_regime");
        let err = TaxProfile::parse(&json).unwrap_err();
        assert!(matches!(err, InterviewError::MalformedProfile(_)));
    }

    #[test]
    fn test_regime_serialization() {
        let profile = TaxProfile::parse(&sample_json()).unwrap();
        let text = profile.to_prompt_text().unwrap();
        assert!(text.contains("\"tax_regime\": \"old_regime\""));
    }
}
