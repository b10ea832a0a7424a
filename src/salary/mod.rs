//! Progressive net salary calculation
//!
//! Each bracket's rate applies only to the slice of the gross amount that
//! falls inside it:
//!
//! ```text
//! 0k - 10k   ->  0%
//! 10k - 20k  -> 20%
//! 20k - 40k  -> 40%
//! 40k - inf  -> 50%
//!
//! 25k -> 10k @ 0% + 10k @ 20% + 5k @ 40% -> 10k + 8k + 3k -> 21k
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One tax bracket. `high = None` means the bracket is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBracket {
    pub low: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    pub rate: f64,
}

impl RateBracket {
    pub fn new(low: f64, high: f64, rate: f64) -> Self {
        Self {
            low,
            high: Some(high),
            rate,
        }
    }

    pub fn unbounded(low: f64, rate: f64) -> Self {
        Self {
            low,
            high: None,
            rate,
        }
    }

    pub fn upper(&self) -> f64 {
        self.high.unwrap_or(f64::INFINITY)
    }

    fn validate(&self) -> Result<()> {
        if !self.low.is_finite() {
            anyhow::bail!("Bracket lower bound must be finite, got {}", self.low);
        }
        if self.upper() < self.low {
            anyhow::bail!(
                "Bracket upper bound {} is below its lower bound {}",
                self.upper(),
                self.low
            );
        }
        if !(0.0..=1.0).contains(&self.rate) {
            anyhow::bail!("Bracket rate must be between 0 and 1, got {}", self.rate);
        }
        Ok(())
    }
}

/// Anything that turns a gross amount into a net one
pub trait NetSalaryCalculator {
    fn calculate(&self, gross: f64) -> f64;
}

/// Calculator over a list of brackets sorted by lower bound
#[derive(Debug, Clone)]
pub struct BracketCalculator {
    brackets: Vec<RateBracket>,
}

impl BracketCalculator {
    pub fn new(brackets: impl IntoIterator<Item = RateBracket>) -> Result<Self> {
        let mut brackets: Vec<RateBracket> = brackets.into_iter().collect();
        for (index, bracket) in brackets.iter().enumerate() {
            bracket
                .validate()
                .with_context(|| format!("Invalid salary bracket #{}", index + 1))?;
        }
        brackets.sort_by(|a, b| a.low.total_cmp(&b.low));
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[RateBracket] {
        &self.brackets
    }
}

impl Default for BracketCalculator {
    fn default() -> Self {
        Self {
            brackets: default_brackets(),
        }
    }
}

impl NetSalaryCalculator for BracketCalculator {
    fn calculate(&self, gross: f64) -> f64 {
        let mut net = 0.0;
        let mut gross_left = gross;

        for bracket in &self.brackets {
            let kept = 1.0 - bracket.rate;
            if gross > bracket.upper() {
                let width = bracket.upper() - bracket.low;
                gross_left -= width;
                net += width * kept;
            } else {
                net += gross_left * kept;
                break;
            }
        }

        net
    }
}

pub fn default_brackets() -> Vec<RateBracket> {
    vec![
        RateBracket::new(0.0, 10_000.0, 0.0),
        RateBracket::new(10_000.0, 20_000.0, 0.2),
        RateBracket::new(20_000.0, 40_000.0, 0.4),
        RateBracket::unbounded(40_000.0, 0.5),
    ]
}

/// Parse a comma-separated list of gross amounts
pub fn parse_amounts(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("Invalid gross amount '{token}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_default_brackets() {
        let calculator = BracketCalculator::default();
        assert_close(calculator.calculate(10_000.0), 10_000.0);
        assert_close(calculator.calculate(15_000.0), 14_000.0);
        assert_close(calculator.calculate(25_000.0), 21_000.0);
        assert_close(calculator.calculate(50_000.0), 35_000.0);
    }

    #[test]
    fn test_zero_and_first_bracket() {
        let calculator = BracketCalculator::default();
        assert_close(calculator.calculate(0.0), 0.0);
        assert_close(calculator.calculate(7_500.0), 7_500.0);
    }

    #[test]
    fn test_brackets_are_sorted_on_construction() {
        let mut shuffled = default_brackets();
        shuffled.reverse();
        let calculator = BracketCalculator::new(shuffled).unwrap();

        assert_eq!(calculator.brackets()[0].low, 0.0);
        assert_close(calculator.calculate(25_000.0), 21_000.0);
    }

    #[test]
    fn test_invalid_brackets_are_rejected() {
        let err = BracketCalculator::new(vec![RateBracket::new(0.0, 10.0, 1.5)]).unwrap_err();
        assert!(format!("{err:#}").contains("rate must be between 0 and 1"));

        assert!(BracketCalculator::new(vec![RateBracket::new(10.0, 5.0, 0.1)]).is_err());
        assert!(BracketCalculator::new(vec![RateBracket::unbounded(f64::NAN, 0.1)]).is_err());
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(
            parse_amounts("10000, 15000,25000.5").unwrap(),
            vec![10_000.0, 15_000.0, 25_000.5]
        );
        assert!(parse_amounts("10k").is_err());
    }
}
