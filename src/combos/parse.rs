//! Parsing of command-line candidate lists and targets.
//!
//! All validation happens here, before a search starts; the search itself
//! accepts any candidate list and target.

use std::fmt;
use std::num::ParseIntError;

/// A candidate or target token that is not an integer literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    Candidate {
        token: String,
        position: usize,
        reason: ParseIntError,
    },
    Target {
        token: String,
        reason: ParseIntError,
    },
}

impl fmt::Display for InputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormatError::Candidate {
                token,
                position,
                reason,
            } => write!(
                f,
                "Invalid candidate '{token}' at position {position}: {reason}"
            ),
            InputFormatError::Target { token, reason } => {
                write!(f, "Invalid target '{token}': {reason}")
            }
        }
    }
}

impl std::error::Error for InputFormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputFormatError::Candidate { reason, .. } | InputFormatError::Target { reason, .. } => {
                Some(reason)
            }
        }
    }
}

/// Parse a comma-separated integer list such as `"10, 1,2 ,7"`.
///
/// Trailing empty tokens are dropped (`"1,2,"` is `[1, 2]`), but input
/// without any comma is always one token, so blank input is rejected.
pub fn parse_candidates(input: &str) -> Result<Vec<i64>, InputFormatError> {
    let mut tokens: Vec<&str> = input.split(',').map(str::trim).collect();
    if tokens.len() > 1 {
        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }
    }

    tokens
        .into_iter()
        .enumerate()
        .map(|(position, token)| {
            token
                .parse::<i64>()
                .map_err(|reason| InputFormatError::Candidate {
                    token: token.to_string(),
                    position,
                    reason,
                })
        })
        .collect()
}

pub fn parse_target(input: &str) -> Result<i64, InputFormatError> {
    let token = input.trim();
    token
        .parse::<i64>()
        .map_err(|reason| InputFormatError::Target {
            token: token.to_string(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidates_trims_around_commas() {
        assert_eq!(
            parse_candidates("10,1, 2 ,7,1,6,2,5").unwrap(),
            vec![10, 1, 2, 7, 1, 6, 2, 5]
        );
        assert_eq!(parse_candidates(" -3 , 0,+4").unwrap(), vec![-3, 0, 4]);
    }

    #[test]
    fn test_parse_candidates_blank_is_rejected() {
        for blank in ["", "   "] {
            let err = parse_candidates(blank).unwrap_err();
            assert!(matches!(
                err,
                InputFormatError::Candidate { ref token, position: 0, .. } if token.is_empty()
            ));
        }
    }

    #[test]
    fn test_parse_candidates_drops_trailing_empty_tokens() {
        assert_eq!(parse_candidates("1,2,").unwrap(), vec![1, 2]);
        assert_eq!(parse_candidates("1, 2 , ,").unwrap(), vec![1, 2]);
        // Only separators: every token is a trailing empty one
        assert!(parse_candidates(",").unwrap().is_empty());
    }

    #[test]
    fn test_parse_candidates_rejects_inner_empty_tokens() {
        let err = parse_candidates(",1").unwrap_err();
        assert!(matches!(err, InputFormatError::Candidate { position: 0, .. }));
        assert!(parse_candidates("1,,2").is_err());
    }

    #[test]
    fn test_parse_candidates_reports_bad_token() {
        let err = parse_candidates("1,two,3").unwrap_err();
        assert!(matches!(
            err,
            InputFormatError::Candidate { ref token, position: 1, .. } if token == "two"
        ));
        assert!(err.to_string().contains("'two' at position 1"));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target(" 8 ").unwrap(), 8);
        assert_eq!(parse_target("-12").unwrap(), -12);

        let err = parse_target("8.5").unwrap_err();
        assert!(matches!(err, InputFormatError::Target { .. }));
        assert!(err.to_string().starts_with("Invalid target '8.5'"));
    }
}
