//! # Input Sanitization & Validation
//!
//! Composable filters for answers typed at the interactive client prompt.
//! Filters run in order against the trimmed answer and stop at the first
//! failure, which is reported back to the user as a short message.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use pocketdns::utils::{Sanitize, Terminal};
//!
//! let input = Terminal::ask(
//!     "Enter a domain name (or exit):",
//!     &[
//!         Sanitize::NotEmpty,
//!         Sanitize::AnyOf(vec![
//!             Sanitize::MatchStrings(vec!["exit".to_string()]),
//!             Sanitize::DomainName,
//!         ]),
//!     ],
//! );
//! if let Some(input) = input {
//!     println!("Accepted: {}", input.answer);
//! }
//! ```
use crate::dns::name::validate_domain;
use std::{error::Error, fmt::Display};

/// A validation filter applied to user input.
///
/// - `NotEmpty`: the trimmed input has at least one character.
/// - `MatchStrings`: the input equals one of the given options.
/// - `DomainName`: the input is a domain name a query can be encoded for.
/// - `AnyOf`: at least one of the nested filters accepts the input.
#[derive(Debug, Clone)]
pub enum Sanitize {
    NotEmpty,
    MatchStrings(Vec<String>),
    DomainName,
    AnyOf(Vec<Sanitize>),
}

/// Anything that can check a string input.
pub trait Validate {
    fn validate(&self, input: &str) -> Result<(), FilterError>;
}

/// Why an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    Empty,
    MatchStrings(Vec<String>),
    DomainName(String),
    NoneMatched,
}

impl Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "The value is empty, try again!"),
            Self::MatchStrings(v) => write!(
                f,
                "The value doesn't match with the options: {}, try again!",
                v.join(", ")
            ),
            Self::DomainName(reason) => {
                write!(f, "The value is not a valid domain name ({}), try again!", reason)
            }
            Self::NoneMatched => write!(f, "The value doesn't match any filter, try again!"),
        }
    }
}

impl Error for FilterError {}

impl Sanitize {
    /// Runs `filters` against the trimmed `answer` and returns it if all pass.
    pub fn execute(answer: &str, filters: &[Sanitize]) -> Result<String, FilterError> {
        let clean_answer = answer.trim();

        for filter in filters {
            filter.validate(clean_answer)?;
        }
        Ok(clean_answer.to_string())
    }
}

impl Validate for Sanitize {
    fn validate(&self, input: &str) -> Result<(), FilterError> {
        match self {
            Sanitize::NotEmpty => {
                if input.is_empty() {
                    Err(FilterError::Empty)
                } else {
                    Ok(())
                }
            }
            Sanitize::MatchStrings(options) => {
                if options.iter().any(|o| o == input) {
                    Ok(())
                } else {
                    Err(FilterError::MatchStrings(options.clone()))
                }
            }
            Sanitize::DomainName => match validate_domain(input) {
                Ok(_) => Ok(()),
                Err(e) => Err(FilterError::DomainName(e.to_string())),
            },
            Sanitize::AnyOf(filters) => {
                let mut last = FilterError::NoneMatched;
                for filter in filters {
                    match filter.validate(input) {
                        Ok(()) => return Ok(()),
                        Err(e) => last = e,
                    }
                }
                Err(last)
            }
        }
    }
}
