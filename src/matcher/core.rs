use std::collections::{HashSet, VecDeque};
use thiserror::Error;

use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenMatcherError {
    #[error("Cannot duplicate the option '--{0}'.")]
    DuplicateOption(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Option '--{0}' does not exist.")]
    InvalidOption(String),

    #[error("Missing value for option '--{0}'.")]
    MissingValue(String),

    #[error("No positional parameter left to match token '{0}'.")]
    PositionalsExhausted(String),
}

/// Aligns raw tokens to declared option names and positional slots, one token
/// at a time. Conversion happens above this layer; the matcher only decides
/// which slot each token belongs to.
#[derive(Debug)]
pub(crate) struct TokenMatcher {
    options: HashSet<String>,
    positionals: VecDeque<PositionalConfig>,
    // An option marker waiting for its value: (marker index, option name).
    pending: Option<(usize, String)>,
}

impl TokenMatcher {
    pub(crate) fn new(
        options: Vec<OptionConfig>,
        positionals: VecDeque<PositionalConfig>,
    ) -> Result<Self, TokenMatcherError> {
        let mut names = HashSet::default();

        for option_config in options.into_iter() {
            if !names.insert(option_config.name().to_string()) {
                return Err(TokenMatcherError::DuplicateOption(
                    option_config.name().to_string(),
                ));
            }
        }

        Ok(Self {
            options: names,
            positionals,
            pending: None,
        })
    }

    pub(crate) fn feed(
        &mut self,
        index: usize,
        token: &str,
    ) -> Result<Option<MatchTokens>, MatchError> {
        // A pending option takes the next token as its value, whatever its shape.
        if let Some((marker, name)) = self.pending.take() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Matched '{token}' as the value of option '--{name}'.");
            }

            return Ok(Some(MatchTokens {
                slot: SlotId::Option(name),
                consumed: vec![marker, index],
                value: (index, token.to_string()),
            }));
        }

        // Find an option marker, such as:
        //  --count ..
        //  --count=..
        if let Some(stripped) = token.strip_prefix("--") {
            return self.match_option(index, split_equals_delimiter(stripped));
        }

        // Match against a positional.
        self.match_positional(index, token)
    }

    fn match_option(
        &mut self,
        index: usize,
        (name, inline_value): (&str, Option<&str>),
    ) -> Result<Option<MatchTokens>, MatchError> {
        // Matched options leave the table, so a repeated marker reports as invalid.
        if !self.options.remove(name) {
            return Err(MatchError::InvalidOption(name.to_string()));
        }

        match inline_value {
            // Options using k=v syntax complete within their single token.
            Some(value) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Matched '{value}' as the inline value of option '--{name}'.");
                }

                Ok(Some(MatchTokens {
                    slot: SlotId::Option(name.to_string()),
                    consumed: vec![index],
                    value: (index, value.to_string()),
                }))
            }
            None => {
                if self.pending.replace((index, name.to_string())).is_some() {
                    unreachable!("internal error - the pending option is expected to be None");
                }

                Ok(None)
            }
        }
    }

    fn match_positional(
        &mut self,
        index: usize,
        token: &str,
    ) -> Result<Option<MatchTokens>, MatchError> {
        match self.positionals.pop_front() {
            Some(positional_config) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Matched '{token}' against positional #{n}.",
                        n = positional_config.position() + 1
                    );
                }

                Ok(Some(MatchTokens {
                    slot: SlotId::Positional(positional_config.position()),
                    consumed: vec![index],
                    value: (index, token.to_string()),
                }))
            }
            None => Err(MatchError::PositionalsExhausted(token.to_string())),
        }
    }

    pub(crate) fn close(self) -> Result<(), MatchError> {
        match self.pending {
            Some((_, name)) => Err(MatchError::MissingValue(name)),
            None => Ok(()),
        }
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn option_matcher(names: &[&str]) -> TokenMatcher {
        let options = names.iter().map(|name| OptionConfig::new(*name)).collect();
        TokenMatcher::new(options, VecDeque::default()).unwrap()
    }

    #[test]
    fn option_duplicate() {
        let options = vec![OptionConfig::new("initial"), OptionConfig::new("initial")];

        assert_eq!(
            TokenMatcher::new(options, VecDeque::default()).unwrap_err(),
            TokenMatcherError::DuplicateOption("initial".to_string())
        );
    }

    #[test]
    fn option_with_following_value() {
        let mut tm = option_matcher(&["initial"]);

        assert_eq!(tm.feed(0, "--initial").unwrap(), None);
        assert_eq!(
            tm.feed(1, "value").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Option("initial".to_string()),
                consumed: vec![0, 1],
                value: (1, "value".to_string()),
            })
        );
        tm.close().unwrap();
    }

    #[rstest]
    #[case("--initial=", "")]
    #[case("--initial=a", "a")]
    #[case("--initial=a b c", "a b c")]
    #[case("--initial=a=b", "a=b")]
    fn option_equals_delimiter(#[case] token: &str, #[case] expected: &str) {
        let mut tm = option_matcher(&["initial"]);

        assert_eq!(
            tm.feed(0, token).unwrap(),
            Some(MatchTokens {
                slot: SlotId::Option("initial".to_string()),
                consumed: vec![0],
                value: (0, expected.to_string()),
            })
        );
        tm.close().unwrap();
    }

    #[test]
    fn option_value_may_look_like_marker() {
        let mut tm = option_matcher(&["initial", "verbose"]);

        assert_eq!(tm.feed(0, "--initial").unwrap(), None);
        assert_eq!(
            tm.feed(1, "--verbose").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Option("initial".to_string()),
                consumed: vec![0, 1],
                value: (1, "--verbose".to_string()),
            })
        );
    }

    #[test]
    fn option_unmatched() {
        let mut tm = option_matcher(&["verbose"]);

        assert_eq!(
            tm.feed(0, "--moot"),
            Err(MatchError::InvalidOption("moot".to_string()))
        );
    }

    #[test]
    fn option_repeat() {
        let mut tm = option_matcher(&["initial"]);

        tm.feed(0, "--initial=a").unwrap();
        assert_eq!(
            tm.feed(1, "--initial=b"),
            Err(MatchError::InvalidOption("initial".to_string()))
        );
    }

    #[test]
    fn option_empty_name() {
        let mut tm = option_matcher(&["verbose"]);

        assert_eq!(
            tm.feed(0, "--"),
            Err(MatchError::InvalidOption("".to_string()))
        );
    }

    #[test]
    fn option_missing_value() {
        let mut tm = option_matcher(&["initial"]);

        assert_eq!(tm.feed(0, "--initial").unwrap(), None);
        assert_eq!(
            tm.close(),
            Err(MatchError::MissingValue("initial".to_string()))
        );
    }

    #[test]
    fn positionals_in_order() {
        let positionals = VecDeque::from([PositionalConfig::new(0), PositionalConfig::new(1)]);
        let mut tm = TokenMatcher::new(Vec::default(), positionals).unwrap();

        assert_eq!(
            tm.feed(0, "a").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Positional(0),
                consumed: vec![0],
                value: (0, "a".to_string()),
            })
        );
        assert_eq!(
            tm.feed(1, "b").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Positional(1),
                consumed: vec![1],
                value: (1, "b".to_string()),
            })
        );
        tm.close().unwrap();
    }

    #[test]
    fn positionals_exhausted() {
        let positionals = VecDeque::from([PositionalConfig::new(0)]);
        let mut tm = TokenMatcher::new(Vec::default(), positionals).unwrap();

        tm.feed(0, "a").unwrap();
        assert_eq!(
            tm.feed(1, "b"),
            Err(MatchError::PositionalsExhausted("b".to_string()))
        );
    }

    #[test]
    fn positionals_unfilled_close() {
        // Unmatched positionals are not the matcher's concern; defaults apply above.
        let positionals = VecDeque::from([PositionalConfig::new(0)]);
        let tm = TokenMatcher::new(Vec::default(), positionals).unwrap();

        tm.close().unwrap();
    }

    #[test]
    fn option_positional_mix() {
        let options = vec![OptionConfig::new("initial")];
        let positionals = VecDeque::from([PositionalConfig::new(0), PositionalConfig::new(1)]);
        let mut tm = TokenMatcher::new(options, positionals).unwrap();

        assert_eq!(
            tm.feed(0, "x").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Positional(0),
                consumed: vec![0],
                value: (0, "x".to_string()),
            })
        );
        assert_eq!(tm.feed(1, "--initial").unwrap(), None);
        assert_eq!(
            tm.feed(2, "a").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Option("initial".to_string()),
                consumed: vec![1, 2],
                value: (2, "a".to_string()),
            })
        );
        assert_eq!(
            tm.feed(3, "y").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Positional(1),
                consumed: vec![3],
                value: (3, "y".to_string()),
            })
        );
        tm.close().unwrap();
    }

    #[test]
    fn negative_number_is_positional() {
        // Single-dash tokens are not option markers; negative numbers flow to positionals.
        let positionals = VecDeque::from([PositionalConfig::new(0)]);
        let mut tm = TokenMatcher::new(Vec::default(), positionals).unwrap();

        assert_eq!(
            tm.feed(0, "-5").unwrap(),
            Some(MatchTokens {
                slot: SlotId::Positional(0),
                consumed: vec![0],
                value: (0, "-5".to_string()),
            })
        );
    }
}
