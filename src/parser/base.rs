use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use crate::convert::ConversionError;
use crate::matcher::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We need a (dyn .. [ignoring T] ..) here in order to put the bindings of varying types T under one collection.
// In other words, we want the bottom of the object graph to include the types T, but up here we want to work across all T.
pub(crate) type OptionBinding<'a> = (OptionConfig, Box<(dyn AnonymousResolvable + 'a)>);
pub(crate) type PositionalBinding<'a> = (PositionalConfig, Box<(dyn AnonymousResolvable + 'a)>);

/// A registration fault detected while building the [`Resolver`](crate::Resolver).
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl From<TokenMatcherError> for ConfigError {
    fn from(error: TokenMatcherError) -> Self {
        ConfigError(error.to_string())
    }
}

/// The first failure encountered while resolving the token sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A consumed token failed conversion into its field's type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// An option marker named no declared (or an already matched) option.
    #[error("Option '--{0}' does not exist.")]
    UnknownOption(String),

    /// An option marker arrived with no following token to take as its value.
    #[error("Missing value for option '--{0}'.")]
    MissingOptionValue(String),

    /// A candidate positional token arrived after every positional was filled.
    #[error("No positional parameter left to match token '{0}'.")]
    PositionalsExhausted(String),

    /// A parameter matched no token and declared no default.
    #[error("Missing required parameter '{0}'.")]
    MissingRequiredArgument(String),

    /// Internal consistency fault: two parameters consumed the same token.
    #[error("Token at index {index} was consumed by both '{first}' and '{second}'.")]
    DuplicateConsumption {
        /// Index of the doubly consumed token.
        index: usize,
        /// The parameter that consumed the token first.
        first: String,
        /// The parameter that attempted to consume the token again.
        second: String,
    },
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::InvalidOption(name) => ParseError::UnknownOption(name),
            MatchError::MissingValue(name) => ParseError::MissingOptionValue(name),
            MatchError::PositionalsExhausted(token) => ParseError::PositionalsExhausted(token),
        }
    }
}

/// Behaviour to resolve a matched token, or a declared default, into a bound
/// field of an implicit type T.
///
/// We use this at the middle/top of the parser object graph so that fields of
/// different types may all be resolved by a single pass.
pub(crate) trait AnonymousResolvable {
    /// Convert the token and write it into the bound field.
    fn assign(&mut self, token: &str) -> Result<(), ConversionError>;

    /// Write the declared default into the bound field, reporting whether one
    /// was declared.
    fn assign_default(&mut self) -> bool;
}

// Tracks, per token index, which parameter consumed the token. A correct
// matcher never consumes an index twice; the ledger reports it as a fault
// instead of silently reprocessing.
pub(crate) struct ConsumptionLedger {
    consumers: Vec<Option<SlotId>>,
}

impl ConsumptionLedger {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            consumers: vec![None; length],
        }
    }

    pub(crate) fn mark(&mut self, index: usize, slot: &SlotId) -> Result<(), ParseError> {
        let entry = self
            .consumers
            .get_mut(index)
            .expect("internal error - consumed index must fall within the token sequence");

        match entry {
            Some(first) => Err(ParseError::DuplicateConsumption {
                index,
                first: first.to_string(),
                second: slot.to_string(),
            }),
            None => {
                entry.replace(slot.clone());
                Ok(())
            }
        }
    }
}


/// The configured resolver.
/// Built via [`ArgumentParser::build`](crate::ArgumentParser::build).
pub struct Resolver<'a> {
    token_matcher: TokenMatcher,
    bindings: HashMap<SlotId, Box<(dyn AnonymousResolvable + 'a)>>,
    declaration: Vec<SlotId>,
}

impl<'a> std::fmt::Debug for Resolver<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver{..}").finish()
    }
}

impl<'a> Resolver<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), Vec::default()).unwrap()
    }

    pub(crate) fn new(
        options: Vec<OptionBinding<'a>>,
        positionals: Vec<PositionalBinding<'a>>,
    ) -> Result<Self, ConfigError> {
        let mut option_configs = Vec::default();
        let mut positional_configs = VecDeque::default();
        let mut bindings: HashMap<SlotId, Box<(dyn AnonymousResolvable + 'a)>> =
            HashMap::default();
        let mut declaration = Vec::default();

        for (config, binding) in options.into_iter() {
            let slot = SlotId::Option(config.name().to_string());

            if bindings.insert(slot.clone(), binding).is_some() {
                return Err(ConfigError(format!(
                    "Cannot duplicate the parameter '{slot}'."
                )));
            }

            declaration.push(slot);
            option_configs.push(config);
        }

        for (config, binding) in positionals.into_iter() {
            let slot = SlotId::Positional(config.position());

            if bindings.insert(slot.clone(), binding).is_some() {
                return Err(ConfigError(format!(
                    "Cannot duplicate the parameter '{slot}'."
                )));
            }

            declaration.push(slot);
            positional_configs.push_back(config);
        }

        let token_matcher = TokenMatcher::new(option_configs, positional_configs)?;

        Ok(Self {
            token_matcher,
            bindings,
            declaration,
        })
    }

    /// Run the resolver against the input tokens.
    ///
    /// Each token is aligned to a declared parameter and immediately converted
    /// into that parameter's field, so the first failure surfaces in token
    /// order. After the scan, unmatched parameters fall back to their declared
    /// defaults; a parameter with neither match nor default is an error.
    ///
    /// On failure the record may be partially written; only an `Ok` return
    /// guarantees every bound field was populated.
    ///
    /// ### Example
    /// ```
    /// use argbind::{ArgumentParser, Scalar, Spec};
    ///
    /// let mut value: u32 = 0;
    /// let resolver = ArgumentParser::new()
    ///     .add(Spec::option(Scalar::new(&mut value), "value"))
    ///     .build()
    ///     .unwrap();
    ///
    /// resolver.parse_tokens(&["--value", "42"]).unwrap();
    ///
    /// assert_eq!(value, 42);
    /// ```
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<(), ParseError> {
        let Resolver {
            mut token_matcher,
            mut bindings,
            declaration,
        } = self;
        let mut ledger = ConsumptionLedger::new(tokens.len());

        // 1. Feed the raw token strings to the matcher, resolving each
        // completed match in place.
        for (index, token) in tokens.iter().enumerate() {
            if let Some(match_tokens) = token_matcher.feed(index, token)? {
                Self::resolve(&mut bindings, &mut ledger, match_tokens)?;
            }
        }

        token_matcher.close()?;

        // 2. Every parameter left unmatched falls back to its declared default.
        for slot in declaration {
            if let Some(mut binding) = bindings.remove(&slot) {
                if !binding.assign_default() {
                    return Err(ParseError::MissingRequiredArgument(slot.to_string()));
                }

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Defaulted the unmatched parameter '{slot}'.");
                }
            }
        }

        Ok(())
    }

    fn resolve(
        bindings: &mut HashMap<SlotId, Box<(dyn AnonymousResolvable + 'a)>>,
        ledger: &mut ConsumptionLedger,
        match_tokens: MatchTokens,
    ) -> Result<(), ParseError> {
        for index in &match_tokens.consumed {
            ledger.mark(*index, &match_tokens.slot)?;
        }

        let mut binding = bindings
            .remove(&match_tokens.slot)
            .expect("internal error - mismatch between matches and bindings");

        let (_, value) = &match_tokens.value;
        binding.assign(value).map_err(ParseError::from)?;

        Ok(())
    }
}
