use crate::api::parameter::{Spec, SpecClass};
use crate::parser::{ConfigError, OptionBinding, PositionalBinding, Resolver};

/// The argument parser registration surface.
///
/// Collects [`Spec`]s bound to the caller's record fields, then builds the
/// [`Resolver`] that runs against the token sequence.
///
/// ### Example
/// ```
/// use argbind::{ArgumentParser, Scalar, Spec};
///
/// let mut count: u32 = 0;
/// let resolver = ArgumentParser::new()
///     .add(Spec::option(Scalar::new(&mut count), "count"))
///     .build()
///     .unwrap();
///
/// resolver.parse_tokens(&["--count", "3"]).unwrap();
///
/// assert_eq!(count, 3);
/// ```
pub struct ArgumentParser<'a> {
    options: Vec<OptionBinding<'a>>,
    positionals: Vec<PositionalBinding<'a>>,
}

impl<'a> Default for ArgumentParser<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ArgumentParser<'a> {
    /// Create an argument parser.
    pub fn new() -> Self {
        Self {
            options: Vec::default(),
            positionals: Vec::default(),
        }
    }

    /// Add an option/positional spec to the argument parser.
    ///
    /// The order of positional specs corresponds to their positional order
    /// during parsing. The order of option specs does not affect the parser
    /// semantics.
    ///
    /// ### Example
    /// ```
    /// use argbind::{ArgumentParser, Scalar, Spec};
    ///
    /// let mut a: u32 = 0;
    /// let mut b: u32 = 0;
    /// let resolver = ArgumentParser::new()
    ///     .add(Spec::positional(Scalar::new(&mut a)))
    ///     .add(Spec::positional(Scalar::new(&mut b)))
    ///     .build()
    ///     .unwrap();
    ///
    /// resolver.parse_tokens(&["1", "2"]).unwrap();
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, 2);
    /// ```
    pub fn add<T: 'a>(mut self, spec: Spec<'a, T>) -> Self {
        let inner = spec.consume();
        match inner.class() {
            SpecClass::Opt => {
                let (config, binding) = inner.into_option();
                self.options.push((config, Box::new(binding)));
            }
            SpecClass::Pos => {
                let position = self.positionals.len();
                let (config, binding) = inner.into_positional(position);
                self.positionals.push((config, Box::new(binding)));
            }
        }

        self
    }

    /// Build the resolver.
    /// This finalizes the registration and checks for errors (ex: a repeated
    /// option name).
    pub fn build(self) -> Result<Resolver<'a>, ConfigError> {
        Resolver::new(self.options, self.positionals)
    }
}
