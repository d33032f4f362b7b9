use crate::convert::ConversionError;

/// Marker trait for bindable types that can formulate an option.
pub trait CliOption {}

/// Marker trait for bindable types that can formulate a positional parameter.
pub trait CliPositional {}

/// Behaviour to bind an explicit generic type T between input tokens and a
/// record field.
///
/// We use this at the bottom of the parser object graph so the compiler can
/// maintain each field's type.
#[doc(hidden)]
pub trait GenericBindable<'a, T> {
    /// Write a value directly into the bound field.
    fn fill(&mut self, value: T);

    /// Convert a token and write it into the bound field.
    fn assign(&mut self, token: &str) -> Result<(), ConversionError>;
}
