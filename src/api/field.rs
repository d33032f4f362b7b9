use crate::api::binding::*;
use crate::convert::{ConversionError, FromToken};

/// A binding over one record field, taking a single value.
pub struct Scalar<'a, T> {
    variable: &'a mut T,
}

impl<'a, T> CliOption for Scalar<'a, T> {}
impl<'a, T> CliPositional for Scalar<'a, T> {}

impl<'a, T> Scalar<'a, T> {
    /// Bind a record field.
    ///
    /// ### Example
    /// ```
    /// use argbind::Scalar;
    ///
    /// let mut count: u32 = 0;
    /// Scalar::new(&mut count);
    /// ```
    pub fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }
}

impl<'a, T> GenericBindable<'a, T> for Scalar<'a, T>
where
    T: FromToken,
{
    fn fill(&mut self, value: T) {
        *self.variable = value;
    }

    fn assign(&mut self, token: &str) -> Result<(), ConversionError> {
        let value = T::from_token(token)?;
        self.fill(value);
        Ok(())
    }
}
