use crate::api::binding::{CliOption, CliPositional, GenericBindable};
use crate::convert::ConversionError;
use crate::matcher::{OptionConfig, PositionalConfig};
use crate::parser::AnonymousResolvable;

pub(crate) struct AnonymousBinding<'a, T: 'a> {
    field: Box<dyn GenericBindable<'a, T> + 'a>,
    default: Option<T>,
}

impl<'a, T> AnonymousBinding<'a, T> {
    #[cfg(test)]
    pub(crate) fn bind(field: impl GenericBindable<'a, T> + 'a, default: Option<T>) -> Self {
        Self {
            field: Box::new(field),
            default,
        }
    }
}

impl<'a, T> AnonymousResolvable for AnonymousBinding<'a, T> {
    fn assign(&mut self, token: &str) -> Result<(), ConversionError> {
        self.field.assign(token)
    }

    fn assign_default(&mut self) -> bool {
        match self.default.take() {
            Some(value) => {
                self.field.fill(value);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SpecClass {
    Opt,
    Pos,
}

pub(super) struct SpecInner<'a, T> {
    class: SpecClass,
    field: Box<dyn GenericBindable<'a, T> + 'a>,
    name: Option<String>,
    help: Option<String>,
    default: Option<T>,
}

impl<'a, T> SpecInner<'a, T> {
    pub(super) fn class(&self) -> SpecClass {
        self.class
    }

    pub(super) fn into_option(self) -> (OptionConfig, AnonymousBinding<'a, T>) {
        let SpecInner {
            field,
            name,
            default,
            ..
        } = self;
        let name = name.expect("internal error - an option spec must carry a name");
        (OptionConfig::new(name), AnonymousBinding { field, default })
    }

    pub(super) fn into_positional(self, position: usize) -> (PositionalConfig, AnonymousBinding<'a, T>) {
        let SpecInner { field, default, .. } = self;
        (
            PositionalConfig::new(position),
            AnonymousBinding { field, default },
        )
    }
}

impl<'a, T> std::fmt::Debug for SpecInner<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = match &self.class {
            SpecClass::Opt => "Opt",
            SpecClass::Pos => "Pos",
        };
        let name = match &self.name {
            Some(n) => format!("--{n}"),
            None => "<positional>".to_string(),
        };
        let default = if self.default.is_some() {
            ", default"
        } else {
            ""
        };
        let help = if let Some(d) = &self.help {
            format!(", {d}")
        } else {
            "".to_string()
        };

        write!(
            f,
            "{class}[{t}, {name}{default}{help}]",
            t = std::any::type_name::<T>(),
        )
    }
}

/// An option/positional parameter declaration for the argument parser.
/// Used with [`ArgumentParser::add`](crate::ArgumentParser::add).
pub struct Spec<'a, T>(SpecInner<'a, T>);

impl<'a, T> Spec<'a, T> {
    /// Create an option spec: a named parameter specified via `--name value`
    /// (or `--name=value`) syntax.
    ///
    /// ### Example
    /// ```
    /// use argbind::{Scalar, Spec};
    ///
    /// let mut count: u32 = 0;
    /// Spec::option(Scalar::new(&mut count), "count");
    /// ```
    pub fn option(
        field: impl GenericBindable<'a, T> + CliOption + 'a,
        name: impl Into<String>,
    ) -> Self {
        Self(SpecInner {
            class: SpecClass::Opt,
            field: Box::new(field),
            name: Some(name.into()),
            help: None,
            default: None,
        })
    }

    /// Create a positional spec: an unnamed parameter matched by its position
    /// among the non-option tokens, in declaration order.
    ///
    /// ### Example
    /// ```
    /// use argbind::{Scalar, Spec};
    ///
    /// let mut path = String::new();
    /// Spec::positional(Scalar::new(&mut path));
    /// ```
    pub fn positional(field: impl GenericBindable<'a, T> + CliPositional + 'a) -> Self {
        Self(SpecInner {
            class: SpecClass::Pos,
            field: Box::new(field),
            name: None,
            help: None,
            default: None,
        })
    }

    /// Document the description for this spec.
    /// If repeated, only the final description will apply to the spec.
    ///
    /// ### Example
    /// ```
    /// use argbind::{Scalar, Spec};
    ///
    /// let mut path = String::new();
    /// Spec::positional(Scalar::new(&mut path))
    ///     .help("--this will get discarded--")
    ///     .help("The input path.");
    /// ```
    pub fn help(self, description: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.help = Some(description.into());
        Self(inner)
    }

    /// Declare the default value for this spec, applied when no token matches
    /// it. A spec without a default is required.
    /// If repeated, only the final default will apply to the spec.
    ///
    /// ### Example
    /// ```
    /// use argbind::{Scalar, Spec};
    ///
    /// let mut count: u32 = 0;
    /// Spec::option(Scalar::new(&mut count), "count").default(1);
    /// ```
    pub fn default(self, value: T) -> Self {
        let mut inner = self.0;
        inner.default = Some(value);
        Self(inner)
    }

    pub(super) fn consume(self) -> SpecInner<'a, T> {
        self.0
    }
}
