//! `argbind` is a strict, record-binding command line argument parsing core.
//!
//! Although other crates provide command line parser functionality, `argbind`
//! deliberately covers a narrower contract, "out of the box":
//! * *Strict token conversion*:
//! Every token must fully match its target type's grammar, and fit its exact
//! range.
//! Trailing garbage, embedded whitespace, partial matches, and silent
//! overflow are all rejected; the grammar mismatch ([`ConversionError::Malformed`])
//! is always distinguished from the range violation ([`ConversionError::OutOfRange`]).
//! * *Record binding*:
//! The parser owns no parsed values.
//! Every option and positional is bound to a field of a caller-owned record
//! at registration time, and a successful parse writes each bound field
//! exactly once - from a matched token, or from the spec's declared default.
//! * *First-error reporting*:
//! Parsing is a single pass; the first failure (in token order, then in
//! declaration order for missing parameters) is returned as a descriptive
//! error, and nothing is ever printed.
//!
//! The crate performs no I/O and reads no process state: the caller supplies
//! the token sequence (conventionally `argv[1:]`), and maps the returned
//! error to its own exit code and error stream.
//!
//! # Usage
//! ```
//! use argbind::{ArgumentParser, Scalar, Spec};
//!
//! #[derive(Default)]
//! struct Arguments {
//!     count: u32,
//!     path: String,
//! }
//!
//! let mut arguments = Arguments::default();
//! let resolver = ArgumentParser::new()
//!     .add(Spec::option(Scalar::new(&mut arguments.count), "count").default(1))
//!     .add(Spec::positional(Scalar::new(&mut arguments.path)).help("The input path."))
//!     .build()
//!     .unwrap();
//!
//! resolver.parse_tokens(&["--count", "3", "data.txt"]).unwrap();
//!
//! assert_eq!(arguments.count, 3);
//! assert_eq!(arguments.path, "data.txt");
//! ```
//!
//! # Cli Semantics
//! `argbind` resolves the token sequence according to the following rules.
//! * A token of the form `--NAME` is an option marker; the single following
//! token - whatever its shape - is that option's value.
//! For example, `--key value`.
//! * The key-value pair of an option may instead be joined with the `=`
//! character, within one token.
//! Only the first `=` character acts as the separator.
//! For example, `--key=123`, and `--key=1=2` is equivalent to `--key 1=2`.
//! * Any other token is matched against the next not-yet-filled positional,
//! in declaration order.
//! Notably, single-dash tokens are not option markers, so negative numbers
//! flow to positionals unquoted.
//! * Each option may be specified at most once.
//! * After the scan, a parameter that matched no token takes its declared
//! default; a parameter with neither match nor default is an error.
//!
//! # Supported Types
//! Token conversion is controlled by [`FromToken`], implemented for `u32`,
//! `u64`, `i32`, `i64`, `f32`, `f64`, and `String`.
//! Integers accept the dual-base grammar of a C numeric literal scanner
//! (base-10, or base-16 with a `0x`/`0X` prefix); range checks happen after a
//! 64-bit-wide parse, so narrowing targets detect out-of-range tokens
//! exactly.
//! Floating point types accept the decimal/scientific literal grammar, with
//! single precision parsed at double precision and then range-checked.
//!
//! # Features
//! * `tracing_debug`: Emit [tracing](https://docs.rs/tracing) debug events
//! from the matching internals.
#![deny(missing_docs)]
mod api;
mod convert;
mod matcher;
mod parser;

pub use api::*;
pub use convert::{ConversionError, FromToken};
pub use parser::{ConfigError, ParseError, Resolver};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
