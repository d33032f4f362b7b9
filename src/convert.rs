use thiserror::Error;

/// Strict token-to-value conversion for a supported scalar type.
///
/// Unlike [`std::str::FromStr`], implementations must consume the entire
/// token (no trailing characters, no surrounding whitespace), accept the
/// dual-base `0x`/`0X` integer grammar, and distinguish a grammar mismatch
/// from a range violation.
///
/// ### Example
/// ```
/// use argbind::FromToken;
///
/// assert_eq!(u32::from_token("0x12").unwrap(), 18);
/// assert_eq!(i32::from_token("-45").unwrap(), -45);
/// assert!(u32::from_token("45 ").is_err());
/// ```
pub trait FromToken: Sized {
    /// The canonical name for this type, as used in conversion error messages.
    fn type_name() -> &'static str;

    /// Convert the token into a value of this type.
    fn from_token(token: &str) -> Result<Self, ConversionError>;
}

/// The two ways a token can fail conversion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The token does not fully match the type's grammar.
    #[error("Token \"{token}\" cannot be parsed as type \"{type_name}\"")]
    Malformed {
        /// The offending token, verbatim.
        token: String,
        /// The canonical name of the target type.
        type_name: &'static str,
    },

    /// The token matches the grammar, but the value does not fit the type.
    #[error("Token \"{token}\" is out of range for type \"{type_name}\"")]
    OutOfRange {
        /// The offending token, verbatim.
        token: String,
        /// The canonical name of the target type.
        type_name: &'static str,
    },
}

impl ConversionError {
    pub(crate) fn malformed<T: FromToken>(token: &str) -> Self {
        ConversionError::Malformed {
            token: token.to_string(),
            type_name: T::type_name(),
        }
    }

    pub(crate) fn out_of_range<T: FromToken>(token: &str) -> Self {
        ConversionError::OutOfRange {
            token: token.to_string(),
            type_name: T::type_name(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ScanFault {
    Malformed,
    OutOfRange,
}

impl ScanFault {
    fn into_conversion<T: FromToken>(self, token: &str) -> ConversionError {
        match self {
            ScanFault::Malformed => ConversionError::malformed::<T>(token),
            ScanFault::OutOfRange => ConversionError::out_of_range::<T>(token),
        }
    }
}

// Scan the full token as an integer literal: an optional leading '-' (signed
// targets only), then either '0x'/'0X' base-16 digits or base-10 digits.
// The magnitude accumulates at 64 bits; targets narrower than that must
// range-check the result themselves.
fn scan_integer(token: &str, signed: bool) -> Result<(bool, u64), ScanFault> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) if signed => (true, rest),
        Some(_) => return Err(ScanFault::Malformed),
        None => (false, token),
    };

    let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(digits) => (16u32, digits),
        None => (10u32, rest),
    };

    if digits.is_empty() {
        return Err(ScanFault::Malformed);
    }

    let mut magnitude: u64 = 0;

    for c in digits.chars() {
        let digit = u64::from(c.to_digit(radix).ok_or(ScanFault::Malformed)?);
        magnitude = magnitude
            .checked_mul(u64::from(radix))
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or(ScanFault::OutOfRange)?;
    }

    Ok((negative, magnitude))
}

// Validate the full token against the decimal/scientific literal grammar:
//   [-] (digits [. digits] | digits . | . digits) ([eE] [+-] digits)?
// The 'inf'/'nan' spellings are not part of the grammar.
fn float_literal(token: &str) -> bool {
    let rest = token.strip_prefix('-').unwrap_or(token);
    let (mantissa, exponent) = match rest.split_once(|c| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (rest, None),
    };

    let mantissa_valid = match mantissa.split_once('.') {
        Some((whole, fraction)) => {
            (!whole.is_empty() || !fraction.is_empty())
                && whole.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|b| b.is_ascii_digit()),
    };

    let exponent_valid = match exponent {
        Some(exponent) => {
            let digits = exponent
                .strip_prefix(|c| c == '+' || c == '-')
                .unwrap_or(exponent);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => true,
    };

    mantissa_valid && exponent_valid
}

// Scan the full token as a floating point literal, at double precision.
fn scan_float(token: &str) -> Result<f64, ScanFault> {
    if !float_literal(token) {
        return Err(ScanFault::Malformed);
    }

    let value: f64 = token
        .parse()
        .expect("internal error - a grammar-checked literal must parse");

    if value.is_infinite() {
        return Err(ScanFault::OutOfRange);
    }

    Ok(value)
}

macro_rules! unsigned_from_token {
    ($($t:ty),*) => {
        $(
            impl FromToken for $t {
                fn type_name() -> &'static str {
                    stringify!($t)
                }

                fn from_token(token: &str) -> Result<Self, ConversionError> {
                    let (_, magnitude) = scan_integer(token, false)
                        .map_err(|fault| fault.into_conversion::<Self>(token))?;
                    Self::try_from(magnitude)
                        .map_err(|_| ConversionError::out_of_range::<Self>(token))
                }
            }
        )*
    };
}

macro_rules! signed_from_token {
    ($($t:ty),*) => {
        $(
            impl FromToken for $t {
                fn type_name() -> &'static str {
                    stringify!($t)
                }

                fn from_token(token: &str) -> Result<Self, ConversionError> {
                    let (negative, magnitude) = scan_integer(token, true)
                        .map_err(|fault| fault.into_conversion::<Self>(token))?;
                    let value = if negative {
                        -i128::from(magnitude)
                    } else {
                        i128::from(magnitude)
                    };
                    Self::try_from(value)
                        .map_err(|_| ConversionError::out_of_range::<Self>(token))
                }
            }
        )*
    };
}

unsigned_from_token!(u32, u64);
signed_from_token!(i32, i64);

impl FromToken for f64 {
    fn type_name() -> &'static str {
        "f64"
    }

    fn from_token(token: &str) -> Result<Self, ConversionError> {
        scan_float(token).map_err(|fault| fault.into_conversion::<Self>(token))
    }
}

impl FromToken for f32 {
    fn type_name() -> &'static str {
        "f32"
    }

    fn from_token(token: &str) -> Result<Self, ConversionError> {
        let value = scan_float(token).map_err(|fault| fault.into_conversion::<Self>(token))?;

        if value.abs() > f64::from(f32::MAX) {
            return Err(ConversionError::out_of_range::<Self>(token));
        }

        Ok(value as f32)
    }
}

impl FromToken for String {
    fn type_name() -> &'static str {
        "String"
    }

    fn from_token(token: &str) -> Result<Self, ConversionError> {
        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("123", 123)]
    #[case("45", 45)]
    #[case("0x12", 0x12)]
    #[case("0X12", 0x12)]
    #[case("0xFFFFFFFFFFFFFFFF", u64::MAX)]
    fn u64_valid(#[case] token: &str, #[case] expected: u64) {
        assert_eq!(u64::from_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("123", 123)]
    #[case("45", 45)]
    #[case("0x12", 0x12)]
    #[case("0xFFFFFFFF", u32::MAX)]
    fn u32_valid(#[case] token: &str, #[case] expected: u32) {
        assert_eq!(u32::from_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("123", 123)]
    #[case("45", 45)]
    #[case("0x12", 0x12)]
    #[case("-123", -123)]
    #[case("-0x12", -0x12)]
    #[case("0x7FFFFFFFFFFFFFFF", i64::MAX)]
    #[case("-0x8000000000000000", i64::MIN)]
    fn i64_valid(#[case] token: &str, #[case] expected: i64) {
        assert_eq!(i64::from_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("123", 123)]
    #[case("45", 45)]
    #[case("0x12", 0x12)]
    #[case("-123", -123)]
    #[case("-0x12", -0x12)]
    #[case("0x7FFFFFFF", i32::MAX)]
    #[case("-0x80000000", i32::MIN)]
    fn i32_valid(#[case] token: &str, #[case] expected: i32) {
        assert_eq!(i32::from_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("1.23", 1.23)]
    #[case("4.0e5", 4.0e5)]
    #[case("1e5", 1e5)]
    #[case("-1.5e-3", -1.5e-3)]
    #[case(".5", 0.5)]
    #[case("5.", 5.0)]
    #[case("1.0e308", 1.0e308)]
    fn f64_valid(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(f64::from_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("1.23", 1.23)]
    #[case("4.0e5", 4.0e5)]
    #[case("1.0e38", 1.0e38)]
    fn f32_valid(#[case] token: &str, #[case] expected: f32) {
        assert_eq!(f32::from_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("foo")]
    #[case("bar")]
    #[case("")]
    #[case("45 ")]
    #[case("--x")]
    fn string_identity(#[case] token: &str) {
        assert_eq!(String::from_token(token).unwrap(), token);
    }

    macro_rules! arithmetic_garbage {
        ($($name:ident: $t:ty),*) => {
            $(
                #[test]
                fn $name() {
                    for token in ["a12", "45a", "45 ", " 45", ""] {
                        assert_matches!(
                            <$t>::from_token(token),
                            Err(ConversionError::Malformed { .. }),
                            "token: '{token}'"
                        );
                    }
                }
            )*
        };
    }

    arithmetic_garbage!(
        u64_garbage: u64,
        u32_garbage: u32,
        i64_garbage: i64,
        i32_garbage: i32,
        f64_garbage: f64,
        f32_garbage: f32
    );

    #[rstest]
    #[case("-")]
    #[case("-0x")]
    #[case("0x")]
    #[case("0X")]
    #[case("--1")]
    #[case("+5")]
    #[case("1-2")]
    fn integer_malformed(#[case] token: &str) {
        assert_matches!(i64::from_token(token), Err(ConversionError::Malformed { .. }));
    }

    #[rstest]
    #[case("-1")]
    #[case("-0x12")]
    fn unsigned_rejects_sign(#[case] token: &str) {
        assert_matches!(u64::from_token(token), Err(ConversionError::Malformed { .. }));
        assert_matches!(u32::from_token(token), Err(ConversionError::Malformed { .. }));
    }

    #[rstest]
    #[case(".")]
    #[case("1e")]
    #[case("1e+")]
    #[case("1.2.3")]
    #[case("1e5e5")]
    #[case("inf")]
    #[case("nan")]
    #[case("NaN")]
    #[case("+1.5")]
    fn float_malformed(#[case] token: &str) {
        assert_matches!(f64::from_token(token), Err(ConversionError::Malformed { .. }));
        assert_matches!(f32::from_token(token), Err(ConversionError::Malformed { .. }));
    }

    #[test]
    fn overflow() {
        assert_matches!(
            u64::from_token("0x10000000000000000"),
            Err(ConversionError::OutOfRange { .. })
        );
        assert_matches!(
            u32::from_token("0x100000000"),
            Err(ConversionError::OutOfRange { .. })
        );
        assert_matches!(
            i64::from_token("0x8000000000000000"),
            Err(ConversionError::OutOfRange { .. })
        );
        assert_matches!(
            i32::from_token("0x80000000"),
            Err(ConversionError::OutOfRange { .. })
        );
        assert_matches!(
            f64::from_token("1.0e309"),
            Err(ConversionError::OutOfRange { .. })
        );
        assert_matches!(
            f32::from_token("1.0e39"),
            Err(ConversionError::OutOfRange { .. })
        );
    }

    #[test]
    fn underflow() {
        assert_matches!(
            i64::from_token("-0x8000000000000001"),
            Err(ConversionError::OutOfRange { .. })
        );
        assert_matches!(
            i32::from_token("-0x80000001"),
            Err(ConversionError::OutOfRange { .. })
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            i32::from_token("45a").unwrap_err().to_string(),
            "Token \"45a\" cannot be parsed as type \"i32\""
        );
        assert_eq!(
            u32::from_token("0x100000000").unwrap_err().to_string(),
            "Token \"0x100000000\" is out of range for type \"u32\""
        );
    }
}
