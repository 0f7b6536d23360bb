//! # Type Descriptors & Typed Conversion
//!
//! A small grammar for naming the type an answer should be converted to,
//! and the converter that performs the conversion.
//!
//! ## Grammar
//!
//! ```text
//! <kind-letters>[<bit-width-digits>]
//! ```
//!
//! - `int`, `int8`, `int16`, `int32`, `int64`
//! - `uint`, `uint8`, `uint16`, `uint32`, `uint64`
//! - `float`, `float32`, `float64`
//! - `rune`
//! - `complex`, `complex64`
//! - anything else (`string`, `text`, `my type`) is opaque and converts to
//!   the raw text unchanged
//!
//! A bit width must be a power of two, at least 8 and below 128.
//!
//! ## Example
//!
//! ```rust
//! use promptly::utils::{TypeDescriptor, TypeKind, TypedValue};
//!
//! let desc: TypeDescriptor = "int8".parse().unwrap();
//! assert_eq!(desc.kind(), TypeKind::Int);
//! assert_eq!(desc.bits(), Some(8));
//!
//! assert_eq!(desc.convert("-12").unwrap(), TypedValue::I8(-12));
//! assert!(desc.convert("300").is_err());
//! ```
use std::{fmt::Display, str::FromStr};

use num_complex::{Complex32, Complex64};

use crate::error::PromptError;

/// The family of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int,
    Uint,
    Float,
    Rune,
    Complex,
    /// Opaque names; conversion is the identity.
    String,
}

impl TypeKind {
    /// Maps the letter run of a type name to its kind.
    pub fn from_name(name: &str) -> TypeKind {
        match name {
            "int" => TypeKind::Int,
            "uint" => TypeKind::Uint,
            "float" => TypeKind::Float,
            "rune" => TypeKind::Rune,
            "complex" => TypeKind::Complex,
            _ => TypeKind::String,
        }
    }
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Float => write!(f, "float"),
            Self::Rune => write!(f, "rune"),
            Self::Complex => write!(f, "complex"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A parsed `{kind, bit width}` pair.
///
/// The width, when present, is always a power of two in `8..128`; both
/// constructors ([`TypeDescriptor::new`] and [`TypeDescriptor::parse`])
/// enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    kind: TypeKind,
    bits: Option<u32>,
}

/// Smallest accepted bit width.
pub const MIN_BITS: u64 = 8;
/// First rejected bit width above the accepted range.
pub const MAX_BITS_EXCLUSIVE: u64 = 128;

/// Parses `$input` as `$t` and wraps it in `$variant`, turning the parse
/// error into its message.
macro_rules! parse_as {
    ($input:expr, $t:ty, $variant:path) => {
        $input
            .parse::<$t>()
            .map($variant)
            .map_err(|e| e.to_string())
    };
}

impl TypeDescriptor {
    /// Builds a descriptor, validating the bit width.
    pub fn new(kind: TypeKind, bits: Option<u32>) -> Result<Self, PromptError> {
        if let Some(b) = bits {
            check_bits(u64::from(b))?;
        }
        Ok(Self { kind, bits })
    }

    /// Descriptor for opaque, pass-through text.
    pub fn text() -> Self {
        Self {
            kind: TypeKind::String,
            bits: None,
        }
    }

    /// Parses a type name such as `"int16"` or `"float"`.
    ///
    /// Kind names are matched ignoring ASCII case (`"Int8"` is `int8`).
    /// Names that are not "letters followed by optional digits" are opaque
    /// and yield [`TypeDescriptor::text`]; the name itself is not kept, so
    /// they display as `string`.
    ///
    /// # Errors
    /// - [`PromptError::BitOutOfRange`] if the width is below 8 or not below 128.
    /// - [`PromptError::BitNotPowerOfTwo`] if the width is not a power of two.
    pub fn parse(name: &str) -> Result<Self, PromptError> {
        let split = name
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(name.len());
        let (letters, digits) = name.split_at(split);

        if letters.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::text());
        }

        let kind = TypeKind::from_name(&letters.to_ascii_lowercase());
        if digits.is_empty() {
            return Ok(Self { kind, bits: None });
        }

        // Anything too long for u64 is far outside the accepted range.
        let bits = digits.parse::<u64>().unwrap_or(u64::MAX);
        check_bits(bits)?;

        Ok(Self {
            kind,
            bits: u32::try_from(bits).ok(),
        })
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn bits(&self) -> Option<u32> {
        self.bits
    }

    /// Converts raw text into a [`TypedValue`] of this descriptor's type.
    ///
    /// | kind      | no width     | with width                          |
    /// |-----------|--------------|-------------------------------------|
    /// | `int`     | `isize`      | `i8`, `i16`, `i32`, `i64`           |
    /// | `uint`    | `usize`      | `u8`, `u16`, `u32`, `u64`           |
    /// | `float`   | `f64`        | `f32` for 32, otherwise `f64`       |
    /// | `rune`    | `i32`        | `i32`                               |
    /// | `complex` | `Complex64`  | `Complex32` for 64, else `Complex64`|
    /// | `string`  | raw text     | raw text                            |
    ///
    /// # Errors
    /// [`PromptError::Conversion`] when the text is not a valid literal of
    /// the target type or does not fit its width.
    pub fn convert(&self, raw: &str) -> Result<TypedValue, PromptError> {
        let converted = match self.kind {
            TypeKind::Int => match self.bits {
                None => parse_as!(raw, isize, TypedValue::Isize),
                Some(8) => parse_as!(raw, i8, TypedValue::I8),
                Some(16) => parse_as!(raw, i16, TypedValue::I16),
                Some(32) => parse_as!(raw, i32, TypedValue::I32),
                // 64 is the only width left after construction checks.
                Some(_) => parse_as!(raw, i64, TypedValue::I64),
            },
            TypeKind::Uint => match self.bits {
                None => parse_as!(raw, usize, TypedValue::Usize),
                Some(8) => parse_as!(raw, u8, TypedValue::U8),
                Some(16) => parse_as!(raw, u16, TypedValue::U16),
                Some(32) => parse_as!(raw, u32, TypedValue::U32),
                Some(_) => parse_as!(raw, u64, TypedValue::U64),
            },
            TypeKind::Float => match self.bits {
                Some(32) => parse_as!(raw, f32, TypedValue::F32),
                _ => parse_as!(raw, f64, TypedValue::F64),
            }
            .and_then(|v| reject_overflow(raw, v)),
            TypeKind::Rune => parse_as!(raw, i32, TypedValue::Rune),
            TypeKind::Complex => {
                let inner = strip_parens(raw);
                match self.bits {
                    Some(64) => parse_as!(inner, Complex32, TypedValue::Complex64),
                    _ => parse_as!(inner, Complex64, TypedValue::Complex128),
                }
                .and_then(|v| reject_overflow(raw, v))
            }
            TypeKind::String => Ok(TypedValue::Text(raw.to_string())),
        };

        converted.map_err(|reason| {
            tracing::debug!(input = raw, target = %self, %reason, "conversion failed");
            PromptError::Conversion {
                input: raw.to_string(),
                target: *self,
                reason,
            }
        })
    }
}

fn check_bits(bits: u64) -> Result<(), PromptError> {
    if !(MIN_BITS..MAX_BITS_EXCLUSIVE).contains(&bits) {
        return Err(PromptError::BitOutOfRange { bits });
    }
    if !bits.is_power_of_two() {
        return Err(PromptError::BitNotPowerOfTwo { bits });
    }
    Ok(())
}

/// Float parsing saturates to infinity instead of failing; an infinite
/// component is only accepted when the literal spells it out.
fn reject_overflow(raw: &str, value: TypedValue) -> Result<TypedValue, String> {
    let infinite = match &value {
        TypedValue::F32(v) => v.is_infinite(),
        TypedValue::F64(v) => v.is_infinite(),
        TypedValue::Complex64(c) => c.re.is_infinite() || c.im.is_infinite(),
        TypedValue::Complex128(c) => c.re.is_infinite() || c.im.is_infinite(),
        _ => false,
    };

    if infinite && !raw.to_ascii_lowercase().contains("inf") {
        return Err("value out of range".to_string());
    }
    Ok(value)
}

fn strip_parens(raw: &str) -> &str {
    raw.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(raw)
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bits {
            Some(b) => write!(f, "{}{}", self.kind, b),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeDescriptor::parse(s)
    }
}

impl TryFrom<&str> for TypeDescriptor {
    type Error = PromptError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        TypeDescriptor::parse(value)
    }
}

/// A value produced by [`TypeDescriptor::convert`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypedValue {
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Rune(i32),
    Complex64(Complex32),
    Complex128(Complex64),
    Text(String),
}

impl Display for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isize(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) | Self::Rune(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Complex64(v) => write!(f, "{v}"),
            Self::Complex128(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("int8", TypeKind::Int, 8)]
    #[test_case("int16", TypeKind::Int, 16)]
    #[test_case("uint32", TypeKind::Uint, 32)]
    #[test_case("float64", TypeKind::Float, 64)]
    #[test_case("complex64", TypeKind::Complex, 64)]
    #[test_case("string16", TypeKind::String, 16)]
    fn test_types_parse_with_width(name: &str, kind: TypeKind, bits: u32) {
        let desc = TypeDescriptor::parse(name).unwrap();
        assert_eq!(desc.kind(), kind);
        assert_eq!(desc.bits(), Some(bits));
        assert_eq!(desc.to_string(), name.to_string());
    }

    #[test_case("int", TypeKind::Int)]
    #[test_case("uint", TypeKind::Uint)]
    #[test_case("rune", TypeKind::Rune)]
    #[test_case("string", TypeKind::String)]
    #[test_case("bool", TypeKind::String)]
    fn test_types_parse_without_width(name: &str, kind: TypeKind) {
        let desc = TypeDescriptor::parse(name).unwrap();
        assert_eq!(desc.kind(), kind);
        assert_eq!(desc.bits(), None);
    }

    #[test_case("Int8", TypeKind::Int, Some(8))]
    #[test_case("UINT", TypeKind::Uint, None)]
    #[test_case("Float32", TypeKind::Float, Some(32))]
    fn test_types_parse_ignores_kind_case(name: &str, kind: TypeKind, bits: Option<u32>) {
        let desc = TypeDescriptor::parse(name).unwrap();
        assert_eq!(desc, TypeDescriptor::new(kind, bits).unwrap());
    }

    #[test_case("8int")]
    #[test_case("int-8")]
    #[test_case("my type")]
    #[test_case("")]
    fn test_types_parse_opaque_names(name: &str) {
        assert_eq!(TypeDescriptor::parse(name).unwrap(), TypeDescriptor::text());
    }

    #[test_case("int4", 4)]
    #[test_case("int0", 0)]
    #[test_case("uint128", 128)]
    #[test_case("int256", 256)]
    fn test_types_parse_bits_out_of_range(name: &str, expected: u64) {
        let res = TypeDescriptor::parse(name);
        assert!(matches!(res, Err(PromptError::BitOutOfRange { bits }) if bits == expected));
    }

    #[test]
    fn test_types_parse_huge_width_is_out_of_range() {
        let res = TypeDescriptor::parse("int99999999999999999999999");
        assert!(matches!(res, Err(PromptError::BitOutOfRange { .. })));
    }

    #[test_case("int12", 12)]
    #[test_case("uint24", 24)]
    #[test_case("float48", 48)]
    #[test_case("int127", 127)]
    fn test_types_parse_bits_not_power_of_two(name: &str, expected: u64) {
        let res = TypeDescriptor::parse(name);
        assert!(matches!(res, Err(PromptError::BitNotPowerOfTwo { bits }) if bits == expected));
    }

    #[test]
    fn test_types_every_power_of_two_below_128_parses() {
        for bits in [8u32, 16, 32, 64] {
            let desc: TypeDescriptor = format!("uint{bits}").parse().unwrap();
            assert_eq!(desc.bits(), Some(bits));
        }
    }

    #[test]
    fn test_types_new_validates_width() {
        assert!(TypeDescriptor::new(TypeKind::Int, Some(32)).is_ok());
        assert!(matches!(
            TypeDescriptor::new(TypeKind::Int, Some(128)),
            Err(PromptError::BitOutOfRange { bits: 128 })
        ));
        assert!(matches!(
            TypeDescriptor::new(TypeKind::Float, Some(40)),
            Err(PromptError::BitNotPowerOfTwo { bits: 40 })
        ));
    }

    #[test]
    fn test_types_try_from() {
        let desc = TypeDescriptor::try_from("int64").unwrap();
        assert_eq!(desc, TypeDescriptor::new(TypeKind::Int, Some(64)).unwrap());
    }

    #[test_case("int8", "127", TypedValue::I8(127))]
    #[test_case("int8", "-128", TypedValue::I8(-128))]
    #[test_case("int16", "+300", TypedValue::I16(300))]
    #[test_case("int32", "-70000", TypedValue::I32(-70000))]
    #[test_case("int64", "9000000000", TypedValue::I64(9_000_000_000))]
    #[test_case("int", "42", TypedValue::Isize(42))]
    #[test_case("uint8", "255", TypedValue::U8(255))]
    #[test_case("uint", "7", TypedValue::Usize(7))]
    #[test_case("uint64", "18446744073709551615", TypedValue::U64(u64::MAX))]
    #[test_case("float32", "5.5", TypedValue::F32(5.5))]
    #[test_case("float64", "-0.25", TypedValue::F64(-0.25))]
    #[test_case("float", "1e3", TypedValue::F64(1000.0))]
    #[test_case("rune", "65", TypedValue::Rune(65))]
    #[test_case("string", "hello there", TypedValue::Text("hello there".to_string()))]
    #[test_case("whatever", "  kept as is ", TypedValue::Text("  kept as is ".to_string()))]
    fn test_types_convert_success(name: &str, raw: &str, expected: TypedValue) {
        let desc = TypeDescriptor::parse(name).unwrap();
        assert_eq!(desc.convert(raw).unwrap(), expected);
    }

    #[test_case("int8", "300")]
    #[test_case("int8", "-129")]
    #[test_case("uint8", "256")]
    #[test_case("uint16", "-1")]
    #[test_case("int32", "12abc")]
    #[test_case("int", "")]
    #[test_case("float32", "one point five")]
    #[test_case("rune", "2147483648")]
    #[test_case("complex", "x+yi")]
    #[test_case("float32", "1e39")]
    #[test_case("float64", "1e400")]
    #[test_case("float64", "-1e400")]
    #[test_case("complex64", "1e39+1i")]
    #[test_case("complex", "(1+1e400i)")]
    fn test_types_convert_failure(name: &str, raw: &str) {
        let desc = TypeDescriptor::parse(name).unwrap();
        let res = desc.convert(raw);
        assert!(matches!(
            res,
            Err(PromptError::Conversion { ref input, target, .. }) if input == raw && target == desc
        ));
    }

    #[test]
    fn test_types_convert_error_message_names_target() {
        let desc = TypeDescriptor::parse("int8").unwrap();
        let err = desc.convert("300").unwrap_err();
        assert!(err.to_string().starts_with("Cannot convert '300' to int8: "));
    }

    #[test]
    fn test_types_convert_overflow_reason() {
        let desc = TypeDescriptor::parse("float32").unwrap();
        let err = desc.convert("1e39").unwrap_err();
        assert!(matches!(err, PromptError::Conversion { ref reason, .. } if reason == "value out of range"));
    }

    #[test_case("float32", "inf")]
    #[test_case("float64", "-Infinity")]
    #[test_case("complex", "inf+1i")]
    fn test_types_convert_spelled_infinity(name: &str, raw: &str) {
        let desc = TypeDescriptor::parse(name).unwrap();
        assert!(desc.convert(raw).is_ok());
    }

    #[test]
    fn test_types_convert_complex() {
        let wide = TypeDescriptor::parse("complex").unwrap();
        assert_eq!(
            wide.convert("1+2i").unwrap(),
            TypedValue::Complex128(Complex64::new(1.0, 2.0))
        );
        assert_eq!(
            wide.convert("(3-4i)").unwrap(),
            TypedValue::Complex128(Complex64::new(3.0, -4.0))
        );
        assert_eq!(
            wide.convert("2.5").unwrap(),
            TypedValue::Complex128(Complex64::new(2.5, 0.0))
        );

        let narrow = TypeDescriptor::parse("complex64").unwrap();
        assert_eq!(
            narrow.convert("0.5i").unwrap(),
            TypedValue::Complex64(Complex32::new(0.0, 0.5))
        );
    }

    #[test]
    fn test_types_converted_value_displays_back() {
        for (name, raw) in [("int8", "-100"), ("uint32", "4000000000"), ("int16", "32767")] {
            let desc = TypeDescriptor::parse(name).unwrap();
            assert_eq!(desc.convert(raw).unwrap().to_string(), raw.to_string());
        }
    }
}
