use crate::{Error, Result, Value, consume_while, truncate_long};
use anyhow::Context;
use atoi::FromRadix10SignedChecked;
use fast_float::parse_partial;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::{any, borrow::Cow, fmt::Display};
use time::{PrimitiveDateTime, format_description::parse_borrowed};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`]
/// read from a cursor.
///
/// # Parsing contract
/// - `parse` delegates to `extract` then verifies the input is exhausted.
/// - `extract` MUST update the input slice only on success.
/// - Text values ([`Value::Varchar`]) are parsed when the target type is not
///   textual, SQLite for example stores dates and times as text.
///
/// # Examples
/// ```rust
/// use ladle_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Typed null variant for this type.
    fn as_empty_value() -> Value;
    /// Owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    ///
    /// Accepts the canonical variant and, where lossless, neighbouring ones
    /// (integer widths are range checked). Fails with a descriptive error
    /// otherwise.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
    /// Parse a full string into `Self`, failing on trailing input.
    fn parse(input: impl AsRef<str>) -> Result<Self>
    where
        Self: Sized,
    {
        let mut value = input.as_ref();
        let result = Self::extract(&mut value)?;
        if !value.is_empty() {
            return Err(Error::msg(format!(
                "Value `{}` parsed correctly as {} but it did not consume all the input (remaining: `{}`)",
                truncate_long!(input.as_ref()),
                any::type_name::<Self>(),
                truncate_long!(value),
            )));
        }
        Ok(result)
    }
    /// Parse a prefix of `value`, advancing it past the consumed part on success.
    fn extract(value: &mut &str) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::msg(format!(
            "Cannot parse '{value}' as {}",
            any::type_name::<Self>()
        )))
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn open_quote<'s>(value: &mut &'s str) -> &'s str {
    if value.starts_with(['"', '\'']) {
        let quote = &value[..1];
        *value = &value[1..];
        quote
    } else {
        ""
    }
}

fn close_quote(value: &mut &str, quote: &str) -> bool {
    if value.starts_with(quote) {
        *value = &value[quote.len()..];
        true
    } else {
        false
    }
}

fn narrow<S, T>(value: S) -> Result<T>
where
    S: Display + Copy,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| {
        Error::msg(format!(
            "Value {value} is out of range for {}",
            any::type_name::<T>()
        ))
    })
}

fn integral_decimal(value: Decimal) -> Result<i128> {
    let error = || Error::msg(format!("Value {value}: Decimal is not an integer"));
    if !value.is_integer() {
        return Err(error());
    }
    value.to_i128().ok_or_else(error)
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Int8(Some(v)) => narrow(v),
                    Value::Int16(Some(v)) => narrow(v),
                    Value::Int32(Some(v)) => narrow(v),
                    Value::Int64(Some(v)) => narrow(v),
                    Value::UInt8(Some(v)) => narrow(v),
                    Value::UInt16(Some(v)) => narrow(v),
                    Value::UInt32(Some(v)) => narrow(v),
                    Value::UInt64(Some(v)) => narrow(v),
                    Value::Decimal(Some(v)) => narrow(integral_decimal(v)?),
                    Value::Varchar(Some(ref v)) => Self::parse(v),
                    _ => Err(Error::msg(format!(
                        "Cannot convert {value:?} to {}",
                        any::type_name::<Self>(),
                    ))),
                }
            }
            fn extract(input: &mut &str) -> Result<Self> {
                let mut value = *input;
                let context = || {
                    format!(
                        "Cannot extract {} from `{}`",
                        any::type_name::<Self>(),
                        truncate_long!(input)
                    )
                };
                let quote = open_quote(&mut value);
                let (number, len) = i128::from_radix_10_signed_checked(value.as_bytes());
                if !value[..len].bytes().any(|b| b.is_ascii_digit()) {
                    return Err(Error::msg(context()));
                }
                let Some(number) = number else {
                    return Err(Error::msg(format!(
                        "Value `{}` is out of range for {}",
                        truncate_long!(input),
                        any::type_name::<Self>(),
                    )));
                };
                value = &value[len..];
                if !close_quote(&mut value, quote) {
                    return Err(Error::msg(context()));
                }
                let result = narrow(number)?;
                *input = value;
                Ok(result)
            }
        }
    };
}
impl_as_value!(i8, Value::Int8);
impl_as_value!(i16, Value::Int16);
impl_as_value!(i32, Value::Int32);
impl_as_value!(i64, Value::Int64);
impl_as_value!(u8, Value::UInt8);
impl_as_value!(u16, Value::UInt16);
impl_as_value!(u32, Value::UInt32);
impl_as_value!(u64, Value::UInt64);

macro_rules! impl_as_value {
    ($source:ty, $destination:path, $extract:expr $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    #[allow(unreachable_patterns)]
                    Value::Varchar(Some(ref v)) => <Self as AsValue>::parse(v),
                    _ => Err(Error::msg(format!(
                        "Cannot convert {value:?} to {}",
                        any::type_name::<Self>(),
                    ))),
                }
            }
            fn extract(value: &mut &str) -> Result<Self> {
                $extract(value)
            }
        }
    };
}
impl_as_value!(
    bool,
    Value::Boolean,
    |input: &mut &str| {
        let mut value = *input;
        let result = consume_while(&mut value, |v| v.is_alphanumeric() || *v == '_');
        let result = match result {
            x if x.eq_ignore_ascii_case("true") || x.eq_ignore_ascii_case("t") || x.eq("1") => true,
            x if x.eq_ignore_ascii_case("false") || x.eq_ignore_ascii_case("f") || x.eq("0") => false,
            _ => return Err(Error::msg(format!("Cannot parse boolean from '{input}'"))),
        };
        *input = value;
        Ok(result)
    },
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int16(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::UInt16(Some(v)) => Ok(v != 0),
    Value::UInt32(Some(v)) => Ok(v != 0),
    Value::UInt64(Some(v)) => Ok(v != 0),
);

macro_rules! extract_float {
    ($input:expr) => {{
        let mut value = *$input;
        let context = || {
            format!(
                "Cannot extract a floating point value from `{}`",
                truncate_long!($input)
            )
        };
        let quote = open_quote(&mut value);
        let (num, tail) = parse_partial(value).with_context(context)?;
        value = &value[tail..];
        if !close_quote(&mut value, quote) {
            return Err(Error::msg(context()));
        }
        *$input = value;
        Ok(num)
    }};
}
impl_as_value!(
    f32,
    Value::Float32,
    |input: &mut &str| { extract_float!(input) },
    Value::Float64(Some(v)) => Ok(v as _),
    Value::Int8(Some(v)) => Ok(v as _),
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt32(Some(v)) => Ok(v as _),
    Value::UInt64(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v)) => v
        .to_f32()
        .ok_or_else(|| Error::msg(format!("Cannot convert the Decimal value `{v}` to f32"))),
);
impl_as_value!(
    f64,
    Value::Float64,
    |input: &mut &str| { extract_float!(input) },
    Value::Float32(Some(v)) => Ok(v as _),
    Value::Int8(Some(v)) => Ok(v as _),
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt32(Some(v)) => Ok(v as _),
    Value::UInt64(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v)) => v
        .to_f64()
        .ok_or_else(|| Error::msg(format!("Cannot convert the Decimal value `{v}` to f64"))),
);

impl_as_value!(String, Value::Varchar, |input: &mut &str| {
    let mut value = *input;
    let mut chars = value.chars().peekable();
    let mut pos = 0;
    let delimiter = match chars.peek().copied() {
        Some(c @ ('\'' | '"')) => {
            chars.next();
            value = &value[1..];
            Some(c)
        }
        _ => None,
    };
    let mut result = String::with_capacity(value.len());
    while let Some(c) = chars.next() {
        if Some(c) == delimiter {
            // A doubled delimiter is an escaped one
            if chars.peek().copied() == delimiter {
                result.push_str(&value[..pos + c.len_utf8()]);
                value = &value[(pos + 2 * c.len_utf8())..];
                pos = 0;
                chars.next();
                continue;
            }
            result.push_str(&value[..pos]);
            value = &value[(pos + c.len_utf8())..];
            *input = value;
            return Ok(result);
        }
        pos += c.len_utf8();
    }
    if delimiter.is_some() {
        return Err(Error::msg(format!(
            "Unterminated string `{}`",
            truncate_long!(input)
        )));
    }
    result.push_str(&value[..pos]);
    *input = &value[pos..];
    Ok(result)
});

fn extract_hex(input: &mut &str) -> Result<Vec<u8>> {
    let mut value = *input;
    if value.len() >= 2 && value[..2].eq_ignore_ascii_case("\\x") {
        value = &value[2..];
    }
    let hex = consume_while(&mut value, char::is_ascii_hexdigit);
    let result = hex::decode(hex).with_context(|| {
        format!("While decoding `{}` as hexadecimal bytes", truncate_long!(input))
    })?;
    *input = value;
    Ok(result)
}
impl_as_value!(
    Box<[u8]>,
    Value::Blob,
    |input: &mut &str| { extract_hex(input).map(Into::into) },
);
impl_as_value!(
    Vec<u8>,
    Value::Blob,
    |input: &mut &str| { extract_hex(input) },
);

impl_as_value!(
    Uuid,
    Value::Uuid,
    |input: &mut &str| {
        let mut value = *input;
        let context = || format!("Cannot extract a uuid value from `{}`", truncate_long!(input));
        let quote = open_quote(&mut value);
        let Some(text) = value.get(..36) else {
            return Err(Error::msg(context()));
        };
        let uuid = Uuid::parse_str(text).with_context(context)?;
        value = &value[36..];
        if !close_quote(&mut value, quote) {
            return Err(Error::msg(context()));
        }
        *input = value;
        Ok(uuid)
    },
    Value::Blob(Some(v)) => Uuid::from_slice(&v).context("Cannot convert a blob to a uuid"),
);

macro_rules! parse_time {
    ($value: ident, $($formats:literal),+ $(,)?) => {
        'value: {
            for format in [$($formats,)+] {
                let format = parse_borrowed::<2>(format)?;
                let mut parsed = time::parsing::Parsed::new();
                let remaining = parsed.parse_items($value.as_bytes(), &format);
                if let Ok(remaining) = remaining {
                    let result = parsed.try_into()?;
                    *$value = &$value[($value.len() - remaining.len())..];
                    break 'value Ok(result);
                }
            }
            Err(Error::msg(format!(
                "Cannot extract from `{}` as {}",
                $value,
                any::type_name::<Self>()
            )))
        }
    }
}

impl_as_value!(time::Date, Value::Date, |v: &mut &str| {
    let result: time::Date = parse_time!(v, "[year]-[month]-[day]")?;
    Ok(result)
});

impl_as_value!(time::Time, Value::Time, |v: &mut &str| {
    let result: time::Time = parse_time!(
        v,
        "[hour]:[minute]:[second].[subsecond]",
        "[hour]:[minute]:[second]",
        "[hour]:[minute]",
    )?;
    Ok(result)
});

impl_as_value!(time::PrimitiveDateTime, Value::Timestamp, |v: &mut &str| {
    let result: time::PrimitiveDateTime = parse_time!(
        v,
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]",
        "[year]-[month]-[day]T[hour]:[minute]:[second]",
        "[year]-[month]-[day]T[hour]:[minute]",
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]",
        "[year]-[month]-[day] [hour]:[minute]:[second]",
        "[year]-[month]-[day] [hour]:[minute]",
    )?;
    Ok(result)
});

impl_as_value!(
    time::OffsetDateTime,
    Value::TimestampWithTimezone,
    |v: &mut &str| {
        let result: time::OffsetDateTime = parse_time!(
            v,
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]",
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]",
        )
        .or_else(|_: Error| <PrimitiveDateTime as AsValue>::extract(v).map(|v| v.assume_utc()))?;
        Ok(result)
    },
    Value::Timestamp(Some(timestamp)) => Ok(timestamp.assume_utc()),
);

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v)) => Ok(v),
            Value::Int8(Some(v)) => Ok(Decimal::from(v)),
            Value::Int16(Some(v)) => Ok(Decimal::from(v)),
            Value::Int32(Some(v)) => Ok(Decimal::from(v)),
            Value::Int64(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt8(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt16(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt32(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt64(Some(v)) => Ok(Decimal::from(v)),
            Value::Float32(Some(v)) => Decimal::from_f32(v)
                .ok_or_else(|| Error::msg(format!("Cannot convert {value:?} to Decimal"))),
            Value::Float64(Some(v)) => Decimal::from_f64(v)
                .ok_or_else(|| Error::msg(format!("Cannot convert {value:?} to Decimal"))),
            Value::Varchar(Some(ref v)) => Self::parse(v),
            _ => Err(Error::msg(format!("Cannot convert {value:?} to Decimal"))),
        }
    }
    fn extract(input: &mut &str) -> Result<Self> {
        let mut value = *input;
        let (n, len) = i128::from_radix_10_signed_checked(value.as_bytes());
        let (Some(mut n), true) = (n, value[..len].bytes().any(|b| b.is_ascii_digit())) else {
            return Err(Error::msg(format!(
                "Cannot extract a Decimal from `{}`",
                truncate_long!(input)
            )));
        };
        let negative = value.starts_with('-');
        value = &value[len..];
        let mut scale = 0;
        if let Some(rest) = value.strip_prefix('.') {
            let digits = consume_while(&mut &rest[..], char::is_ascii_digit);
            for digit in digits.bytes() {
                let digit = (digit - b'0') as i128;
                n = n
                    .checked_mul(10)
                    .and_then(|n| if negative { n.checked_sub(digit) } else { n.checked_add(digit) })
                    .ok_or_else(|| Error::msg(format!("Decimal `{}` overflows", truncate_long!(input))))?;
            }
            scale = digits.len() as u32;
            value = &rest[digits.len()..];
        }
        let result = Decimal::try_from_i128_with_scale(n, scale)
            .map_err(|_| Error::msg(format!("Could not create a Decimal from {n}")))?;
        *input = value;
        Ok(result)
    }
}

impl<'a> AsValue for Cow<'a, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        String::try_from_value(value).map(Into::into)
    }
    fn extract(input: &mut &str) -> Result<Self> {
        <String as AsValue>::extract(input).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
    fn extract(input: &mut &str) -> Result<Self> {
        let mut value = *input;
        let result = consume_while(&mut value, |v| v.is_alphanumeric() || *v == '_');
        if result.eq_ignore_ascii_case("null") {
            *input = value;
            return Ok(None);
        };
        T::extract(input).map(Some)
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(Self::new(<T as AsValue>::try_from_value(value)?))
    }
    fn extract(value: &mut &str) -> Result<Self> {
        T::extract(value).map(Self::new)
    }
}
