//! Scalars that coerce whatever the input holds.
//!
//! Servers are not always consistent about `"42"` versus `42`. These wrappers
//! take the value in whichever scalar form it arrives, and fall back to the
//! zero value for `null`, a missing key, or a shape they cannot coerce
//! (objects, arrays, unparsable strings).

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Deref;

/// Generates the visitor methods shared by every lenient scalar: absent
/// values and compound shapes are consumed and mapped to the fallback.
macro_rules! lenient_fallbacks {
    ($fallback:expr) => {
        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok($fallback)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok($fallback)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            log::debug!("array where a scalar was expected, using fallback");
            Ok($fallback)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            log::debug!("object where a scalar was expected, using fallback");
            Ok($fallback)
        }
    };
}

/// String that also accepts booleans and numbers.
///
/// Numbers are formatted with Rust's `Display`. Whole floats lose their
/// fraction: `42.0` decodes to `"42"`, not `"42.0"`, so it is
/// indistinguishable from the integer `42`. `0.5` stays `"0.5"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct LenientString(pub String);

/// Integer that also accepts booleans (`1`/`0`), floats (truncated toward
/// zero, saturating) and numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LenientInt(pub i64);

/// Float that also accepts integers and numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Default, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct LenientDouble(pub f64);

struct StringVisitor;

impl<'de> Visitor<'de> for StringVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_owned())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
        Ok(value.to_string())
    }

    lenient_fallbacks!(String::new());
}

struct IntVisitor;

impl<'de> Visitor<'de> for IntVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer, float, boolean or numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        Ok(i64::try_from(value).unwrap_or(i64::MAX))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
        if value.is_nan() {
            return Ok(0);
        }
        // `as` truncates toward zero and saturates at the i64 bounds.
        Ok(value as i64)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<i64, E> {
        Ok(i64::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
        Ok(value.parse().unwrap_or_else(|_| {
            log::debug!("{value:?} is not an integer, using 0");
            0
        }))
    }

    lenient_fallbacks!(0);
}

struct DoubleVisitor;

impl<'de> Visitor<'de> for DoubleVisitor {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        Ok(value.parse().unwrap_or_else(|_| {
            log::debug!("{value:?} is not a number, using 0.0");
            0.0
        }))
    }

    lenient_fallbacks!(0.0);
}

// `deserialize_option` lets a missing key arrive as `visit_none`, so the
// fields work without `#[serde(default)]`.

impl<'de> Deserialize<'de> for LenientString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(StringVisitor).map(Self)
    }
}

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(IntVisitor).map(Self)
    }
}

impl<'de> Deserialize<'de> for LenientDouble {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(DoubleVisitor).map(Self)
    }
}

impl Deref for LenientString {
    type Target = String;

    fn deref(&self) -> &String {
        &self.0
    }
}

impl Deref for LenientInt {
    type Target = i64;

    fn deref(&self) -> &i64 {
        &self.0
    }
}

impl Deref for LenientDouble {
    type Target = f64;

    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<String> for LenientString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for LenientInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<f64> for LenientDouble {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LenientString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
