//! Fields that decode to a fixed default when absent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Supplies the value a [`WithDefault`] field takes when the input has none.
pub trait DefaultSource {
    type Value;

    fn default_value() -> Self::Value;
}

/// Value that falls back to `S::default_value()` when the key is missing or
/// explicitly `null`.
///
/// ```
/// use dqtool_decoding::{DefaultEmptyString, DefaultTrue};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Profile {
///     nick_name: DefaultEmptyString,
///     visible: DefaultTrue,
/// }
///
/// let profile: Profile = serde_json::from_str(r#"{"nick_name": null}"#).unwrap();
/// assert_eq!(*profile.nick_name, "");
/// assert!(*profile.visible);
/// ```
///
/// A present value of the wrong type is still an error; use the lenient
/// wrappers for coercion.
pub struct WithDefault<S: DefaultSource> {
    value: S::Value,
    source: PhantomData<fn() -> S>,
}

impl<S: DefaultSource> WithDefault<S> {
    pub fn new(value: S::Value) -> Self {
        Self {
            value,
            source: PhantomData,
        }
    }

    pub fn into_inner(self) -> S::Value {
        self.value
    }
}

impl<S: DefaultSource> Default for WithDefault<S> {
    fn default() -> Self {
        Self::new(S::default_value())
    }
}

impl<S: DefaultSource> Deref for WithDefault<S> {
    type Target = S::Value;

    fn deref(&self) -> &S::Value {
        &self.value
    }
}

impl<S: DefaultSource> DerefMut for WithDefault<S> {
    fn deref_mut(&mut self) -> &mut S::Value {
        &mut self.value
    }
}

impl<S> Clone for WithDefault<S>
where
    S: DefaultSource,
    S::Value: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<S> fmt::Debug for WithDefault<S>
where
    S: DefaultSource,
    S::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<S> PartialEq for WithDefault<S>
where
    S: DefaultSource,
    S::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<S> Eq for WithDefault<S>
where
    S: DefaultSource,
    S::Value: Eq,
{
}

impl<S> Hash for WithDefault<S>
where
    S: DefaultSource,
    S::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<'de, S> Deserialize<'de> for WithDefault<S>
where
    S: DefaultSource,
    S::Value: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Missing keys reach us through `deserialize_option` as well, so no
        // `#[serde(default)]` is needed on the field.
        let value = Option::<S::Value>::deserialize(deserializer)?;
        Ok(Self::new(value.unwrap_or_else(S::default_value)))
    }
}

impl<S> Serialize for WithDefault<S>
where
    S: DefaultSource,
    S::Value: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// Ready-made [`DefaultSource`]s for common field types.
pub mod sources {
    use super::*;

    pub enum True {}

    impl DefaultSource for True {
        type Value = bool;

        fn default_value() -> bool {
            true
        }
    }

    pub enum False {}

    impl DefaultSource for False {
        type Value = bool;

        fn default_value() -> bool {
            false
        }
    }

    pub enum IntZero {}

    impl DefaultSource for IntZero {
        type Value = i64;

        fn default_value() -> i64 {
            0
        }
    }

    /// Same as [`IntZero`]; kept separate for models that distinguish
    /// platform-sized and 64-bit integers.
    pub enum Int64Zero {}

    impl DefaultSource for Int64Zero {
        type Value = i64;

        fn default_value() -> i64 {
            0
        }
    }

    pub enum DoubleZero {}

    impl DefaultSource for DoubleZero {
        type Value = f64;

        fn default_value() -> f64 {
            0.0
        }
    }

    pub enum EmptyString {}

    impl DefaultSource for EmptyString {
        type Value = String;

        fn default_value() -> String {
            String::new()
        }
    }

    pub struct EmptyList<T>(PhantomData<fn() -> T>);

    impl<T> DefaultSource for EmptyList<T> {
        type Value = Vec<T>;

        fn default_value() -> Vec<T> {
            Vec::new()
        }
    }

    /// Empty string-keyed map, the shape of a JSON object.
    pub struct EmptyMap<T>(PhantomData<fn() -> T>);

    impl<T> DefaultSource for EmptyMap<T> {
        type Value = HashMap<String, T>;

        fn default_value() -> HashMap<String, T> {
            HashMap::new()
        }
    }
}

pub type DefaultTrue = WithDefault<sources::True>;
pub type DefaultFalse = WithDefault<sources::False>;
pub type DefaultIntZero = WithDefault<sources::IntZero>;
pub type DefaultInt64Zero = WithDefault<sources::Int64Zero>;
pub type DefaultDoubleZero = WithDefault<sources::DoubleZero>;
pub type DefaultEmptyString = WithDefault<sources::EmptyString>;
pub type DefaultEmptyList<T> = WithDefault<sources::EmptyList<T>>;
pub type DefaultEmptyMap<T> = WithDefault<sources::EmptyMap<T>>;
