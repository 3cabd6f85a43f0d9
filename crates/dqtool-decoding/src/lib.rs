//! Forgiving serde decoding for dqtool
//!
//! Two families of wrappers live here:
//!
//! - [`WithDefault`] takes its value from a [`DefaultSource`] when the key is
//!   missing or `null`, so model fields do not have to be `Option`.
//! - [`LenientString`], [`LenientInt`] and [`LenientDouble`] accept whatever
//!   scalar the server sent and coerce it, falling back to a zero value
//!   instead of failing the whole document.

mod default_value;
mod lenient;

pub use default_value::*;
pub use lenient::{LenientDouble, LenientInt, LenientString};

pub mod prelude {
    pub use crate::default_value::{
        DefaultDoubleZero, DefaultEmptyList, DefaultEmptyMap, DefaultEmptyString, DefaultFalse,
        DefaultInt64Zero, DefaultIntZero, DefaultSource, DefaultTrue, WithDefault,
    };
    pub use crate::lenient::*;
}
