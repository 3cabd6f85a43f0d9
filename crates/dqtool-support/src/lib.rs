//! Small helpers shared across dqtool crates
//!
//! Order-preserving de-duplication, subset checks, forgiving text search and
//! date parsing/formatting with a day-first default format.

mod collections;
mod date;
mod text;

pub use collections::{ContainsAll, DedupExt};
pub use date::{format_date, parse_date, DEFAULT_DATE_FORMAT};
pub use text::contains_match;

pub mod prelude {
    pub use crate::collections::*;
    pub use crate::date::*;
    pub use crate::text::*;
}
