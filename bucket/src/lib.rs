//! Type-keyed grouping of heterogeneous contexts.
//!
//! A [`ContextBucket`] stores any value implementing [`Context`] under the
//! value's exact runtime type. Each group keeps insertion order and groups keep
//! the order in which their type first appeared. No IO, no async.
//!
//! ```
//! use context_bucket::{bucket, context};
//!
//! #[derive(Debug)]
//! struct Locale(&'static str);
//! #[derive(Debug)]
//! struct TraceId(u64);
//! context!(Locale, TraceId);
//!
//! let bucket = bucket![Locale("en"), TraceId(7), Locale("fr")];
//!
//! assert_eq!(bucket.group_count(), 2);
//! assert_eq!(bucket.last::<Locale>().map(|l| l.0), Some("fr"));
//! assert_eq!(bucket.without_all::<Locale>().len(), 1);
//! assert_eq!(bucket.len(), 3);
//! ```

mod bucket;
mod context;
mod key;

pub use bucket::{ContextBucket, Groups};
pub use context::{Context, ContextRef};
pub use key::TypeKey;
