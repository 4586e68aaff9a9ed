//! Context buckets that only admit values matching a configured set of marks.
//!
//! A [`MarkedContextBucket`] wraps a [`ContextBucket`](context_bucket::ContextBucket)
//! and checks every insertion against its [`MarkSet`]. A mark names a concrete
//! type, a capability trait, or an arbitrary test; a value is stored when any
//! mark matches and is dropped otherwise.
//!
//! ```
//! use context_bucket::context;
//! use context_bucket_marked::{MarkSet, MarkedContextBucket};
//!
//! trait Auditable {}
//!
//! #[derive(Debug)]
//! struct Request(&'static str);
//! impl Auditable for Request {}
//!
//! #[derive(Debug)]
//! struct Password(&'static str);
//!
//! context!(Request: Auditable);
//! context!(Password);
//!
//! let mut audit = MarkedContextBucket::new(MarkSet::new().with::<dyn Auditable>());
//! audit.add(Request("GET /")).add(Password("hunter2"));
//!
//! assert!(audit.has::<Request>());
//! assert!(!audit.has::<Password>());
//! ```

mod error;
mod mark;
mod marked;

pub use error::RejectedContext;
pub use mark::{Mark, MarkSet};
pub use marked::MarkedContextBucket;
