//! A context bucket with a filtered insertion path.

use std::ops::Deref;
use std::rc::Rc;

use context_bucket::{Context, ContextBucket, ContextRef, TypeKey};
use tracing::trace;

use crate::{MarkSet, RejectedContext};

/// A [`ContextBucket`] that only stores values matching one of its marks.
///
/// Reads are delegated to the wrapped bucket through `Deref`. There is no
/// `DerefMut`: the only way in is [`add`](Self::add) and friends, which check
/// the marks first.
///
/// # Invariants
///
/// - Every stored value matches at least one mark.
/// - A value matching several marks is stored once.
/// - The mark set never changes after construction.
#[derive(Clone, Debug)]
pub struct MarkedContextBucket {
    marks: MarkSet,
    bucket: ContextBucket,
}

impl MarkedContextBucket {
    #[must_use]
    pub fn new(marks: MarkSet) -> Self {
        Self {
            marks,
            bucket: ContextBucket::new(),
        }
    }

    /// Build a bucket with `marks`, then add `contexts` in iteration order.
    #[must_use]
    pub fn instance(marks: MarkSet, contexts: impl IntoIterator<Item = ContextRef>) -> Self {
        let mut bucket = Self::new(marks);
        bucket.extend(contexts);
        bucket
    }

    /// Add `context` if any mark matches it; otherwise drop it.
    pub fn add(&mut self, context: impl Context) -> &mut Self {
        self.add_shared(Rc::new(context))
    }

    pub fn add_shared(&mut self, context: ContextRef) -> &mut Self {
        if let Err(rejected) = self.admit(context) {
            trace!(
                context = rejected.type_name(),
                marks = self.marks.len(),
                "context matched no mark; dropped"
            );
        }
        self
    }

    /// Like [`add_shared`](Self::add_shared), but hands a rejected value back.
    pub fn try_add(&mut self, context: ContextRef) -> Result<&mut Self, RejectedContext> {
        self.admit(context)?;
        Ok(self)
    }

    /// Whether `context` would be stored by [`add`](Self::add).
    #[must_use]
    pub fn admits(&self, context: &dyn Context) -> bool {
        self.marks.admits(context)
    }

    #[must_use]
    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    #[must_use]
    pub fn bucket(&self) -> &ContextBucket {
        &self.bucket
    }

    #[must_use]
    pub fn into_bucket(self) -> ContextBucket {
        self.bucket
    }

    /// Copy of this bucket, same marks, without the group of type `T`.
    #[must_use]
    pub fn without_all<T: Context>(&self) -> Self {
        self.without_key(TypeKey::of::<T>())
    }

    #[must_use]
    pub fn without_key(&self, key: TypeKey) -> Self {
        Self {
            marks: self.marks.clone(),
            bucket: self.bucket.without_key(key),
        }
    }

    fn admit(&mut self, context: ContextRef) -> Result<(), RejectedContext> {
        if !self.marks.admits(&*context) {
            return Err(RejectedContext::new(context, self.marks.len()));
        }
        self.bucket.add_shared(context);
        Ok(())
    }
}

impl Deref for MarkedContextBucket {
    type Target = ContextBucket;

    fn deref(&self) -> &Self::Target {
        &self.bucket
    }
}

impl Extend<ContextRef> for MarkedContextBucket {
    fn extend<I: IntoIterator<Item = ContextRef>>(&mut self, contexts: I) {
        for context in contexts {
            self.add_shared(context);
        }
    }
}

impl From<MarkedContextBucket> for ContextBucket {
    fn from(marked: MarkedContextBucket) -> Self {
        marked.into_bucket()
    }
}

/// Build a [`MarkedContextBucket`] from a mark set and a list of contexts.
///
/// ```
/// use context_bucket::context;
/// use context_bucket_marked::{MarkSet, marked};
///
/// #[derive(Debug)]
/// struct Tenant(&'static str);
/// #[derive(Debug)]
/// struct Secret(&'static str);
/// context!(Tenant, Secret);
///
/// let bucket = marked!(MarkSet::new().with::<Tenant>(); Tenant("acme"), Secret("hunter2"));
/// assert!(bucket.has::<Tenant>());
/// assert!(!bucket.has::<Secret>());
/// ```
#[macro_export]
macro_rules! marked {
    ($marks:expr $(; $($context:expr),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut bucket = $crate::MarkedContextBucket::new($marks);
        $($(bucket.add($context);)*)?
        bucket
    }};
}
