//! Contexts grouped by exact runtime type.
//!
//! Groups are append-only and keep insertion order. Keys keep the order in which
//! each type was first added. Derived buckets (`without_all`, `filter`) copy the
//! group structure and share the stored values with their source.

use std::fmt;
use std::iter::Flatten;
use std::rc::Rc;

use indexmap::IndexMap;
use indexmap::map::Values;
use tracing::trace;

use crate::{Context, ContextRef, TypeKey};

/// Groups of a bucket, keyed by exact type, in first-insertion order.
pub type Groups = IndexMap<TypeKey, Vec<ContextRef>>;

/// A multi-map from context type to the contexts of that type.
///
/// # Invariants
///
/// - A value is stored under its own [`Context::type_key`], never under a
///   capability it implements.
/// - Groups are never empty: a key is present iff at least one value of that
///   type was added.
///
/// Absence is never an error: lookups on missing types return `None` or an
/// empty slice.
#[derive(Clone, Default)]
pub struct ContextBucket {
    groups: Groups,
}

impl ContextBucket {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bucket from `contexts`, adding them in iteration order.
    #[must_use]
    pub fn instance(contexts: impl IntoIterator<Item = ContextRef>) -> Self {
        let mut bucket = Self::new();
        bucket.extend(contexts);
        bucket
    }

    /// Append `context` to the group of its exact type.
    pub fn add(&mut self, context: impl Context) -> &mut Self {
        self.add_shared(Rc::new(context))
    }

    /// Append an already shared context to the group of its exact type.
    pub fn add_shared(&mut self, context: ContextRef) -> &mut Self {
        self.groups
            .entry(context.type_key())
            .or_default()
            .push(context);
        self
    }

    /// Most recently added context of type `T`.
    #[must_use]
    pub fn last<T: Context>(&self) -> Option<&T> {
        self.last_of(TypeKey::of::<T>())?.downcast_ref::<T>()
    }

    #[must_use]
    pub fn last_of(&self, key: TypeKey) -> Option<&ContextRef> {
        self.groups.get(&key)?.last()
    }

    /// Every group, keyed by type. The borrow keeps the bucket read-only.
    #[must_use]
    pub fn all(&self) -> &Groups {
        &self.groups
    }

    /// Contexts of type `T` in insertion order.
    pub fn group<T: Context>(&self) -> impl Iterator<Item = &T> {
        self.group_of(TypeKey::of::<T>())
            .iter()
            .filter_map(|context| context.downcast_ref::<T>())
    }

    /// Contexts stored under `key`, or an empty slice.
    #[must_use]
    pub fn group_of(&self, key: TypeKey) -> &[ContextRef] {
        self.groups
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has<T: Context>(&self) -> bool {
        self.has_key(TypeKey::of::<T>())
    }

    #[must_use]
    pub fn has_key(&self, key: TypeKey) -> bool {
        self.last_of(key).is_some()
    }

    /// Copy of this bucket without the group of type `T`.
    #[must_use]
    pub fn without_all<T: Context>(&self) -> Self {
        self.without_key(TypeKey::of::<T>())
    }

    /// Copy of this bucket without the group under `key`.
    ///
    /// The receiver is left untouched. Remaining groups keep their order.
    #[must_use]
    pub fn without_key(&self, key: TypeKey) -> Self {
        if let Some(removed) = self.groups.get(&key) {
            trace!(
                context = key.name(),
                removed = removed.len(),
                "dropping context group from derived bucket"
            );
        }
        let groups = self
            .groups
            .iter()
            .filter(|(group_key, _)| **group_key != key)
            .map(|(group_key, group)| (*group_key, group.clone()))
            .collect();
        Self { groups }
    }

    /// Every context, group by group, each group in insertion order.
    pub fn iter(&self) -> Flatten<Values<'_, TypeKey, Vec<ContextRef>>> {
        self.groups.values().flatten()
    }

    /// Flattened copy of every handle. Empty for an empty bucket.
    #[must_use]
    pub fn to_flat_vec(&self) -> Vec<ContextRef> {
        self.iter().cloned().collect()
    }

    /// New bucket holding the contexts that satisfy `predicate`.
    ///
    /// The predicate sees contexts in flattened order; survivors are regrouped
    /// by exact type exactly as [`add`](Self::add) would.
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(&dyn Context) -> bool) -> Self {
        let mut filtered = Self::new();
        for context in self {
            if predicate(&**context) {
                filtered.add_shared(Rc::clone(context));
            }
        }
        filtered
    }

    /// Total number of stored contexts across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.groups.keys().copied()
    }
}

impl fmt::Debug for ContextBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.groups.iter()).finish()
    }
}

impl Extend<ContextRef> for ContextBucket {
    fn extend<I: IntoIterator<Item = ContextRef>>(&mut self, contexts: I) {
        for context in contexts {
            self.add_shared(context);
        }
    }
}

impl FromIterator<ContextRef> for ContextBucket {
    fn from_iter<I: IntoIterator<Item = ContextRef>>(contexts: I) -> Self {
        Self::instance(contexts)
    }
}

impl<'a> IntoIterator for &'a ContextBucket {
    type Item = &'a ContextRef;
    type IntoIter = Flatten<Values<'a, TypeKey, Vec<ContextRef>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build a [`ContextBucket`] from a list of contexts, in order.
///
/// ```
/// use context_bucket::{bucket, context};
///
/// #[derive(Debug)]
/// struct Tenant(&'static str);
/// context!(Tenant);
///
/// let bucket = bucket![Tenant("acme"), Tenant("globex")];
/// assert_eq!(bucket.last::<Tenant>().map(|t| t.0), Some("globex"));
/// ```
#[macro_export]
macro_rules! bucket {
    ($($context:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut bucket = $crate::ContextBucket::new();
        $(bucket.add($context);)*
        bucket
    }};
}
