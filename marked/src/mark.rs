//! Marks: the allow-list a marked bucket checks values against.

use std::fmt;
use std::rc::Rc;
use std::slice::Iter;

use context_bucket::{Context, TypeKey};

/// A permitted type, capability, or arbitrary test.
#[derive(Clone)]
pub enum Mark {
    /// Matches values whose exact type is the key, or that implement it as a
    /// capability (see [`Context::implements`]).
    Type(TypeKey),
    /// Matches values accepted by `test`. `name` is used for diagnostics only.
    Predicate {
        name: &'static str,
        test: Rc<dyn Fn(&dyn Context) -> bool>,
    },
}

impl Mark {
    /// Mark for a concrete type or a `dyn Trait` capability.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Mark::Type(TypeKey::of::<T>())
    }

    pub fn predicate(name: &'static str, test: impl Fn(&dyn Context) -> bool + 'static) -> Self {
        Mark::Predicate {
            name,
            test: Rc::new(test),
        }
    }

    #[must_use]
    pub fn matches(&self, context: &dyn Context) -> bool {
        match self {
            Mark::Type(key) => context.is_a(*key),
            Mark::Predicate { test, .. } => test(context),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Mark::Type(key) => key.short_name(),
            Mark::Predicate { name, .. } => *name,
        }
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Type(key) => f.debug_tuple("Type").field(key).finish(),
            Mark::Predicate { name, .. } => f.debug_tuple("Predicate").field(name).finish(),
        }
    }
}

/// Ordered marks of a [`MarkedContextBucket`](crate::MarkedContextBucket).
///
/// Built once, then handed to the bucket; there is no way to change the
/// marks of an existing bucket.
///
/// ```
/// use context_bucket_marked::MarkSet;
///
/// trait Auditable {}
/// #[derive(Debug)]
/// struct Session;
///
/// let marks = MarkSet::new()
///     .with::<Session>()
///     .with::<dyn Auditable>()
///     .with_predicate("never", |_| false);
/// assert_eq!(marks.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarkSet {
    marks: Vec<Mark>,
}

impl MarkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<T: ?Sized + 'static>(self) -> Self {
        self.with_mark(Mark::of::<T>())
    }

    #[must_use]
    pub fn with_predicate(
        self,
        name: &'static str,
        test: impl Fn(&dyn Context) -> bool + 'static,
    ) -> Self {
        self.with_mark(Mark::predicate(name, test))
    }

    #[must_use]
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// First mark, in configuration order, that `context` satisfies.
    #[must_use]
    pub fn matching(&self, context: &dyn Context) -> Option<&Mark> {
        self.marks.iter().find(|mark| mark.matches(context))
    }

    #[must_use]
    pub fn admits(&self, context: &dyn Context) -> bool {
        self.matching(context).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Mark> {
        self.marks.iter()
    }
}

impl FromIterator<Mark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(marks: I) -> Self {
        Self {
            marks: marks.into_iter().collect(),
        }
    }
}

impl From<Vec<Mark>> for MarkSet {
    fn from(marks: Vec<Mark>) -> Self {
        Self { marks }
    }
}

impl<'a> IntoIterator for &'a MarkSet {
    type Item = &'a Mark;
    type IntoIter = Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
