//! Stable identifiers for context types.

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type, used as the grouping key of a bucket.
///
/// Works for concrete types (`TypeKey::of::<Config>()`) and for capability
/// markers spelled as trait objects (`TypeKey::of::<dyn Auditable>()`).
///
/// Equality, ordering, and hashing use the [`TypeId`] only. The type name is
/// carried for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[must_use]
    pub fn id(self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by [`type_name`].
    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    ///
    /// Generic arguments are kept as reported: `app::Wrapper<app::Inner>`
    /// becomes `Wrapper<app::Inner>`, `dyn app::Auditable` becomes
    /// `Auditable`.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        let rest = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        let head_len = rest.find('<').unwrap_or(rest.len());
        let start = rest[..head_len].rfind("::").map_or(0, |idx| idx + 2);
        &rest[start..]
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
