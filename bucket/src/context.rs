//! The capability every storable value implements.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::TypeKey;

/// Shared handle to a stored context.
///
/// Buckets own their groups, not the values: a derived bucket and its source
/// hold clones of the same handles.
pub type ContextRef = Rc<dyn Context>;

mod sealed {
    use std::any::Any;

    use crate::TypeKey;

    /// Exact type of a value, implemented for every sized type and nothing else.
    pub trait TypeIdentity {
        fn identity(&self) -> TypeKey;
    }

    impl<T: Any> TypeIdentity for T {
        fn identity(&self) -> TypeKey {
            TypeKey::of::<T>()
        }
    }
}

use sealed::TypeIdentity;

/// A value that can be grouped in a [`ContextBucket`](crate::ContextBucket).
///
/// There are no required methods. The grouping key comes from the value's
/// concrete type and cannot be overridden by an implementation:
///
/// ```compile_fail
/// use context_bucket::{Context, TypeKey};
///
/// #[derive(Debug)]
/// struct Impostor;
///
/// impl Context for Impostor {
///     fn type_key(&self) -> TypeKey {
///         TypeKey::of::<u32>()
///     }
/// }
/// ```
///
/// Use [`context!`](crate::context!) to implement it, optionally declaring
/// capabilities the type satisfies.
pub trait Context: Any + fmt::Debug + TypeIdentity {
    /// Whether this value satisfies `capability`, usually a `dyn Trait` key.
    fn implements(&self, _capability: TypeKey) -> bool {
        false
    }
}

impl dyn Context {
    /// Exact runtime type of this value.
    #[must_use]
    pub fn type_key(&self) -> TypeKey {
        TypeIdentity::identity(self)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_key().name()
    }

    /// Whether the concrete type of this value is exactly `T`.
    #[must_use]
    pub fn is<T: Context>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Context>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Whether this value is a `key` or implements it as a capability.
    #[must_use]
    pub fn is_a(&self, key: TypeKey) -> bool {
        self.type_key() == key || self.implements(key)
    }
}

/// Implements [`Context`] for one or more types.
///
/// Capabilities are listed after a colon as trait paths; each becomes
/// reachable through [`Context::implements`] with `TypeKey::of::<dyn Trait>()`.
/// The type must actually implement every listed trait.
///
/// ```
/// use context_bucket::{Context, TypeKey, context};
///
/// trait Auditable {}
///
/// #[derive(Debug)]
/// struct Request;
/// impl Auditable for Request {}
///
/// #[derive(Debug)]
/// struct Locale;
///
/// context!(Request: Auditable);
/// context!(Locale);
///
/// assert!(Request.implements(TypeKey::of::<dyn Auditable>()));
/// assert!(!Locale.implements(TypeKey::of::<dyn Auditable>()));
/// ```
///
/// Declaring a capability the type lacks does not compile:
///
/// ```compile_fail
/// use context_bucket::context;
///
/// trait Auditable {}
///
/// #[derive(Debug)]
/// struct Password;
///
/// context!(Password: Auditable);
/// ```
#[macro_export]
macro_rules! context {
    ($ty:ty : $($capability:path),+ $(,)?) => {
        const _: fn() = || {
            $({
                fn assert_implements<T: ?Sized + $capability>() {}
                assert_implements::<$ty>();
            })+
        };

        impl $crate::Context for $ty {
            fn implements(&self, capability: $crate::TypeKey) -> bool {
                [$($crate::TypeKey::of::<dyn $capability>()),+].contains(&capability)
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::Context for $ty {})+
    };
}
