use context_bucket::ContextRef;
use thiserror::Error;

/// A context that matched none of a bucket's marks.
///
/// Only returned by [`MarkedContextBucket::try_add`](crate::MarkedContextBucket::try_add);
/// the plain insertion path drops such values silently.
#[derive(Debug, Error)]
#[error("context `{type_name}` matches none of the {marks} configured marks")]
pub struct RejectedContext {
    type_name: &'static str,
    marks: usize,
    context: ContextRef,
}

impl RejectedContext {
    pub(crate) fn new(context: ContextRef, marks: usize) -> Self {
        Self {
            type_name: context.type_name(),
            marks,
            context,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Hand the rejected value back to the caller.
    #[must_use]
    pub fn into_context(self) -> ContextRef {
        self.context
    }
}
