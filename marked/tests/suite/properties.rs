//! Property tests for marked insertion.

use std::rc::Rc;

use context_bucket::{ContextBucket, ContextRef};
use context_bucket_marked::{MarkSet, MarkedContextBucket};
use proptest::prelude::*;

use crate::common::{A, B, C, Capable, shared};

fn make(kind: u8) -> ContextRef {
    match kind % 3 {
        0 => shared(A("a")),
        1 => shared(B("b")),
        _ => shared(C("c")),
    }
}

fn arb_contexts() -> impl Strategy<Value = Vec<ContextRef>> {
    prop::collection::vec(0u8..3, 0..40)
        .prop_map(|kinds| kinds.into_iter().map(make).collect())
}

/// Marks built from three flags: `A`, `B`, and the `Capable` capability.
fn marks(with_a: bool, with_b: bool, with_capable: bool) -> MarkSet {
    let mut marks = MarkSet::new();
    if with_a {
        marks = marks.with::<A>();
    }
    if with_b {
        marks = marks.with::<B>();
    }
    if with_capable {
        marks = marks.with::<dyn Capable>();
    }
    marks
}

proptest! {
    /// A marked bucket stores exactly what a plain bucket filtered by the marks would.
    #[test]
    fn prop_marked_equals_filtered_plain(
        contexts in arb_contexts(),
        with_a in any::<bool>(),
        with_b in any::<bool>(),
        with_capable in any::<bool>(),
    ) {
        let marks = marks(with_a, with_b, with_capable);
        let marked = MarkedContextBucket::instance(marks.clone(), contexts.clone());
        let plain = ContextBucket::instance(contexts).filter(|context| marks.admits(context));

        let marked_flat = marked.to_flat_vec();
        let plain_flat = plain.to_flat_vec();
        prop_assert_eq!(marked_flat.len(), plain_flat.len());
        for (left, right) in marked_flat.iter().zip(&plain_flat) {
            prop_assert!(Rc::ptr_eq(left, right));
        }
    }

    /// Every stored value satisfies some mark, and no value is stored twice.
    #[test]
    fn prop_stored_values_are_admitted_once(
        contexts in arb_contexts(),
        with_a in any::<bool>(),
        with_capable in any::<bool>(),
    ) {
        let marks = marks(with_a, false, with_capable);
        let admitted = contexts.iter().filter(|context| marks.admits(&***context)).count();
        let bucket = MarkedContextBucket::instance(marks, contexts);

        prop_assert_eq!(bucket.len(), admitted);
        for context in bucket.iter() {
            prop_assert!(bucket.admits(&**context));
        }
        prop_assert!(!bucket.has::<B>());
    }
}
