//! Behavioral scenarios for `ContextBucket`.

use std::rc::Rc;

use context_bucket::{ContextBucket, TypeKey, bucket};

use crate::common::{AnotherMockContext, MockContext, contains, shared, three_contexts};

#[test]
fn instance_creates_bucket() {
    let context = shared(MockContext::new("test"));
    let bucket = ContextBucket::instance([Rc::clone(&context)]);

    let last = bucket.last_of(TypeKey::of::<MockContext>());
    assert!(last.is_some_and(|handle| Rc::ptr_eq(handle, &context)));
}

#[test]
fn constructor_adds_contexts() {
    let bucket = bucket![MockContext::new("first"), MockContext::new("second")];
    assert_eq!(
        bucket.last::<MockContext>(),
        Some(&MockContext::new("second"))
    );
}

#[test]
fn add_appends_to_existing_bucket() {
    let mut bucket = ContextBucket::new();
    bucket.add(MockContext::new("first"));
    assert_eq!(
        bucket.last::<MockContext>().map(|c| c.name.as_str()),
        Some("first")
    );

    bucket.add(MockContext::new("second"));
    assert_eq!(
        bucket.last::<MockContext>().map(|c| c.name.as_str()),
        Some("second")
    );
}

#[test]
fn add_returns_same_bucket() {
    let mut bucket = ContextBucket::new();
    let bucket_ptr: *const ContextBucket = &bucket;
    let returned: *const ContextBucket = bucket.add(MockContext::new("test"));
    assert_eq!(bucket_ptr, returned);
}

#[test]
fn all_returns_every_group() {
    let (bucket, [first, second, third]) = three_contexts();
    let all = bucket.all();

    assert_eq!(all.len(), 2);
    let mocks = &all[&TypeKey::of::<MockContext>()];
    let others = &all[&TypeKey::of::<AnotherMockContext>()];
    assert!(contains(mocks, &first));
    assert!(contains(mocks, &second));
    assert!(contains(others, &third));
}

#[test]
fn group_returns_all_of_specific_type() {
    let (bucket, [first, second, third]) = three_contexts();

    let mocks = bucket.group_of(TypeKey::of::<MockContext>());
    let others = bucket.group_of(TypeKey::of::<AnotherMockContext>());

    assert_eq!(mocks.len(), 2);
    assert_eq!(others.len(), 1);
    assert!(Rc::ptr_eq(&mocks[0], &first));
    assert!(Rc::ptr_eq(&mocks[1], &second));
    assert!(Rc::ptr_eq(&others[0], &third));
}

#[test]
fn group_of_missing_type_is_empty() {
    let bucket = ContextBucket::new();
    assert!(bucket.group_of(TypeKey::of::<MockContext>()).is_empty());
}

#[test]
fn has_true_when_context_exists() {
    let bucket = bucket![MockContext::new("test")];
    assert!(bucket.has::<MockContext>());
}

#[test]
fn has_false_when_context_missing() {
    let bucket = ContextBucket::new();
    assert!(!bucket.has::<MockContext>());
}

#[test]
fn without_all_returns_new_bucket_without_type() {
    let (original, _) = three_contexts();
    let derived = original.without_all::<MockContext>();

    assert!(original.has::<MockContext>());
    assert!(original.has::<AnotherMockContext>());

    assert!(!derived.has::<MockContext>());
    assert!(derived.has::<AnotherMockContext>());
}

#[test]
fn to_flat_vec_returns_every_context() {
    let (bucket, [first, second, third]) = three_contexts();
    let flat = bucket.to_flat_vec();

    assert_eq!(flat.len(), 3);
    assert!(contains(&flat, &first));
    assert!(contains(&flat, &second));
    assert!(contains(&flat, &third));
}

#[test]
fn filter_returns_new_bucket_with_matching_contexts() {
    let (bucket, _) = three_contexts();
    let filtered = bucket.filter(|context| context.is::<MockContext>());
    let flat = filtered.to_flat_vec();

    assert_eq!(flat.len(), 2);
    assert!(flat.iter().all(|context| context.is::<MockContext>()));
    assert!(!filtered.has::<AnotherMockContext>());
}

#[test]
fn filter_with_empty_result() {
    let bucket = bucket![MockContext::new("first"), MockContext::new("second")];
    let filtered = bucket.filter(|_| false);

    assert!(filtered.to_flat_vec().is_empty());
    assert!(filtered.last::<MockContext>().is_none());
}

#[test]
fn adding_multiple_contexts_of_same_type() {
    let mut bucket = ContextBucket::new();
    bucket.extend([
        shared(MockContext::new("first")),
        shared(MockContext::new("second")),
        shared(MockContext::new("third")),
    ]);

    assert_eq!(bucket.group::<MockContext>().count(), 3);
    assert_eq!(
        bucket.last::<MockContext>().map(|c| c.name.as_str()),
        Some("third")
    );
}

#[test]
fn multiple_context_types() {
    let bucket = bucket![MockContext::new("mock"), AnotherMockContext::new("another")];

    assert!(bucket.has::<MockContext>());
    assert!(bucket.has::<AnotherMockContext>());
    assert_eq!(
        bucket.last::<MockContext>().map(|c| c.name.as_str()),
        Some("mock")
    );
    assert_eq!(
        bucket.last::<AnotherMockContext>().map(|c| c.name.as_str()),
        Some("another")
    );
}

#[test]
fn grouped_scenario_from_mixed_adds() {
    let (bucket, _) = three_contexts();

    assert_eq!(bucket.all().len(), 2);
    let names: Vec<&str> = bucket
        .group::<MockContext>()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["first", "second"]);
    assert_eq!(
        bucket.last::<MockContext>().map(|c| c.name.as_str()),
        Some("second")
    );
    assert_eq!(bucket.to_flat_vec().len(), 3);
}

#[test]
fn empty_bucket_flattens_and_filters_without_error() {
    let bucket = ContextBucket::new();
    assert!(bucket.to_flat_vec().is_empty());
    assert!(bucket.filter(|_| true).to_flat_vec().is_empty());
    assert!(bucket.without_all::<MockContext>().is_empty());
}
