//! End-to-end binding scenarios: parse-layer value sets applied to live
//! model instances through the descriptor engine.

use pathbind_binder::{AmbiguityPolicy, BindError, ModelCache, ObjectBinder, ValueSet, bindable};

bindable! {
  #[derive(Debug, Default, Clone, PartialEq)]
  pub struct Address {
    pub street: String,
    pub city: String,
  }
}

bindable! {
  #[derive(Debug, Default, Clone, PartialEq)]
  pub struct Person {
    pub name: String,
    pub age: u32,
    #[nested] pub home: Option<Address>,
  }
}

bindable! {
  #[derive(Debug, Default)]
  pub struct Billing {
    pub email: String,
  }
}

bindable! {
  #[derive(Debug, Default)]
  pub struct Shipping {
    pub email: String,
  }
}

bindable! {
  #[derive(Debug, Default)]
  pub struct Order {
    pub id: u64,
    #[nested] pub billing: Option<Billing>,
    #[nested] pub shipping: Option<Shipping>,
  }
}

fn person_with_home() -> Person {
  Person {
    home: Some(Address::default()),
    ..Person::default()
  }
}

#[test]
fn binds_path_entries_into_a_nested_instance() {
  let binder = ObjectBinder::<Person>::new().unwrap();
  let mut person = person_with_home();

  let summary = binder
    .update_instance(
      &mut person,
      ValueSet::new()
        .with_path("name", "Ada".to_string())
        .with_path("home.street", "Elm St".to_string()),
    )
    .unwrap();

  assert_eq!(person.name, "Ada");
  assert_eq!(person.home.as_ref().unwrap().street, "Elm St");
  // Untouched leaves keep their values.
  assert_eq!(person.age, 0);
  assert_eq!(person.home.as_ref().unwrap().city, "");

  // Bound paths come back in discovery order.
  assert_eq!(summary.bound_paths, ["name", "home.street"]);
}

#[test]
fn unset_intermediate_aborts_before_later_entries() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let mut person = Person::default();

  // Lexical order applies "home.street" before "name", so the failure on
  // the unset intermediate leaves "name" unapplied.
  let err = binder
    .update_instance(
      &mut person,
      ValueSet::new()
        .with_path("name", "Ada".to_string())
        .with_path("home.street", "Elm St".to_string()),
    )
    .unwrap_err();

  assert_eq!(
    err,
    BindError::UnsetIntermediate {
      path: "home.street".to_string(),
      intermediate: "home".to_string(),
    }
  );
  assert_eq!(person.name, "");
}

#[test]
fn partial_failure_keeps_earlier_writes() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let mut person = Person::default();

  let err = binder
    .update_instance(
      &mut person,
      ValueSet::new()
        .with_path("age", 41_u32)
        .with_path("home.street", "Elm St".to_string())
        .with_path("name", "Ada".to_string()),
    )
    .unwrap_err();

  assert!(matches!(err, BindError::UnsetIntermediate { .. }));
  // "age" sorts before the failing "home.street" and stays applied; "name"
  // sorts after it and was never reached. No rollback.
  assert_eq!(person.age, 41);
  assert_eq!(person.name, "");
}

#[test]
fn legacy_named_entry_resolves_a_unique_leaf() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let mut person = person_with_home();

  let summary = binder
    .update_instance(
      &mut person,
      ValueSet::new().with_named("street", "Elm St".to_string()),
    )
    .unwrap();

  assert_eq!(person.home.as_ref().unwrap().street, "Elm St");
  assert_eq!(summary.bound_paths, ["home.street"]);
}

#[test]
fn ambiguous_named_entry_fails_without_opt_in() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Order>::from_cache(&cache).unwrap();
  let mut order = Order {
    billing: Some(Billing::default()),
    shipping: Some(Shipping::default()),
    ..Order::default()
  };

  let err = binder
    .update_instance(
      &mut order,
      ValueSet::new().with_named("email", "ada@example.com".to_string()),
    )
    .unwrap_err();

  assert!(matches!(
    err,
    BindError::AmbiguousNameLookup { ref name, count: 2, .. } if name == "email"
  ));
  assert_eq!(order.billing.as_ref().unwrap().email, "");
  assert_eq!(order.shipping.as_ref().unwrap().email, "");
}

#[test]
fn ambiguous_named_entry_first_match_takes_discovery_order() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Order>::from_cache(&cache)
    .unwrap()
    .with_ambiguity(AmbiguityPolicy::FirstMatch);
  let mut order = Order {
    billing: Some(Billing::default()),
    shipping: Some(Shipping::default()),
    ..Order::default()
  };

  binder
    .update_instance(
      &mut order,
      ValueSet::new().with_named("email", "ada@example.com".to_string()),
    )
    .unwrap();

  // billing is declared before shipping, so first-match lands there.
  assert_eq!(order.billing.as_ref().unwrap().email, "ada@example.com");
  assert_eq!(order.shipping.as_ref().unwrap().email, "");
}

#[test]
fn unknown_path_aborts_the_pass() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let mut person = person_with_home();

  let err = binder
    .update_instance(
      &mut person,
      ValueSet::new().with_path("nickname", "ada".to_string()),
    )
    .unwrap_err();

  assert!(matches!(err, BindError::PathNotFound { ref path } if path == "nickname"));
}

#[test]
fn mistyped_value_is_rejected_without_coercion() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let mut person = person_with_home();

  let err = binder
    .update_instance(
      &mut person,
      ValueSet::new().with_path("age", "forty-one".to_string()),
    )
    .unwrap_err();

  assert!(matches!(err, BindError::ValueTypeMismatch { ref path, .. } if path == "age"));
  assert_eq!(person.age, 0);
}

#[test]
fn empty_value_set_binds_nothing() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let mut person = person_with_home();

  let summary = binder.update_instance(&mut person, ValueSet::new()).unwrap();

  assert!(summary.bound_paths.is_empty());
  assert_eq!(person, person_with_home());
}

#[test]
fn selector_and_path_addressing_agree() {
  let cache = ModelCache::new();
  let binder = ObjectBinder::<Person>::from_cache(&cache).unwrap();

  let selector = Person::home().then(Address::street());
  let mut pass = binder.descriptor().begin_pass();

  let by_selector = pass.resolve_by_selector(&selector).unwrap();
  let by_path = pass.resolve_by_path("home.street").unwrap();

  assert!(std::sync::Arc::ptr_eq(by_selector, by_path));
}

#[test]
fn binders_share_the_cache_descriptor() {
  let cache = ModelCache::new();
  let first = ObjectBinder::<Person>::from_cache(&cache).unwrap();
  let second = ObjectBinder::<Person>::from_cache(&cache).unwrap();

  assert!(std::sync::Arc::ptr_eq(first.descriptor(), second.descriptor()));
  assert_eq!(cache.len(), 1);
}
