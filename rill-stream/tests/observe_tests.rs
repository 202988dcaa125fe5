// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::Stream;
use rill_stream::observe::ObserveExt;
use rill_stream::BindExt;
use rill_test_utils::{Address, Collector, Person, Profile};
use std::rc::Rc;

#[test]
fn test_leaf_assignment_emits_the_new_value() -> anyhow::Result<()> {
    // Arrange
    let person = Person::new(Profile::new("Ada", None));
    let collector = Collector::new();
    let names = person
        .observe::<String>("profile.name")?
        .bind_result(collector.push_fn());
    names.start();

    // Act
    person.profile().set_name("Grace");
    person.profile().set_name("Edsger");

    // Assert: nothing is emitted at start itself
    assert_eq!(
        collector.values(),
        vec!["Grace".to_string(), "Edsger".to_string()]
    );
    Ok(())
}

#[test]
fn test_intermediate_reassignment_rebinds_the_tail() -> anyhow::Result<()> {
    // Arrange
    let person = Person::new(Profile::new("Ada", None));
    let collector = Collector::new();
    let names = person
        .observe::<String>("profile.name")?
        .bind_result(collector.push_fn());
    names.start();

    // Act: swapping the whole profile emits the fresh leaf...
    person.set_profile(Profile::new("Grace", None));
    // ...and changes on the new profile keep flowing
    person.profile().set_name("Barbara");

    // Assert
    assert_eq!(
        collector.values(),
        vec!["Grace".to_string(), "Barbara".to_string()]
    );
    Ok(())
}

#[test]
fn test_detached_object_changes_are_ignored() -> anyhow::Result<()> {
    // Arrange
    let original = Profile::new("Ada", None);
    let person = Person::new(original.clone());
    let collector = Collector::new();
    let names = person
        .observe::<String>("profile.name")?
        .bind_result(collector.push_fn());
    names.start();

    // Act
    person.set_profile(Profile::new("Grace", None));
    original.set_name("stale"); // no longer on the path

    // Assert
    assert_eq!(collector.values(), vec!["Grace".to_string()]);
    Ok(())
}

#[test]
fn test_unset_leaf_produces_no_emission() -> anyhow::Result<()> {
    // Arrange
    let person = Person::new(Profile::new("Ada", None));
    let collector = Collector::new();
    let tags = person
        .observe::<Rc<Vec<String>>>("profile.tags")?
        .bind_result(collector.push_fn());
    tags.start();

    // Act: clearing the leaf notifies but resolves to nothing
    person.profile().set_tags(None);
    person
        .profile()
        .set_tags(Some(vec!["rust".to_string(), "streams".to_string()]));

    // Assert
    assert_eq!(collector.len(), 1);
    assert_eq!(
        *collector.last().expect("one emission"),
        vec!["rust".to_string(), "streams".to_string()]
    );
    Ok(())
}

#[test]
fn test_unrelated_property_changes_do_not_emit() -> anyhow::Result<()> {
    // Arrange
    let person = Person::new(Profile::new("Ada", None));
    let collector = Collector::new();
    let names = person
        .observe::<String>("profile.name")?
        .bind_result(collector.push_fn());
    names.start();

    // Act
    person.profile().set_tags(Some(vec!["tag".to_string()]));

    // Assert
    assert!(collector.is_empty());
    Ok(())
}

#[test]
fn test_empty_intermediate_binds_and_resolves_on_assignment() -> anyhow::Result<()> {
    // Arrange: `address` is unset, so the path cannot be walked past it yet
    let person = Person::new(Profile::new("Ada", None));
    let collector = Collector::new();
    let cities = person
        .observe::<String>("profile.address.city")?
        .bind_result(collector.push_fn());
    cities.start();

    // Assert: starting across the empty intermediate emits nothing
    assert!(collector.is_empty());

    // Act: assigning the intermediate resolves the tail and emits the leaf
    person.profile().set_address(Some(Address::new("Paris")));
    // ...and the freshly bound tail keeps delivering leaf changes
    person
        .profile()
        .address()
        .expect("address assigned")
        .set_city("Lyon");

    // Assert
    assert_eq!(
        collector.values(),
        vec!["Paris".to_string(), "Lyon".to_string()]
    );
    Ok(())
}

#[test]
fn test_clearing_an_intermediate_stops_emissions() -> anyhow::Result<()> {
    // Arrange
    let person = Person::new(Profile::new("Ada", None));
    person.profile().set_address(Some(Address::new("Paris")));
    let collector = Collector::new();
    let cities = person
        .observe::<String>("profile.address.city")?
        .bind_result(collector.push_fn());
    cities.start();

    // Act
    let detached = person.profile().address().expect("address assigned");
    person.profile().set_address(None);
    detached.set_city("stale"); // no longer on the path

    // Assert: clearing the intermediate emits nothing and detaches its tail
    assert!(collector.is_empty());
    Ok(())
}

#[test]
fn test_property_stream_start_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let person = Person::new(Profile::new("Ada", None));
    let collector = Collector::new();
    let names = person
        .observe::<String>("profile.name")?
        .bind_result(collector.push_fn());

    // Act: a second start must not double-subscribe along the path
    names.start();
    names.start();
    person.profile().set_name("Grace");

    // Assert
    assert_eq!(collector.values(), vec!["Grace".to_string()]);
    Ok(())
}
