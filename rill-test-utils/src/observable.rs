// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observable host-object fixtures for property-binding tests.
//!
//! [`Person`] owns an observable `profile` property pointing at a
//! [`Profile`], which in turn exposes an observable `name`, an optional
//! `tags` collection, and an optional nested [`Address`] object. Together
//! they exercise the dotted-path scenarios: leaf assignment, intermediate
//! reassignment, unset leaves, and unset intermediates.

use rill_core::StreamBinding;
use rill_stream::observe::{Observable, Property};
use std::cell::RefCell;
use std::rc::Rc;

/// Fixture root object with a single observable `profile` property.
pub struct Person {
    profile: RefCell<Rc<Profile>>,
    changed: StreamBinding<String>,
}

impl Person {
    #[must_use]
    pub fn new(profile: Rc<Profile>) -> Rc<Self> {
        Rc::new(Self {
            profile: RefCell::new(profile),
            changed: StreamBinding::new(),
        })
    }

    #[must_use]
    pub fn profile(&self) -> Rc<Profile> {
        self.profile.borrow().clone()
    }

    pub fn set_profile(&self, profile: Rc<Profile>) {
        *self.profile.borrow_mut() = profile;
        self.notify("profile");
    }
}

impl Observable for Person {
    fn changed(&self) -> &StreamBinding<String> {
        &self.changed
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "profile" => Some(Property::Object(self.profile())),
            _ => None,
        }
    }
}

/// Fixture nested object with a `name` leaf, an optional `tags` leaf, and an
/// optional `address` object. `address` starts unset, so paths running
/// through it exercise binding across a currently empty intermediate.
pub struct Profile {
    name: RefCell<String>,
    tags: RefCell<Option<Rc<Vec<String>>>>,
    address: RefCell<Option<Rc<Address>>>,
    changed: StreamBinding<String>,
}

impl Profile {
    #[must_use]
    pub fn new(name: &str, tags: Option<Vec<String>>) -> Rc<Self> {
        Rc::new(Self {
            name: RefCell::new(name.to_string()),
            tags: RefCell::new(tags.map(Rc::new)),
            address: RefCell::new(None),
            changed: StreamBinding::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
        self.notify("name");
    }

    pub fn set_tags(&self, tags: Option<Vec<String>>) {
        *self.tags.borrow_mut() = tags.map(Rc::new);
        self.notify("tags");
    }

    #[must_use]
    pub fn address(&self) -> Option<Rc<Address>> {
        self.address.borrow().clone()
    }

    pub fn set_address(&self, address: Option<Rc<Address>>) {
        *self.address.borrow_mut() = address;
        self.notify("address");
    }
}

impl Observable for Profile {
    fn changed(&self) -> &StreamBinding<String> {
        &self.changed
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "name" => Some(Property::Value(Rc::new(self.name()))),
            "tags" => match self.tags.borrow().as_ref() {
                Some(tags) => Some(Property::Value(Rc::new(tags.clone()))),
                None => Some(Property::Empty),
            },
            "address" => match self.address.borrow().as_ref() {
                Some(address) => Some(Property::Object(address.clone())),
                None => Some(Property::Empty),
            },
            _ => None,
        }
    }
}

/// Fixture leaf-most object with a single observable `city` property.
pub struct Address {
    city: RefCell<String>,
    changed: StreamBinding<String>,
}

impl Address {
    #[must_use]
    pub fn new(city: &str) -> Rc<Self> {
        Rc::new(Self {
            city: RefCell::new(city.to_string()),
            changed: StreamBinding::new(),
        })
    }

    #[must_use]
    pub fn city(&self) -> String {
        self.city.borrow().clone()
    }

    pub fn set_city(&self, city: &str) {
        *self.city.borrow_mut() = city.to_string();
        self.notify("city");
    }
}

impl Observable for Address {
    fn changed(&self) -> &StreamBinding<String> {
        &self.changed
    }

    fn property(&self, name: &str) -> Option<Property> {
        match name {
            "city" => Some(Property::Value(Rc::new(self.city()))),
            _ => None,
        }
    }
}
