// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from property-change notifications to stream nodes.
//!
//! A host object implements [`Observable`]: it announces each property
//! assignment by name on a `changed` binding, and resolves properties by name
//! into [`Property`] handles. A [`PropertyStream`] consumes a dotted path
//! such as `"profile.name"` over such an object and emits a `Result` each
//! time the resolved leaf value changes, re-subscribing to the tail of the
//! path whenever an intermediate segment is reassigned.
//!
//! Malformed paths fail fast: they are reported as a [`PathError`] from the
//! constructor, never deferred into the stream as an `Error` value. The path
//! is an ordered list of by-name accessors resolved at bind time; the leaf
//! type is checked at construction via [`Any`] downcast.

use rill_core::{next_node_key, Stream, StreamBinding, StreamValue};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[cfg(not(feature = "tracing"))]
use crate::warn;
#[cfg(feature = "tracing")]
use crate::logging::warn;

/// Errors raised while binding a property path, at construction time.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// The path, or one of its dot-separated segments, is empty.
    #[error("property path `{path}` is malformed")]
    MalformedPath {
        /// The offending path expression
        path: String,
    },

    /// A segment does not name a property of its host object.
    #[error("property `{segment}` not found while binding path `{path}`")]
    SegmentNotFound {
        /// The full path expression being bound
        path: String,
        /// The segment that failed to resolve
        segment: String,
    },

    /// A non-terminal segment resolved to a plain value instead of an
    /// observable object, so the path cannot continue through it.
    #[error("property `{segment}` in path `{path}` is not an observable object")]
    NotAnObject {
        /// The full path expression being bound
        path: String,
        /// The segment that resolved to a leaf value
        segment: String,
    },

    /// The terminal segment resolved to a value of a different type than the
    /// stream was constructed with.
    #[error("leaf property `{segment}` in path `{path}` has an unexpected type")]
    LeafTypeMismatch {
        /// The full path expression being bound
        path: String,
        /// The terminal segment
        segment: String,
    },
}

/// A property resolved by name on an [`Observable`] host.
pub enum Property {
    /// A nested observable object; a path can continue through it.
    Object(Rc<dyn Observable>),
    /// A type-erased leaf value.
    Value(Rc<dyn Any>),
    /// The property exists but currently holds no value. Resolution stops
    /// here without error, and no emission is produced for it.
    Empty,
}

/// A host object whose property assignments can be observed.
///
/// Implementors own a `changed` binding carrying the *name* of each assigned
/// property, and resolve properties by name. Setters are expected to call
/// [`notify`](Self::notify) after mutating a field.
pub trait Observable {
    /// Binding fired with the property name on every assignment.
    fn changed(&self) -> &StreamBinding<String>;

    /// Resolves a property of this object by name; `None` means the name is
    /// unknown.
    fn property(&self, name: &str) -> Option<Property>;

    /// Announces an assignment of the property `name`.
    fn notify(&self, name: &str) {
        self.changed().emit(StreamValue::Result(name.to_string()));
    }
}

struct PropertyInner<T> {
    started: Cell<bool>,
    output: StreamBinding<T>,
    root: Rc<dyn Observable>,
    segments: Vec<String>,
    // One watched object per path segment; slot i owns the subscription on
    // the object whose property `segments[i]` is read.
    hooks: RefCell<Vec<Option<Rc<dyn Observable>>>>,
    key: String,
}

impl<T: Clone + 'static> PropertyInner<T> {
    fn level_key(&self, level: usize) -> String {
        format!("{}-{level}", self.key)
    }

    /// Drops the subscriptions for `level` and everything below it.
    fn detach(&self, level: usize) {
        let mut hooks = self.hooks.borrow_mut();
        for i in level..hooks.len() {
            if let Some(object) = hooks[i].take() {
                object.changed().remove_action(&self.level_key(i));
            }
        }
    }

    /// Re-resolves the path from `level` downward and subscribes to each
    /// reachable object. Resolution stops quietly at an `Empty` segment.
    fn attach(inner: &Rc<Self>, level: usize) {
        let mut current: Option<Rc<dyn Observable>> = if level == 0 {
            Some(inner.root.clone())
        } else {
            let hooks = inner.hooks.borrow();
            hooks[level - 1].as_ref().and_then(|owner| {
                match owner.property(&inner.segments[level - 1]) {
                    Some(Property::Object(next)) => Some(next),
                    _ => None,
                }
            })
        };

        for i in level..inner.segments.len() {
            let Some(object) = current else { break };
            inner.hooks.borrow_mut()[i] = Some(object.clone());

            let weak = Rc::downgrade(inner);
            let segment = inner.segments[i].clone();
            object
                .changed()
                .add_action(inner.level_key(i), move |value| {
                    if let StreamValue::Result(name) = value {
                        if *name == segment {
                            if let Some(inner) = weak.upgrade() {
                                PropertyInner::on_segment_changed(&inner, i);
                            }
                        }
                    }
                });

            current = match object.property(&inner.segments[i]) {
                Some(Property::Object(next)) => Some(next),
                _ => None,
            };
        }
    }

    fn on_segment_changed(inner: &Rc<Self>, level: usize) {
        inner.detach(level + 1);
        Self::attach(inner, level + 1);
        inner.emit_leaf();
    }

    /// Emits the current leaf value, if the tail of the path resolves to one.
    fn emit_leaf(&self) {
        let last = self.segments.len() - 1;
        let owner = self.hooks.borrow()[last].clone();
        let Some(owner) = owner else { return };
        match owner.property(&self.segments[last]) {
            Some(Property::Value(value)) => {
                if let Some(leaf) = value.downcast_ref::<T>() {
                    self.output.emit(StreamValue::Result(leaf.clone()));
                } else {
                    warn!(
                        "property `{}` changed to a value of an unexpected type",
                        self.segments[last]
                    );
                }
            }
            Some(Property::Empty) | Some(Property::Object(_)) => {}
            None => warn!(
                "property `{}` no longer resolves on its host object",
                self.segments[last]
            ),
        }
    }
}

/// A stream node emitting the value at a dotted property path each time it
/// changes.
///
/// The node watches every object along the path. When an intermediate
/// segment is reassigned, the subscriptions below it are torn down, the tail
/// is re-resolved against the new object graph, and the freshly resolved
/// leaf is emitted. No emission occurs while the leaf (or any intermediate
/// segment) is [`Property::Empty`], and nothing is emitted at `start` itself.
///
/// # Examples
///
/// ```
/// use rill_core::Stream;
/// use rill_stream::observe::PropertyStream;
/// use rill_stream::BindExt;
/// use rill_test_utils::observable::{Person, Profile};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let person = Person::new(Profile::new("Ada", None));
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let binding = PropertyStream::<String>::new(person.clone(), "profile.name")
///     .expect("valid path")
///     .bind_result({
///         let seen = seen.clone();
///         move |name| seen.borrow_mut().push(name.clone())
///     });
/// binding.start();
///
/// person.profile().set_name("Grace");
/// person.set_profile(Profile::new("Edsger", None));
/// assert_eq!(*seen.borrow(), vec!["Grace".to_string(), "Edsger".to_string()]);
/// ```
pub struct PropertyStream<T> {
    inner: Rc<PropertyInner<T>>,
}

impl<T> std::fmt::Debug for PropertyStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyStream")
            .field("path", &self.inner.segments.join("."))
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> PropertyStream<T> {
    /// Binds `path` over `root`.
    ///
    /// The path is validated immediately by walking the current object graph:
    /// unknown segments, non-object intermediates, and a leaf of the wrong
    /// type are all reported as a [`PathError`] here rather than as a stream
    /// `Error` later. Validation stops, accepting, at a segment that is
    /// currently [`Property::Empty`], since the graph below it cannot be
    /// inspected yet.
    pub fn new(root: Rc<dyn Observable>, path: &str) -> Result<Self, PathError> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return Err(PathError::MalformedPath {
                path: path.to_string(),
            });
        }
        Self::validate(&root, &segments, path)?;

        let count = segments.len();
        Ok(Self {
            inner: Rc::new(PropertyInner {
                started: Cell::new(false),
                output: StreamBinding::new(),
                root,
                segments,
                hooks: RefCell::new(vec![None; count]),
                key: next_node_key("property"),
            }),
        })
    }

    fn validate(
        root: &Rc<dyn Observable>,
        segments: &[String],
        path: &str,
    ) -> Result<(), PathError> {
        let mut current: Rc<dyn Observable> = root.clone();
        for (i, segment) in segments.iter().enumerate() {
            let property =
                current
                    .property(segment)
                    .ok_or_else(|| PathError::SegmentNotFound {
                        path: path.to_string(),
                        segment: segment.clone(),
                    })?;
            let terminal = i == segments.len() - 1;
            match property {
                Property::Object(next) => {
                    if terminal {
                        // The leaf must be a plain value of type T.
                        return Err(PathError::LeafTypeMismatch {
                            path: path.to_string(),
                            segment: segment.clone(),
                        });
                    }
                    current = next;
                }
                Property::Value(value) => {
                    if !terminal {
                        return Err(PathError::NotAnObject {
                            path: path.to_string(),
                            segment: segment.clone(),
                        });
                    }
                    if value.downcast_ref::<T>().is_none() {
                        return Err(PathError::LeafTypeMismatch {
                            path: path.to_string(),
                            segment: segment.clone(),
                        });
                    }
                }
                // Unset: the graph below cannot be inspected yet.
                Property::Empty => return Ok(()),
            }
        }
        Ok(())
    }
}

impl<T: Clone + 'static> Stream for PropertyStream<T> {
    type Output = T;

    fn started(&self) -> bool {
        self.inner.started.get()
    }

    fn output(&self) -> &StreamBinding<T> {
        &self.inner.output
    }

    fn start(&self) {
        if self.inner.started.replace(true) {
            return;
        }
        PropertyInner::attach(&self.inner, 0);
    }
}

impl<T> Clone for PropertyStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Sugar for binding property paths directly off a host object handle.
pub trait ObserveExt {
    /// Binds a dotted property path over this object; see
    /// [`PropertyStream::new`].
    fn observe<T: Clone + 'static>(&self, path: &str) -> Result<PropertyStream<T>, PathError>;
}

impl<O: Observable + 'static> ObserveExt for Rc<O> {
    fn observe<T: Clone + 'static>(&self, path: &str) -> Result<PropertyStream<T>, PathError> {
        PropertyStream::new(self.clone() as Rc<dyn Observable>, path)
    }
}
