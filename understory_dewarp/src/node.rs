// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow structured-document interfaces.
//!
//! The distortion model reads and writes a small tree of named elements with
//! string attributes. Hosts plug their own document library in through
//! [`NodeReader`] and [`NodeWriter`]; [`Element`] and [`ElementWriter`] are a
//! self-contained owned tree for hosts that do not have one.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

/// Read access to one element of a structured document.
///
/// Lookups that find nothing return `None` or an empty list. Callers treat
/// absence as data, never as an error.
pub trait NodeReader: Sized {
    /// Returns the first element child with the given tag name.
    fn child(&self, name: &str) -> Option<Self>;

    /// Returns all element children with the given tag name, in document order.
    fn children(&self, name: &str) -> Vec<Self>;

    /// Returns the value of the named attribute.
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Write access for building a structured document bottom-up.
pub trait NodeWriter {
    /// Element handle produced by this writer.
    type Element;

    /// Creates a detached element with the given tag name.
    fn create_element(&mut self, name: &str) -> Self::Element;

    /// Sets an attribute on `element`, replacing any existing value.
    fn set_attribute(&mut self, element: &mut Self::Element, name: &str, value: &str);

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &mut Self::Element, child: Self::Element);
}

/// An owned document element: a tag name, ordered attributes and ordered
/// element children.
///
/// Text content is not modeled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Self>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the element children in document order.
    #[must_use]
    pub fn child_elements(&self) -> &[Self] {
        &self.children
    }

    /// Sets an attribute, replacing the value in place if it already exists.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| n == name) {
            value.clone_into(&mut slot.1);
        } else {
            self.attributes.push((name.to_owned(), value.to_owned()));
        }
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }
}

impl NodeReader for &Element {
    fn child(&self, name: &str) -> Option<Self> {
        let element: Self = *self;
        element.children.iter().find(|c| c.name == name)
    }

    fn children(&self, name: &str) -> Vec<Self> {
        let element: Self = *self;
        element.children.iter().filter(|c| c.name == name).collect()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// [`NodeWriter`] producing owned [`Element`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElementWriter;

impl NodeWriter for ElementWriter {
    type Element = Element;

    fn create_element(&mut self, name: &str) -> Element {
        Element::new(name)
    }

    fn set_attribute(&mut self, element: &mut Element, name: &str, value: &str) {
        element.set_attribute(name, value);
    }

    fn append_child(&mut self, parent: &mut Element, child: Element) {
        parent.push_child(child);
    }
}
