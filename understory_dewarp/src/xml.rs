// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text XML backend for [`NodeReader`] and [`Element`].
//!
//! Reading goes through `roxmltree`, either directly (its nodes implement
//! [`NodeReader`]) or via [`parse`] into an owned [`Element`]. Writing goes
//! through `quick_xml`.

use alloc::string::{FromUtf8Error, String};
use alloc::vec::Vec;
use core::fmt;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::model::DistortionModel;
use crate::node::{Element, ElementWriter, NodeReader};

/// Error produced while converting between XML text and elements.
#[derive(Debug)]
pub enum XmlError {
    /// The input is not well-formed XML.
    Parse(roxmltree::Error),
    /// The XML writer failed.
    Write(quick_xml::Error),
    /// The writer produced bytes that are not UTF-8.
    Utf8(FromUtf8Error),
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed XML: {err}"),
            Self::Write(err) => write!(f, "failed to write XML: {err}"),
            Self::Utf8(err) => write!(f, "XML output is not UTF-8: {err}"),
        }
    }
}

impl core::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Write(err) => Some(err),
            Self::Utf8(err) => Some(err),
        }
    }
}

impl From<roxmltree::Error> for XmlError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Write(err)
    }
}

impl From<FromUtf8Error> for XmlError {
    fn from(err: FromUtf8Error) -> Self {
        Self::Utf8(err)
    }
}

impl<'a, 'input: 'a> NodeReader for roxmltree::Node<'a, 'input> {
    fn child(&self, name: &str) -> Option<Self> {
        roxmltree::Node::children(self).find(|n| n.is_element() && n.has_tag_name(name))
    }

    fn children(&self, name: &str) -> Vec<Self> {
        roxmltree::Node::children(self)
            .filter(|n| n.is_element() && n.has_tag_name(name))
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }
}

/// Parses XML text into an owned element tree rooted at the document element.
///
/// Only elements and attributes are kept; text, comments and processing
/// instructions are dropped.
pub fn parse(text: &str) -> Result<Element, XmlError> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(to_element(doc.root_element()))
}

fn to_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        el.set_attribute(attr.name(), attr.value());
    }
    for child in roxmltree::Node::children(&node).filter(|n| n.is_element()) {
        el.push_child(to_element(child));
    }
    el
}

impl Element {
    /// Serializes the element tree as XML text, without a declaration.
    ///
    /// Elements without children are written in the empty-element form.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(el.name());
    for (name, value) in el.attributes() {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if el.child_elements().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in el.child_elements() {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(el.name())))?;
    Ok(())
}

impl DistortionModel {
    /// Reads a model from XML text whose document element holds the
    /// `top-curve` and `bottom-curve` children.
    pub fn from_xml_str(text: &str) -> Result<Self, XmlError> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self::from_node(&doc.root_element()))
    }

    /// Writes the model as XML text with a document element named `name`.
    ///
    /// Returns `Ok(None)` for an invalid model.
    pub fn to_xml_string(&self, name: &str) -> Result<Option<String>, XmlError> {
        self.to_node(&mut ElementWriter, name)
            .map(|el| el.to_xml_string())
            .transpose()
    }
}
