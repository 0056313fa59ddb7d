//! Object-level marshaling entry points
//!
//! [`XmlWrite`] is implemented once per record in [`crate::writers`];
//! [`write_one`] and [`write_many`] are the public entry points and supply the
//! default tag names.

use std::io::Write;

use tracing::trace;

use crate::config::WriterConfig;
use crate::error::XmlError;
use crate::writer::XmlWriter;

/// A record that can be written as one XML element
pub trait XmlWrite {
    /// Element name used when the caller does not give one
    const TAG: &'static str;

    /// Wrapper element name for lists of this record
    const PLURAL_TAG: &'static str;

    /// Write the record as element `tag`.
    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError>;
}

/// Write a single object.
///
/// Fails with [`XmlError::NilInput`] and writes nothing when `object` is
/// `None`. A `None` tag selects [`XmlWrite::TAG`].
pub fn write_one<W, T>(writer: &mut XmlWriter<W>, object: Option<&T>, tag: Option<&str>) -> Result<(), XmlError>
where
    W: Write,
    T: XmlWrite,
{
    let object = object.ok_or(XmlError::NilInput)?;
    object.write_xml(writer, tag.unwrap_or(T::TAG))
}

/// Write a list of objects inside a wrapper element.
///
/// `None` tags select [`XmlWrite::PLURAL_TAG`] and [`XmlWrite::TAG`]. An empty
/// slice still produces the wrapper element.
pub fn write_many<W, T>(
    writer: &mut XmlWriter<W>,
    objects: &[T],
    plural: Option<&str>,
    singular: Option<&str>,
) -> Result<(), XmlError>
where
    W: Write,
    T: XmlWrite,
{
    let plural = plural.unwrap_or(T::PLURAL_TAG);
    let singular = singular.unwrap_or(T::TAG);
    writer.write_start(plural, &[])?;
    for object in objects {
        object.write_xml(writer, singular)?;
    }
    writer.write_end(plural)
}

/// Marshal one object into a string.
pub fn to_xml_string<T: XmlWrite>(object: &T, config: &WriterConfig) -> Result<String, XmlError> {
    let mut writer = XmlWriter::new(Vec::new(), config)?;
    object.write_xml(&mut writer, T::TAG)?;
    let xml = String::from_utf8(writer.into_inner())?;
    trace!(tag = T::TAG, bytes = xml.len(), "Marshaled object");
    Ok(xml)
}

/// Marshal a list of objects into a string, wrapped in the plural element.
pub fn to_xml_string_many<T: XmlWrite>(objects: &[T], config: &WriterConfig) -> Result<String, XmlError> {
    let mut writer = XmlWriter::new(Vec::new(), config)?;
    write_many(&mut writer, objects, None, None)?;
    let xml = String::from_utf8(writer.into_inner())?;
    trace!(tag = T::PLURAL_TAG, count = objects.len(), bytes = xml.len(), "Marshaled list");
    Ok(xml)
}

/// `id` and `href` attributes of an entity, in that order, skipping unset ones.
pub(crate) fn identity_attrs<'a>(id: &'a Option<String>, href: &'a Option<String>) -> Vec<(&'static str, &'a str)> {
    let mut attrs = Vec::with_capacity(2);
    if let Some(id) = id {
        attrs.push(("id", id.as_str()));
    }
    if let Some(href) = href {
        attrs.push(("href", href.as_str()));
    }
    attrs
}
