//! Low-level XML writer
//!
//! Thin layer over [`quick_xml::Writer`] with the primitive operations the
//! per-type marshaling code needs: start and end tags, and leaf elements for
//! strings, integers, floats, booleans and dates.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::config::WriterConfig;
use crate::error::XmlError;

/// Streaming XML writer over any [`Write`] sink
pub struct XmlWriter<W: Write> {
    inner: Writer<W>,
}

impl<W: Write> std::fmt::Debug for XmlWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlWriter").finish_non_exhaustive()
    }
}

impl<W: Write> XmlWriter<W> {
    /// Create a writer, emitting the XML declaration if configured.
    pub fn new(sink: W, config: &WriterConfig) -> Result<Self, XmlError> {
        let mut inner = match config.effective_indent() {
            Some(indent) => Writer::new_with_indent(sink, b' ', indent),
            None => Writer::new(sink),
        };
        if config.xml_declaration {
            inner.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        Ok(Self { inner })
    }

    /// Open element `name` with the given attributes, in order.
    pub fn write_start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), XmlError> {
        for (_, value) in attrs {
            check_chars(name, value)?;
        }
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Close element `name`.
    pub fn write_end(&mut self, name: &str) -> Result<(), XmlError> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write `<name>value</name>`, escaping the value.
    ///
    /// Fails with [`XmlError::InvalidCharacter`] when the value holds a
    /// control character other than tab, newline or carriage return.
    pub fn write_character(&mut self, name: &str, value: &str) -> Result<(), XmlError> {
        check_chars(name, value)?;
        self.inner.write_event(Event::Start(BytesStart::new(name)))?;
        // Always emit the text event, even when empty, so that indentation
        // keeps the closing tag on the same line.
        self.inner.write_event(Event::Text(BytesText::new(value)))?;
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write `<plural><singular>v</singular>...</plural>`.
    pub fn write_characters<I, S>(&mut self, plural: &str, singular: &str, values: I) -> Result<(), XmlError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_start(plural, &[])?;
        for value in values {
            self.write_character(singular, value.as_ref())?;
        }
        self.write_end(plural)
    }

    /// Write an integer leaf.
    pub fn write_i64(&mut self, name: &str, value: i64) -> Result<(), XmlError> {
        self.write_character(name, &value.to_string())
    }

    /// Write a float leaf; non-finite values use the `xs:double` forms `NaN`, `INF` and `-INF`.
    pub fn write_f64(&mut self, name: &str, value: f64) -> Result<(), XmlError> {
        let text = if value.is_nan() {
            "NaN".to_string()
        } else if value == f64::INFINITY {
            "INF".to_string()
        } else if value == f64::NEG_INFINITY {
            "-INF".to_string()
        } else {
            value.to_string()
        };
        self.write_character(name, &text)
    }

    /// Write `true` or `false`.
    pub fn write_bool(&mut self, name: &str, value: bool) -> Result<(), XmlError> {
        self.write_character(name, if value { "true" } else { "false" })
    }

    /// Write a timestamp in RFC 3339 form; fractional seconds only when non-zero.
    pub fn write_date(&mut self, name: &str, value: &DateTime<Utc>) -> Result<(), XmlError> {
        self.write_character(name, &value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<(), XmlError> {
        self.inner.get_mut().flush()?;
        Ok(())
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

fn check_chars(element: &str, value: &str) -> Result<(), XmlError> {
    match value
        .chars()
        .find(|c| matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'))
    {
        Some(c) => Err(XmlError::InvalidCharacter {
            element: element.to_string(),
            code: u32::from(c),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn output(config: &WriterConfig, write: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<(), XmlError>) -> String {
        let mut writer = XmlWriter::new(Vec::new(), config).expect("writer");
        write(&mut writer).expect("write");
        String::from_utf8(writer.into_inner()).expect("utf-8")
    }

    #[test]
    fn test_primitives() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single().expect("date");
        let xml = output(&WriterConfig::compact(), |w| {
            w.write_start("vm", &[("id", "123")])?;
            w.write_character("name", "web & db")?;
            w.write_i64("memory", 1_073_741_824)?;
            w.write_bool("stateless", false)?;
            w.write_f64("speed", 2.5)?;
            w.write_date("creation_time", &date)?;
            w.write_end("vm")
        });
        assert_eq!(
            xml,
            "<vm id=\"123\"><name>web &amp; db</name><memory>1073741824</memory>\
             <stateless>false</stateless><speed>2.5</speed>\
             <creation_time>2024-05-01T10:00:00Z</creation_time></vm>"
        );
    }

    #[test]
    fn test_characters_and_empty_value() {
        let xml = output(&WriterConfig::compact(), |w| {
            w.write_characters("devices", "device", ["hd", "network"])?;
            w.write_character("comment", "")
        });
        assert_eq!(
            xml,
            "<devices><device>hd</device><device>network</device></devices><comment></comment>"
        );
    }

    #[test]
    fn test_pretty_output() {
        let xml = output(&WriterConfig::pretty(2), |w| {
            w.write_start("cpu", &[])?;
            w.write_start("topology", &[])?;
            w.write_i64("cores", 2)?;
            w.write_end("topology")?;
            w.write_end("cpu")
        });
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<cpu>\n  <topology>\n    <cores>2</cores>\n  </topology>\n</cpu>"
        );
    }

    #[test]
    fn test_non_finite_floats() {
        let xml = output(&WriterConfig::compact(), |w| {
            w.write_f64("a", f64::INFINITY)?;
            w.write_f64("b", f64::NEG_INFINITY)?;
            w.write_f64("c", f64::NAN)
        });
        assert_eq!(xml, "<a>INF</a><b>-INF</b><c>NaN</c>");
    }

    #[test]
    fn test_control_characters_rejected() {
        let mut writer = XmlWriter::new(Vec::new(), &WriterConfig::compact()).expect("writer");
        let err = writer.write_character("name", "a\u{1}b").expect_err("control character");
        assert!(matches!(err, XmlError::InvalidCharacter { code: 1, .. }));
        assert_eq!(
            err.to_string(),
            "element \"name\" contains character U+0001, which is not allowed in XML"
        );
        assert!(writer.into_inner().is_empty());

        let err = output_err(|w| w.write_start("vm", &[("id", "x\u{1b}")]));
        assert!(matches!(err, XmlError::InvalidCharacter { code: 0x1b, .. }));

        let xml = output(&WriterConfig::compact(), |w| w.write_character("script", "a\tb\r\nc"));
        assert_eq!(xml, "<script>a\tb\r\nc</script>");
    }

    fn output_err(write: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<(), XmlError>) -> XmlError {
        let mut writer = XmlWriter::new(Vec::new(), &WriterConfig::compact()).expect("writer");
        write(&mut writer).expect_err("write should fail")
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_io_error() {
        let err = XmlWriter::new(BrokenSink, &WriterConfig::pretty(2)).expect_err("declaration write fails");
        assert!(matches!(err, XmlError::Io(_)));

        let mut writer = XmlWriter::new(BrokenSink, &WriterConfig::compact()).expect("no declaration written");
        let err = writer.write_character("name", "web-0").expect_err("element write fails");
        assert!(matches!(err, XmlError::Io(ref e) if e.to_string() == "sink closed"));
    }

    #[test]
    fn test_zero_indent_is_compact() {
        let config = WriterConfig::default().with_indent(Some(0));
        let xml = output(&config, |w| {
            w.write_start("a", &[])?;
            w.write_character("b", "c")?;
            w.write_end("a")
        });
        assert_eq!(xml, "<a><b>c</b></a>");
    }
}
