//! Writer configuration

/// Output formatting for [`XmlWriter`](crate::XmlWriter)
///
/// The default is compact output without an XML declaration, which is what
/// the engine API expects in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterConfig {
    /// Spaces per nesting level; `None` or `Some(0)` writes everything on one line
    pub indent: Option<usize>,

    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root element
    pub xml_declaration: bool,
}

impl WriterConfig {
    /// Single-line output, no declaration.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output with a declaration, for files and logs.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            xml_declaration: true,
        }
    }

    /// Replace the indent width; `None` disables indentation.
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Toggle the `<?xml ...?>` declaration.
    pub fn with_declaration(mut self, xml_declaration: bool) -> Self {
        self.xml_declaration = xml_declaration;
        self
    }

    /// Indent width actually applied, if any.
    pub(crate) fn effective_indent(&self) -> Option<usize> {
        self.indent.filter(|n| *n > 0)
    }
}
