//! XML marshaling for oVirt engine API objects
//!
//! Records in [`types`] are plain data with every field optional. They are
//! written through [`XmlWriter`] by the [`XmlWrite`] implementations, using
//! the element names and field order the engine's REST API expects.
//!
//! ```
//! use ovirt_xml::{Vm, VmStatus, WriterConfig, to_xml_string};
//!
//! let vm = Vm {
//!     id: Some("123".to_string()),
//!     name: Some("web-0".to_string()),
//!     status: Some(VmStatus::Up),
//!     ..Default::default()
//! };
//! let xml = to_xml_string(&vm, &WriterConfig::compact()).unwrap();
//! assert_eq!(xml, r#"<vm id="123"><name>web-0</name><status>up</status></vm>"#);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod enums;
pub mod error;
pub mod marshal;
pub mod types;
pub mod writer;
mod writers;

pub use config::WriterConfig;
pub use enums::*;
pub use error::{ParseEnumError, XmlError};
pub use marshal::{XmlWrite, to_xml_string, to_xml_string_many, write_many, write_one};
pub use types::*;
pub use writer::XmlWriter;
