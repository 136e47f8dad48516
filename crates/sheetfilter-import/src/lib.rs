//! Import of worksheet AutoFilter and SortState blocks from SpreadsheetML XML
//! and BIFF12 records.
//!
//! Both drivers feed one push-style [`Context`] chain. Each context accepts the
//! children listed for it in [`DISPATCH_TABLE`], creates the matching object in
//! the [`AutoFilter`](sheetfilter_model::AutoFilter) being built, and forwards
//! attributes or record payloads to it. Children a context does not accept are
//! skipped along with their whole subtree.
//!
//! ```
//! use sheetfilter_import::{import_autofilter_xml, ImportOptions};
//!
//! let xml = r#"<autoFilter ref="A1:B10">
//!   <filterColumn colId="1"><filters><filter val="x"/></filters></filterColumn>
//! </autoFilter>"#;
//! let af = import_autofilter_xml(xml, 0, &ImportOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(af.columns.len(), 1);
//! ```

mod attributes;
mod biff12;
mod context;
mod dispatch;
mod error;
mod options;
mod sinks;
mod token;
mod xml;

pub use attributes::AttributeList;
pub use biff12::import_autofilter_biff12;
pub use context::{Context, Payload};
pub use dispatch::{lookup, Coverage, Rule, Spawn, DISPATCH_TABLE};
pub use error::ImportError;
pub use options::ImportOptions;
pub use sinks::SettingsImport;
pub use token::{Dialect, Element, Token};
pub use xml::{import_autofilter_xml, import_autofilter_xml_reader};
