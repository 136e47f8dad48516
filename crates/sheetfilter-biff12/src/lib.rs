//! BIFF12 (XLSB) record framing.
//!
//! A BIFF12 part is a flat sequence of `id | length | payload` records. Nesting is
//! expressed by begin/end record pairs (see [`records::RECORD_INFOS`]); this crate
//! only frames records and decodes payload primitives. Interpreting them is up to
//! the importer.

mod error;
mod reader;
pub mod records;
mod stream;
mod varint;

pub use error::Biff12Error;
pub use reader::{Biff12Reader, Biff12Record, Biff12Writer};
pub use stream::{decode_rk_number, SequenceInputStream};
pub use varint::{read_record_id, read_record_len, write_record_id, write_record_len};
