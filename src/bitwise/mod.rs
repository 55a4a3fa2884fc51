// Bit-packed record codec for radio clone images.
// A record layout is a declarative table of field descriptors; parse/build
// translate between a raw byte window and a field-name-to-value mapping.

pub mod bcd;
pub mod field;
pub mod layout;
pub mod parser;
pub mod record;

pub use field::{decode_field, encode_field, BitSlot, FieldDef, FieldKind, Value};
pub use layout::{Layout, LayoutBuilder};
pub use record::{build, parse, FieldMap};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Window size does not match the layout. Programmer/config error.
    #[error("window size mismatch: layout {name} is {expected} bytes, window is {actual}")]
    Layout {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("index {index} out of range for {name}[{count}]")]
    Index {
        name: String,
        index: usize,
        count: usize,
    },

    /// Value does not fit the field's representable domain.
    #[error("value does not fit field {field}: {reason}")]
    Encoding { field: String, reason: String },

    #[error("no field named '{0}' in layout")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
