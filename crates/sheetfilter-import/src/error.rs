use sheetfilter_biff12::Biff12Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("BIFF12 error: {0}")]
    Record(#[from] Biff12Error),
    #[error("unbalanced BIFF12 end record 0x{found:04X} (expected {})", fmt_expected(.expected))]
    UnbalancedRecord { expected: Option<u32>, found: u32 },
    #[error("filterColumn {col_id} defines more than one filter kind")]
    DuplicateFilterSettings { col_id: u32 },
    #[error("AutoFilter block nested deeper than {depth} levels")]
    TooDeep { depth: usize },
}

fn fmt_expected(expected: &Option<u32>) -> String {
    match expected {
        Some(id) => format!("0x{id:04X}"),
        None => "no open block".to_string(),
    }
}
