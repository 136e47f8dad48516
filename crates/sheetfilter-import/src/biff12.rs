use std::io::Read;

use sheetfilter_biff12::{records, Biff12Reader, SequenceInputStream};
use sheetfilter_model::AutoFilter;

use crate::context::{ContextChain, Payload};
use crate::token::{Element, Token};
use crate::{ImportError, ImportOptions};

/// Import the first `BrtBeginAFilter` block of a BIFF12 worksheet part.
///
/// Begin/end records must pair up inside the block; a stray or mismatched end
/// record is [`ImportError::UnbalancedRecord`]. Records outside the block are
/// ignored. A block still open at end of stream yields what was imported.
pub fn import_autofilter_biff12<R: Read>(
    input: R,
    sheet: u16,
    options: &ImportOptions,
) -> Result<Option<AutoFilter>, ImportError> {
    let mut reader = Biff12Reader::new(input);
    let mut chain = ContextChain::new(sheet, options);
    // End record ids of the open begin records, innermost last.
    let mut open_blocks: Vec<u32> = Vec::new();
    let mut buf = Vec::new();

    while let Some(record) = reader.read_record(&mut buf)? {
        let id = record.id;
        let payload = Payload::Record(SequenceInputStream::new(record.data));

        if !chain.is_active() {
            if id == records::BEGIN_A_FILTER && !chain.has_sink() {
                log::trace!("BrtBeginAFilter at offset {}", record.offset);
                chain.begin_root(payload)?;
                open_blocks.push(records::END_A_FILTER);
            }
            continue;
        }

        if records::is_end_record(id) {
            let expected = open_blocks.pop();
            if expected != Some(id) {
                return Err(ImportError::UnbalancedRecord {
                    expected,
                    found: id,
                });
            }
            chain.end();
            if !chain.is_active() {
                break;
            }
            continue;
        }

        let token = Element::from_record_id(id).map(Token::biff12);
        chain.start(token, payload)?;
        match records::end_record_for(id) {
            Some(end) => open_blocks.push(end),
            None => chain.end(),
        }
    }

    Ok(chain.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetfilter_biff12::Biff12Writer;

    fn stream(records: &[(u32, Vec<u8>)]) -> Vec<u8> {
        let mut w = Biff12Writer::new(Vec::new());
        for (id, payload) in records {
            w.write_record(*id, payload).unwrap();
        }
        w.into_inner()
    }

    fn rect(r1: i32, r2: i32, c1: i32, c2: i32) -> Vec<u8> {
        [r1, r2, c1, c2].iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn empty_stream_has_no_autofilter() {
        let out = import_autofilter_biff12(std::io::empty(), 0, &ImportOptions::default()).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn mismatched_end_record_is_rejected() {
        let data = stream(&[
            (records::BEGIN_A_FILTER, rect(0, 9, 0, 2)),
            (records::BEGIN_FILTER_COLUMN, vec![0, 0, 0, 0, 0, 0]),
            (records::END_FILTERS, vec![]),
        ]);
        let err = import_autofilter_biff12(&data[..], 0, &ImportOptions::default()).unwrap_err();
        assert!(
            matches!(
                err,
                ImportError::UnbalancedRecord {
                    expected: Some(records::END_FILTER_COLUMN),
                    found: records::END_FILTERS,
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn unterminated_block_returns_partial_import() {
        let data = stream(&[
            (records::BEGIN_A_FILTER, rect(0, 9, 0, 2)),
            (records::BEGIN_FILTER_COLUMN, vec![2, 0, 0, 0, 0, 0]),
        ]);
        let af = import_autofilter_biff12(&data[..], 0, &ImportOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(af.columns.len(), 1);
        assert_eq!(af.columns[0].col_id, 2);
    }

    #[test]
    fn short_payload_is_a_record_error() {
        let data = stream(&[(records::BEGIN_A_FILTER, vec![0, 0, 0, 0])]);
        let err = import_autofilter_biff12(&data[..], 0, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::Record(_)), "{err:?}");
    }
}
