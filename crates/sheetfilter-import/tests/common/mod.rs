//! BIFF12 worksheet fixtures built with the record writer.

#![allow(dead_code)]

use sheetfilter_biff12::records::{self, custom_filter_type};
use sheetfilter_biff12::Biff12Writer;

pub struct SheetStream {
    writer: Biff12Writer<Vec<u8>>,
}

impl SheetStream {
    pub fn new() -> Self {
        Self {
            writer: Biff12Writer::new(Vec::new()),
        }
    }

    pub fn record(mut self, id: u32, payload: Vec<u8>) -> Self {
        self.writer.write_record(id, &payload).unwrap();
        self
    }

    pub fn begin_autofilter(self, row_first: i32, row_last: i32, col_first: i32, col_last: i32) -> Self {
        let payload = [row_first, row_last, col_first, col_last]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        self.record(records::BEGIN_A_FILTER, payload)
    }

    pub fn end_autofilter(self) -> Self {
        self.record(records::END_A_FILTER, Vec::new())
    }

    pub fn begin_filter_column(self, col_id: u32, flags: u16) -> Self {
        let mut payload = col_id.to_le_bytes().to_vec();
        payload.extend_from_slice(&flags.to_le_bytes());
        self.record(records::BEGIN_FILTER_COLUMN, payload)
    }

    pub fn end_filter_column(self) -> Self {
        self.record(records::END_FILTER_COLUMN, Vec::new())
    }

    pub fn begin_filters(self, blank: bool, calendar: u32) -> Self {
        let mut payload = u32::from(blank).to_le_bytes().to_vec();
        payload.extend_from_slice(&calendar.to_le_bytes());
        self.record(records::BEGIN_FILTERS, payload)
    }

    pub fn end_filters(self) -> Self {
        self.record(records::END_FILTERS, Vec::new())
    }

    pub fn filter(self, value: &str) -> Self {
        self.record(records::FILTER, wide_string(value))
    }

    pub fn top10(self, top: bool, percent: bool, value: f64) -> Self {
        let mut flags = 0;
        if top {
            flags |= records::TOP10_FILTER_TOP;
        }
        if percent {
            flags |= records::TOP10_FILTER_PERCENT;
        }
        let mut payload = flags.to_le_bytes().to_vec();
        payload.extend_from_slice(&value.to_le_bytes());
        self.record(records::TOP10_FILTER, payload)
    }

    pub fn begin_custom_filters(self, and: bool) -> Self {
        self.record(
            records::BEGIN_CUSTOM_FILTERS,
            u32::from(and).to_le_bytes().to_vec(),
        )
    }

    pub fn end_custom_filters(self) -> Self {
        self.record(records::END_CUSTOM_FILTERS, Vec::new())
    }

    pub fn custom_filter_number(self, op: u8, value: f64) -> Self {
        let mut payload = vec![custom_filter_type::DOUBLE, op];
        payload.extend_from_slice(&value.to_le_bytes());
        self.record(records::CUSTOM_FILTER, payload)
    }

    pub fn custom_filter_text(self, op: u8, value: &str) -> Self {
        let mut payload = vec![custom_filter_type::STRING, op];
        payload.extend_from_slice(&[0; 8]);
        payload.extend(wide_string(value));
        self.record(records::CUSTOM_FILTER, payload)
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// `XLWideString`: character count then UTF-16LE code units.
pub fn wide_string(s: &str) -> Vec<u8> {
    let units: Vec<u16> = s.encode_utf16().collect();
    let mut out = (units.len() as u32).to_le_bytes().to_vec();
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}
