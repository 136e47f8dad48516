//! BIFF12 record ids used by worksheet AutoFilter / SortState blocks.
//!
//! Values are the logical ids from [MS-XLSB] 2.3.2 (as decoded by
//! [`crate::read_record_id`]).

pub const BEGIN_A_FILTER: u32 = 0x00A1;
pub const END_A_FILTER: u32 = 0x00A2;
pub const BEGIN_FILTER_COLUMN: u32 = 0x00A3;
pub const END_FILTER_COLUMN: u32 = 0x00A4;
pub const BEGIN_FILTERS: u32 = 0x00A5;
pub const END_FILTERS: u32 = 0x00A6;
pub const FILTER: u32 = 0x00A7;
pub const COLOR_FILTER: u32 = 0x00A8;
pub const ICON_FILTER: u32 = 0x00A9;
pub const TOP10_FILTER: u32 = 0x00AA;
pub const DYNAMIC_FILTER: u32 = 0x00AB;
pub const BEGIN_CUSTOM_FILTERS: u32 = 0x00AC;
pub const END_CUSTOM_FILTERS: u32 = 0x00AD;
pub const CUSTOM_FILTER: u32 = 0x00AE;
pub const A_FILTER_DATE_GROUP_ITEM: u32 = 0x00AF;

pub const BEGIN_SORT_STATE: u32 = 0x0492;
pub const END_SORT_STATE: u32 = 0x0493;
pub const BEGIN_SORT_COND: u32 = 0x0494;
pub const END_SORT_COND: u32 = 0x0495;

/// `BrtBeginFilterColumn` flags.
pub const FILTER_COLUMN_HIDDEN_BUTTON: u16 = 0x0001;
pub const FILTER_COLUMN_SHOW_BUTTON: u16 = 0x0002;

/// `BrtTop10Filter` flags.
pub const TOP10_FILTER_TOP: u32 = 0x0001;
pub const TOP10_FILTER_PERCENT: u32 = 0x0002;

/// Value type byte of a `BrtCustomFilter` record.
pub mod custom_filter_type {
    pub const NONE: u8 = 0;
    pub const RK: u8 = 2;
    pub const DOUBLE: u8 = 4;
    pub const STRING: u8 = 6;
    pub const BOOLEAN: u8 = 8;
    pub const EMPTY: u8 = 12;
    pub const NOT_EMPTY: u8 = 14;
}

/// Begin/end pairing of a nesting record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    pub begin: u32,
    pub end: u32,
}

/// Every nesting record that can occur inside (or as) a worksheet AutoFilter block.
///
/// Records not listed here are leaves: they start and end in one record.
pub const RECORD_INFOS: &[RecordInfo] = &[
    RecordInfo { begin: BEGIN_A_FILTER, end: END_A_FILTER },
    RecordInfo { begin: BEGIN_FILTER_COLUMN, end: END_FILTER_COLUMN },
    RecordInfo { begin: BEGIN_FILTERS, end: END_FILTERS },
    RecordInfo { begin: BEGIN_CUSTOM_FILTERS, end: END_CUSTOM_FILTERS },
    RecordInfo { begin: BEGIN_SORT_STATE, end: END_SORT_STATE },
    RecordInfo { begin: BEGIN_SORT_COND, end: END_SORT_COND },
];

/// Matching end record id when `id` opens a nested block.
pub fn end_record_for(id: u32) -> Option<u32> {
    RECORD_INFOS.iter().find(|info| info.begin == id).map(|info| info.end)
}

pub fn is_end_record(id: u32) -> bool {
    RECORD_INFOS.iter().any(|info| info.end == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_end_ids_pair_up() {
        assert_eq!(end_record_for(BEGIN_A_FILTER), Some(END_A_FILTER));
        assert_eq!(end_record_for(BEGIN_SORT_STATE), Some(END_SORT_STATE));
        assert_eq!(end_record_for(FILTER), None);
        assert!(is_end_record(END_CUSTOM_FILTERS));
        assert!(!is_end_record(BEGIN_CUSTOM_FILTERS));
    }
}
