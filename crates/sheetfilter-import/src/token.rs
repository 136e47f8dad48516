use sheetfilter_biff12::records;

/// Markup encoding of a worksheet part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// SpreadsheetML (`xl/worksheets/sheetN.xml`).
    Xml,
    /// BIFF12 records (`xl/worksheets/sheetN.bin`).
    Biff12,
}

/// Logical elements of an AutoFilter block, shared by both dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    AutoFilter,
    SortState,
    SortCondition,
    FilterColumn,
    Filters,
    Filter,
    DateGroupItem,
    Top10,
    CustomFilters,
    CustomFilter,
    ColorFilter,
    /// Recognized but never dispatched; its subtree is skipped.
    DynamicFilter,
    /// Recognized but never dispatched; its subtree is skipped.
    IconFilter,
}

impl Element {
    /// Map a SpreadsheetML local name (namespace prefix already stripped).
    pub fn from_xml_name(local_name: &[u8]) -> Option<Self> {
        Some(match local_name {
            b"autoFilter" => Element::AutoFilter,
            b"sortState" => Element::SortState,
            b"sortCondition" => Element::SortCondition,
            b"filterColumn" => Element::FilterColumn,
            b"filters" => Element::Filters,
            b"filter" => Element::Filter,
            b"dateGroupItem" => Element::DateGroupItem,
            b"top10" => Element::Top10,
            b"customFilters" => Element::CustomFilters,
            b"customFilter" => Element::CustomFilter,
            b"colorFilter" => Element::ColorFilter,
            b"dynamicFilter" => Element::DynamicFilter,
            b"iconFilter" => Element::IconFilter,
            _ => return None,
        })
    }

    /// Map a BIFF12 record id. Begin records map to their block element, end
    /// records map to nothing.
    pub fn from_record_id(id: u32) -> Option<Self> {
        Some(match id {
            records::BEGIN_A_FILTER => Element::AutoFilter,
            records::BEGIN_SORT_STATE => Element::SortState,
            records::BEGIN_SORT_COND => Element::SortCondition,
            records::BEGIN_FILTER_COLUMN => Element::FilterColumn,
            records::BEGIN_FILTERS => Element::Filters,
            records::FILTER => Element::Filter,
            records::A_FILTER_DATE_GROUP_ITEM => Element::DateGroupItem,
            records::TOP10_FILTER => Element::Top10,
            records::BEGIN_CUSTOM_FILTERS => Element::CustomFilters,
            records::CUSTOM_FILTER => Element::CustomFilter,
            records::COLOR_FILTER => Element::ColorFilter,
            records::DYNAMIC_FILTER => Element::DynamicFilter,
            records::ICON_FILTER => Element::IconFilter,
            _ => return None,
        })
    }

    pub fn xml_name(self) -> &'static str {
        match self {
            Element::AutoFilter => "autoFilter",
            Element::SortState => "sortState",
            Element::SortCondition => "sortCondition",
            Element::FilterColumn => "filterColumn",
            Element::Filters => "filters",
            Element::Filter => "filter",
            Element::DateGroupItem => "dateGroupItem",
            Element::Top10 => "top10",
            Element::CustomFilters => "customFilters",
            Element::CustomFilter => "customFilter",
            Element::ColorFilter => "colorFilter",
            Element::DynamicFilter => "dynamicFilter",
            Element::IconFilter => "iconFilter",
        }
    }
}

/// An element tagged with the dialect it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub dialect: Dialect,
    pub element: Element,
}

impl Token {
    pub const fn xml(element: Element) -> Self {
        Self {
            dialect: Dialect::Xml,
            element,
        }
    }

    pub const fn biff12(element: Element) -> Self {
        Self {
            dialect: Dialect::Biff12,
            element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_names_roundtrip() {
        for element in [
            Element::AutoFilter,
            Element::SortState,
            Element::SortCondition,
            Element::FilterColumn,
            Element::Filters,
            Element::Filter,
            Element::DateGroupItem,
            Element::Top10,
            Element::CustomFilters,
            Element::CustomFilter,
            Element::ColorFilter,
            Element::DynamicFilter,
            Element::IconFilter,
        ] {
            assert_eq!(
                Element::from_xml_name(element.xml_name().as_bytes()),
                Some(element)
            );
        }
        assert_eq!(Element::from_xml_name(b"AutoFilter"), None);
    }

    #[test]
    fn end_records_are_not_elements() {
        assert_eq!(
            Element::from_record_id(records::BEGIN_FILTER_COLUMN),
            Some(Element::FilterColumn)
        );
        assert_eq!(Element::from_record_id(records::END_FILTER_COLUMN), None);
        assert_eq!(Element::from_record_id(records::END_A_FILTER), None);
    }
}
