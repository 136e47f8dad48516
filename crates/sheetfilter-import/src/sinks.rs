//! Payload import for the model types, one function (or trait impl) per sink.
//!
//! XML attribute import never fails: missing or malformed attributes fall back
//! to their schema defaults. Record import fails only when the payload is
//! shorter than its layout requires.

use sheetfilter_biff12::records::{self, custom_filter_type};
use sheetfilter_biff12::{Biff12Error, SequenceInputStream};
use sheetfilter_model::{
    AutoFilter, CalendarType, ColorFilter, CustomFilter, DiscreteFilter, FilterColumn,
    FilterCriterion, FilterOperator, FilterSettings, FilterValue, SheetRange, SortCondition,
    SortState, Top10Filter,
};

use crate::attributes::AttributeList;
use crate::token::Element;

/// Implemented by each filter settings variant.
pub trait SettingsImport {
    /// Import the attributes of `element` (the settings element itself or one of its children).
    fn import_attribs(&mut self, element: Element, attrs: &AttributeList);

    /// Import the payload of the record that maps to `element`.
    fn import_record(
        &mut self,
        element: Element,
        strm: &mut SequenceInputStream<'_>,
    ) -> Result<(), Biff12Error>;
}

fn parse_ref(sheet: u16, attrs: &AttributeList) -> Option<SheetRange> {
    let a1 = attrs.get_string("ref")?;
    match SheetRange::from_a1(sheet, a1) {
        Ok(range) => Some(range),
        Err(err) => {
            log::warn!("ignoring invalid ref {a1:?} on sheet {sheet}: {err}");
            None
        }
    }
}

pub fn import_auto_filter_attribs(af: &mut AutoFilter, attrs: &AttributeList, sheet: u16) {
    af.range = parse_ref(sheet, attrs);
}

/// `BrtBeginAFilter`: `rwFirst, rwLast, colFirst, colLast` as `i32`.
pub fn import_auto_filter_record(
    af: &mut AutoFilter,
    strm: &mut SequenceInputStream<'_>,
    sheet: u16,
) -> Result<(), Biff12Error> {
    let row_first = strm.read_i32()?;
    let row_last = strm.read_i32()?;
    let col_first = strm.read_i32()?;
    let col_last = strm.read_i32()?;
    af.range = Some(SheetRange::from_biff_rect(
        sheet, row_first, row_last, col_first, col_last,
    ));
    Ok(())
}

pub fn import_sort_state_attribs(state: &mut SortState, attrs: &AttributeList, sheet: u16) {
    state.range = parse_ref(sheet, attrs);
    state.case_sensitive = attrs.get_bool("caseSensitive").unwrap_or(false);
}

/// Resolves `ref` against the ambient sheet index.
pub fn import_sort_condition_attribs(
    condition: &mut SortCondition,
    attrs: &AttributeList,
    sheet: u16,
) {
    condition.range = parse_ref(sheet, attrs);
    condition.descending = attrs.get_bool("descending").unwrap_or(false);
    condition.custom_list = attrs
        .get_string("customList")
        .filter(|s| !s.is_empty())
        .map(str::to_string);
}

pub fn import_filter_column_attribs(column: &mut FilterColumn, attrs: &AttributeList) {
    column.col_id = attrs.get_u32("colId").unwrap_or(0);
    column.hidden_button = attrs.get_bool("hiddenButton").unwrap_or(false);
    column.show_button = attrs.get_bool("showButton").unwrap_or(true);
}

/// `BrtBeginFilterColumn`: `colId u32, flags u16`.
pub fn import_filter_column_record(
    column: &mut FilterColumn,
    strm: &mut SequenceInputStream<'_>,
) -> Result<(), Biff12Error> {
    column.col_id = strm.read_u32()?;
    let flags = strm.read_u16()?;
    column.hidden_button = flags & records::FILTER_COLUMN_HIDDEN_BUTTON != 0;
    column.show_button = flags & records::FILTER_COLUMN_SHOW_BUTTON != 0;
    Ok(())
}

impl SettingsImport for DiscreteFilter {
    fn import_attribs(&mut self, element: Element, attrs: &AttributeList) {
        match element {
            Element::Filters => {
                self.show_blank = attrs.get_bool("blank").unwrap_or(false);
                self.calendar_type = attrs
                    .get_string("calendarType")
                    .map(CalendarType::from_ooxml)
                    .unwrap_or_default();
            }
            // One entry per `filter`, passed through as written.
            Element::Filter => {
                self.values
                    .push(attrs.get_string("val").unwrap_or_default().to_string());
            }
            Element::DateGroupItem => {
                if let Some(value) = date_group_value(attrs) {
                    self.values.push(value);
                }
            }
            _ => {}
        }
    }

    fn import_record(
        &mut self,
        element: Element,
        strm: &mut SequenceInputStream<'_>,
    ) -> Result<(), Biff12Error> {
        match element {
            Element::Filters => {
                self.show_blank = strm.read_u32()? != 0;
                self.calendar_type = CalendarType::from_biff(strm.read_u32()?);
            }
            Element::Filter => {
                self.values.push(strm.read_xl_wide_string()?);
            }
            _ => {}
        }
        Ok(())
    }
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD` depending on `dateTimeGrouping`.
///
/// Hour/minute/second groupings have no value-list representation and are dropped.
fn date_group_value(attrs: &AttributeList) -> Option<String> {
    let grouping = attrs.get_string("dateTimeGrouping").unwrap_or("day");
    let depth = match grouping {
        "year" => 1,
        "month" => 2,
        "day" => 3,
        other => {
            log::debug!("ignoring dateGroupItem with dateTimeGrouping={other:?}");
            return None;
        }
    };

    let year = attrs.get_string("year").unwrap_or("").trim();
    if year.is_empty() {
        return None;
    }
    let mut value = year.to_string();
    for key in ["month", "day"].iter().take(depth - 1) {
        let part = attrs.get_string(key).unwrap_or("").trim();
        if part.is_empty() {
            log::debug!("ignoring dateGroupItem grouped by {grouping} without {key}");
            return None;
        }
        value.push('-');
        if part.len() == 1 {
            value.push('0');
        }
        value.push_str(part);
    }
    Some(value)
}

impl SettingsImport for Top10Filter {
    fn import_attribs(&mut self, element: Element, attrs: &AttributeList) {
        if element == Element::Top10 {
            self.value = attrs.get_f64("val").unwrap_or(0.0);
            self.top = attrs.get_bool("top").unwrap_or(true);
            self.percent = attrs.get_bool("percent").unwrap_or(false);
        }
    }

    fn import_record(
        &mut self,
        element: Element,
        strm: &mut SequenceInputStream<'_>,
    ) -> Result<(), Biff12Error> {
        if element == Element::Top10 {
            let flags = strm.read_u32()?;
            self.value = strm.read_f64()?;
            self.top = flags & records::TOP10_FILTER_TOP != 0;
            self.percent = flags & records::TOP10_FILTER_PERCENT != 0;
        }
        Ok(())
    }
}

impl SettingsImport for CustomFilter {
    fn import_attribs(&mut self, element: Element, attrs: &AttributeList) {
        match element {
            Element::CustomFilters => {
                self.and = attrs.get_bool("and").unwrap_or(false);
            }
            Element::CustomFilter => {
                let operator = match attrs.get_string("operator") {
                    None => FilterOperator::Equal,
                    Some(name) => match FilterOperator::from_ooxml(name) {
                        Some(op) => op,
                        None => {
                            log::debug!("dropping customFilter with operator {name:?}");
                            return;
                        }
                    },
                };
                let raw = attrs.get_xstring("val").unwrap_or_default();
                if let Some(value) = text_criterion_value(operator, raw.trim()) {
                    self.append_criterion(FilterCriterion { operator, value });
                }
            }
            _ => {}
        }
    }

    fn import_record(
        &mut self,
        element: Element,
        strm: &mut SequenceInputStream<'_>,
    ) -> Result<(), Biff12Error> {
        match element {
            Element::CustomFilters => {
                self.and = strm.read_u32()? != 0;
            }
            Element::CustomFilter => {
                let value_type = strm.read_u8()?;
                let op_code = strm.read_u8()?;
                let operator = FilterOperator::from_biff(op_code);
                let value = read_criterion_value(value_type, operator, strm)?;
                match (operator, value) {
                    (Some(operator), Some(value)) => {
                        self.append_criterion(FilterCriterion { operator, value });
                    }
                    (None, _) => log::debug!("dropping BrtCustomFilter with operator {op_code}"),
                    (Some(_), None) => {
                        log::debug!("dropping BrtCustomFilter with value type {value_type}")
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// An empty value only makes sense as a blank test; numeric text compares as a number.
fn text_criterion_value(operator: FilterOperator, text: &str) -> Option<FilterValue> {
    if text.is_empty() {
        return matches!(operator, FilterOperator::Equal | FilterOperator::NotEqual)
            .then_some(FilterValue::Empty);
    }
    Some(match text.parse::<f64>() {
        Ok(n) if n.is_finite() => FilterValue::Number(n),
        _ => FilterValue::Text(text.to_string()),
    })
}

/// The 8 value bytes of a `BrtCustomFilter` record, followed by the string for string values.
fn read_criterion_value(
    value_type: u8,
    operator: Option<FilterOperator>,
    strm: &mut SequenceInputStream<'_>,
) -> Result<Option<FilterValue>, Biff12Error> {
    Ok(match value_type {
        custom_filter_type::DOUBLE => Some(FilterValue::Number(strm.read_f64()?)),
        custom_filter_type::RK => {
            let value = strm.read_rk_number()?;
            strm.skip(4)?;
            Some(FilterValue::Number(value))
        }
        custom_filter_type::STRING => {
            strm.skip(8)?;
            let text = strm.read_xl_wide_string()?;
            match operator {
                Some(op) => text_criterion_value(op, text.trim()).map(|v| match v {
                    // Typed as a string in the record; do not reinterpret digits.
                    FilterValue::Number(_) => FilterValue::Text(text.trim().to_string()),
                    other => other,
                }),
                None => None,
            }
        }
        custom_filter_type::BOOLEAN => {
            let value = strm.read_u8()? != 0;
            strm.skip(7)?;
            Some(FilterValue::Bool(value))
        }
        custom_filter_type::EMPTY => {
            strm.skip(8)?;
            (operator == Some(FilterOperator::Equal)).then_some(FilterValue::Empty)
        }
        custom_filter_type::NOT_EMPTY => {
            strm.skip(8)?;
            (operator == Some(FilterOperator::NotEqual)).then_some(FilterValue::Empty)
        }
        // NONE, errors and unknown types carry no usable value.
        _ => {
            strm.skip(8)?;
            None
        }
    })
}

impl SettingsImport for ColorFilter {
    fn import_attribs(&mut self, element: Element, attrs: &AttributeList) {
        if element == Element::ColorFilter {
            self.dxf_id = attrs.get_u32("dxfId");
            self.cell_color = attrs.get_bool("cellColor").unwrap_or(true);
        }
    }

    fn import_record(
        &mut self,
        _element: Element,
        _strm: &mut SequenceInputStream<'_>,
    ) -> Result<(), Biff12Error> {
        // Never dispatched: BrtColorFilter is not imported.
        Ok(())
    }
}

impl SettingsImport for FilterSettings {
    fn import_attribs(&mut self, element: Element, attrs: &AttributeList) {
        match self {
            FilterSettings::Discrete(f) => f.import_attribs(element, attrs),
            FilterSettings::Top10(f) => f.import_attribs(element, attrs),
            FilterSettings::Custom(f) => f.import_attribs(element, attrs),
            FilterSettings::Color(f) => f.import_attribs(element, attrs),
        }
    }

    fn import_record(
        &mut self,
        element: Element,
        strm: &mut SequenceInputStream<'_>,
    ) -> Result<(), Biff12Error> {
        match self {
            FilterSettings::Discrete(f) => f.import_record(element, strm),
            FilterSettings::Top10(f) => f.import_record(element, strm),
            FilterSettings::Custom(f) => f.import_record(element, strm),
            FilterSettings::Color(f) => f.import_record(element, strm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeList {
        AttributeList::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn date_group_items_pad_and_truncate_by_grouping() {
        let mut f = DiscreteFilter::default();
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2024"), ("month", "3"), ("day", "7"), ("dateTimeGrouping", "day")]),
        );
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2023"), ("month", "11"), ("dateTimeGrouping", "month")]),
        );
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2022"), ("month", "1"), ("dateTimeGrouping", "year")]),
        );
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2021"), ("hour", "4"), ("dateTimeGrouping", "hour")]),
        );
        assert_eq!(f.values, vec!["2024-03-07", "2023-11", "2022"]);
    }

    #[test]
    fn filter_values_are_kept_verbatim() {
        let mut f = DiscreteFilter::default();
        f.import_attribs(Element::Filter, &attrs(&[("val", "a")]));
        f.import_attribs(Element::Filter, &attrs(&[("val", "")]));
        f.import_attribs(Element::Filter, &attrs(&[("val", "x_x0041_y")]));
        f.import_attribs(Element::Filter, &attrs(&[("val", " x ")]));
        assert_eq!(f.values, vec!["a", "", "x_x0041_y", " x "]);
    }

    #[test]
    fn filter_records_are_kept_verbatim() {
        let mut f = DiscreteFilter::default();
        let mut blank = 1u32.to_le_bytes().to_vec();
        blank.extend_from_slice(&0u32.to_le_bytes());
        f.import_record(Element::Filters, &mut SequenceInputStream::new(&blank))
            .unwrap();
        // Zero-length XLWideString.
        f.import_record(Element::Filter, &mut SequenceInputStream::new(&[0, 0, 0, 0]))
            .unwrap();
        assert!(f.show_blank);
        assert_eq!(f.values, vec![""]);
    }

    #[test]
    fn date_group_items_missing_required_parts_are_dropped() {
        let mut f = DiscreteFilter::default();
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2023"), ("dateTimeGrouping", "month")]),
        );
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2023"), ("month", "5"), ("dateTimeGrouping", "day")]),
        );
        f.import_attribs(
            Element::DateGroupItem,
            &attrs(&[("year", "2023"), ("month", ""), ("day", "4"), ("dateTimeGrouping", "day")]),
        );
        assert!(f.values.is_empty());
    }

    #[test]
    fn custom_filter_xml_values() {
        let mut f = CustomFilter::default();
        f.import_attribs(Element::CustomFilters, &attrs(&[("and", "1")]));
        f.import_attribs(
            Element::CustomFilter,
            &attrs(&[("operator", "greaterThan"), ("val", " 10 ")]),
        );
        f.import_attribs(Element::CustomFilter, &attrs(&[("val", "")]));
        assert!(f.and);
        assert_eq!(
            f.criteria,
            vec![
                FilterCriterion {
                    operator: FilterOperator::GreaterThan,
                    value: FilterValue::Number(10.0)
                },
                FilterCriterion {
                    operator: FilterOperator::Equal,
                    value: FilterValue::Empty
                },
            ]
        );
    }

    #[test]
    fn custom_filter_drops_unknown_operators_and_valueless_comparisons() {
        let mut f = CustomFilter::default();
        f.import_attribs(
            Element::CustomFilter,
            &attrs(&[("operator", "between"), ("val", "1")]),
        );
        f.import_attribs(Element::CustomFilter, &attrs(&[("operator", "lessThan")]));
        assert!(f.criteria.is_empty());
    }

    #[test]
    fn custom_filter_record_value_types() {
        let mut payload = vec![custom_filter_type::STRING, 2];
        payload.extend_from_slice(&[0; 8]);
        payload.extend_from_slice(&2u32.to_le_bytes());
        for unit in "42".encode_utf16() {
            payload.extend_from_slice(&unit.to_le_bytes());
        }

        let mut f = CustomFilter::default();
        f.import_record(Element::CustomFilter, &mut SequenceInputStream::new(&payload))
            .unwrap();

        let mut empty = vec![custom_filter_type::NOT_EMPTY, 5];
        empty.extend_from_slice(&[0; 8]);
        f.import_record(Element::CustomFilter, &mut SequenceInputStream::new(&empty))
            .unwrap();

        assert_eq!(
            f.criteria,
            vec![
                FilterCriterion {
                    operator: FilterOperator::Equal,
                    value: FilterValue::Text("42".into())
                },
                FilterCriterion {
                    operator: FilterOperator::NotEqual,
                    value: FilterValue::Empty
                },
            ]
        );
    }

    #[test]
    fn truncated_custom_filter_record_is_an_error() {
        let payload = [custom_filter_type::DOUBLE, 2, 0, 0];
        let mut f = CustomFilter::default();
        assert!(f
            .import_record(Element::CustomFilter, &mut SequenceInputStream::new(&payload))
            .is_err());
        assert!(f.criteria.is_empty());
    }

    #[test]
    fn sort_condition_uses_ambient_sheet() {
        let mut condition = SortCondition::default();
        import_sort_condition_attribs(
            &mut condition,
            &attrs(&[("ref", "B1:B10"), ("descending", "1"), ("customList", "")]),
            2,
        );
        assert_eq!(condition.range, Some(SheetRange::from_a1(2, "B1:B10").unwrap()));
        assert!(condition.descending);
        assert_eq!(condition.custom_list, None);
    }

    #[test]
    fn invalid_refs_leave_ranges_unset() {
        let mut af = AutoFilter::new();
        import_auto_filter_attribs(&mut af, &attrs(&[("ref", "not a ref")]), 0);
        assert_eq!(af.range, None);
    }
}
