mod common;

use common::SheetStream;
use pretty_assertions::assert_eq;
use sheetfilter_biff12::records;
use sheetfilter_import::{
    import_autofilter_biff12, import_autofilter_xml, ImportError, ImportOptions,
};
use sheetfilter_model::{AutoFilter, FilterKind, FilterSettings, SheetRange};

const HIDDEN: u16 = records::FILTER_COLUMN_HIDDEN_BUTTON;
const SHOWN: u16 = records::FILTER_COLUMN_SHOW_BUTTON;

fn import_bin(data: &[u8], sheet: u16) -> AutoFilter {
    import_autofilter_biff12(data, sheet, &ImportOptions::default())
        .unwrap()
        .expect("BrtBeginAFilter present")
}

#[test]
fn xml_and_biff12_encodings_import_equally_except_sort_state() {
    let xml = r#"<autoFilter ref="A1:D20">
        <filterColumn colId="0">
            <filters blank="1"><filter val="a"/><filter val=""/><filter val="b"/></filters>
        </filterColumn>
        <filterColumn colId="1"><top10 top="0" percent="1" val="5"/></filterColumn>
        <filterColumn colId="2">
            <customFilters and="1">
                <customFilter operator="greaterThan" val="3"/>
                <customFilter operator="notEqual" val="foo"/>
            </customFilters>
        </filterColumn>
        <filterColumn colId="3" hiddenButton="1" showButton="0"/>
        <sortState ref="A2:D20"><sortCondition ref="B2:B20" descending="1"/></sortState>
    </autoFilter>"#;

    let bin = SheetStream::new()
        .begin_autofilter(0, 19, 0, 3)
        .begin_filter_column(0, SHOWN)
        .begin_filters(true, 0)
        .filter("a")
        .filter("")
        .filter("b")
        .end_filters()
        .end_filter_column()
        .begin_filter_column(1, SHOWN)
        .top10(false, true, 5.0)
        .end_filter_column()
        .begin_filter_column(2, SHOWN)
        .begin_custom_filters(true)
        .custom_filter_number(4, 3.0)
        .custom_filter_text(5, "foo")
        .end_custom_filters()
        .end_filter_column()
        .begin_filter_column(3, HIDDEN)
        .end_filter_column()
        // BrtBeginSortState: flags, rect, condition count. Never imported.
        .record(records::BEGIN_SORT_STATE, vec![0; 22])
        .record(records::BEGIN_SORT_COND, vec![0; 20])
        .record(records::END_SORT_COND, Vec::new())
        .record(records::END_SORT_STATE, Vec::new())
        .end_autofilter()
        .finish();

    let from_xml = import_autofilter_xml(xml, 0, &ImportOptions::default())
        .unwrap()
        .unwrap();
    let from_bin = import_bin(&bin, 0);

    assert!(from_xml.sort_state.is_some());
    assert_eq!(from_bin.sort_state, None);

    let mut expected = from_xml;
    expected.sort_state = None;
    assert_eq!(from_bin, expected);
}

#[test]
fn color_filter_and_date_group_records_are_not_imported() {
    let bin = SheetStream::new()
        .begin_autofilter(0, 9, 0, 1)
        .begin_filter_column(0, SHOWN)
        .record(records::COLOR_FILTER, vec![1, 0, 0, 0, 4, 0, 0, 0])
        .end_filter_column()
        .begin_filter_column(1, SHOWN)
        .begin_filters(false, 0)
        .filter("kept")
        .record(records::A_FILTER_DATE_GROUP_ITEM, vec![0; 24])
        .end_filters()
        .end_filter_column()
        .end_autofilter()
        .finish();

    let af = import_bin(&bin, 0);
    assert_eq!(af.columns.len(), 2);
    assert_eq!(af.columns[0].settings, None);
    match &af.columns[1].settings {
        Some(FilterSettings::Discrete(d)) => assert_eq!(d.values, vec!["kept"]),
        other => panic!("expected discrete settings, got {other:?}"),
    }
}

#[test]
fn unknown_records_are_skipped_without_touching_siblings() {
    let bin = SheetStream::new()
        .record(0x0081, vec![0; 4])
        .begin_autofilter(0, 9, 0, 2)
        .begin_filter_column(0, SHOWN)
        .record(records::DYNAMIC_FILTER, vec![0; 24])
        .end_filter_column()
        .begin_filter_column(1, SHOWN)
        .record(records::ICON_FILTER, vec![0; 8])
        .record(0x1234, vec![0xFF; 3])
        .end_filter_column()
        .begin_filter_column(2, SHOWN)
        .top10(true, false, 7.0)
        .end_filter_column()
        .end_autofilter()
        .finish();

    let af = import_bin(&bin, 0);
    let col_ids: Vec<u32> = af.columns.iter().map(|c| c.col_id).collect();
    assert_eq!(col_ids, vec![0, 1, 2]);
    assert_eq!(af.columns[0].settings, None);
    assert_eq!(af.columns[1].settings, None);
    assert_eq!(
        af.columns[2].settings.as_ref().map(FilterSettings::kind),
        Some(FilterKind::Top10)
    );
}

#[test]
fn last_filter_kind_wins_in_records_too() {
    let bin = SheetStream::new()
        .begin_autofilter(0, 9, 0, 0)
        .begin_filter_column(0, SHOWN)
        .begin_custom_filters(false)
        .custom_filter_number(2, 1.0)
        .end_custom_filters()
        .top10(true, false, 3.0)
        .end_filter_column()
        .end_autofilter()
        .finish();

    let af = import_bin(&bin, 0);
    assert_eq!(
        af.columns[0].settings.as_ref().map(FilterSettings::kind),
        Some(FilterKind::Top10)
    );

    let err = import_autofilter_biff12(&bin[..], 0, &ImportOptions::strict()).unwrap_err();
    assert!(
        matches!(err, ImportError::DuplicateFilterSettings { col_id: 0 }),
        "{err:?}"
    );
}

#[test]
fn autofilter_rect_is_qualified_with_the_sheet_index() {
    let bin = SheetStream::new()
        .begin_autofilter(0, 9, 1, 1)
        .end_autofilter()
        .finish();
    let af = import_bin(&bin, 2);
    assert_eq!(af.range, Some(SheetRange::from_a1(2, "B1:B10").unwrap()));
}

#[test]
fn only_the_first_autofilter_block_is_imported() {
    let bin = SheetStream::new()
        .begin_autofilter(0, 9, 0, 0)
        .begin_filter_column(0, SHOWN)
        .end_filter_column()
        .end_autofilter()
        .begin_autofilter(0, 4, 0, 4)
        .begin_filter_column(3, SHOWN)
        .end_filter_column()
        .end_autofilter()
        .finish();
    let af = import_bin(&bin, 0);
    assert_eq!(af.range, Some(SheetRange::from_a1(0, "A1:A10").unwrap()));
    assert_eq!(af.columns.len(), 1);
}

#[test]
fn stray_end_record_inside_block_is_unbalanced() {
    let bin = SheetStream::new()
        .begin_autofilter(0, 9, 0, 0)
        .end_filters()
        .finish();
    let err = import_autofilter_biff12(&bin[..], 0, &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(
            err,
            ImportError::UnbalancedRecord {
                expected: Some(records::END_A_FILTER),
                found: records::END_FILTERS,
            }
        ),
        "{err:?}"
    );
}
