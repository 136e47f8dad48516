//! `sheetfilter-model` defines the AutoFilter / SortState object graph that the
//! worksheet importers populate.
//!
//! The crate is format-agnostic: XML and BIFF12 decoding live in
//! `sheetfilter-import`, which fills these types through the `create_*`
//! methods and public fields. [`AutoFilter::finalize`] turns an imported
//! model into the [`FilterDescriptor`] consumed by a filter/sort engine.

mod address;
pub mod autofilter;
pub mod descriptor;

pub use address::{
    A1ParseError, CellRef, Range, RangeParseError, SheetRange, EXCEL_MAX_COLS, EXCEL_MAX_ROWS,
};
pub use autofilter::{
    AutoFilter, CalendarType, ColorFilter, CustomFilter, DiscreteFilter, FilterColumn,
    FilterCriterion, FilterKind, FilterOperator, FilterSettings, FilterValue, SortCondition,
    SortState, Top10Filter,
};
pub use descriptor::{
    FilterCondition, FilterConnector, FilterDescriptor, FilterField, SortDescriptor, SortKey,
};
