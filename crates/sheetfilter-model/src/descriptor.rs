//! Engine-facing view of an imported [`AutoFilter`].
//!
//! The import model mirrors the file formats (one settings object per column,
//! raw sort references). A filter/sort engine wants per-field conditions and
//! sort keys relative to the filtered range instead; [`AutoFilter::finalize`]
//! performs that conversion.

use serde::{Deserialize, Serialize};

use crate::autofilter::{
    AutoFilter, ColorFilter, CustomFilter, DiscreteFilter, FilterOperator, FilterSettings,
    FilterValue, Top10Filter,
};
use crate::SheetRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterConnector {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Compare {
        operator: FilterOperator,
        value: FilterValue,
    },
    Top {
        count_or_percent: f64,
        top: bool,
        percent: bool,
    },
    CellColor {
        dxf_id: Option<u32>,
        background: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// 0-based column offset within [`FilterDescriptor::range`].
    pub column: u32,
    pub connector: FilterConnector,
    pub conditions: Vec<FilterCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// 0-based column offset within [`SortDescriptor::range`].
    pub column: u32,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub range: SheetRange,
    pub case_sensitive: bool,
    pub keys: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub range: SheetRange,
    pub fields: Vec<FilterField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDescriptor>,
}

impl AutoFilter {
    /// Build the engine-facing descriptor. Returns `None` without a valid range.
    pub fn finalize(&self) -> Option<FilterDescriptor> {
        let range = self.range?;
        let width = range.range.width();

        let mut fields = Vec::new();
        for column in &self.columns {
            if column.col_id >= width {
                log::warn!(
                    "skipping filter column {} outside AutoFilter range {range} (width {width})",
                    column.col_id
                );
                continue;
            }
            let Some(settings) = column.settings.as_ref() else {
                continue;
            };
            if let Some((connector, conditions)) = field_conditions(settings) {
                fields.push(FilterField {
                    column: column.col_id,
                    connector,
                    conditions,
                });
            }
        }

        Some(FilterDescriptor {
            range,
            fields,
            sort: self.sort_descriptor(range),
        })
    }

    fn sort_descriptor(&self, filter_range: SheetRange) -> Option<SortDescriptor> {
        let state = self.sort_state.as_ref()?;
        let range = state.range.unwrap_or(filter_range);

        let mut keys = Vec::new();
        for condition in &state.conditions {
            let Some(key_range) = condition.range else {
                continue;
            };
            let col = key_range.range.start.col;
            if col < range.range.start.col || col > range.range.end.col {
                log::warn!("skipping sort condition {key_range} outside sort range {range}");
                continue;
            }
            keys.push(SortKey {
                column: col - range.range.start.col,
                descending: condition.descending,
            });
        }

        Some(SortDescriptor {
            range,
            case_sensitive: state.case_sensitive,
            keys,
        })
    }
}

fn field_conditions(settings: &FilterSettings) -> Option<(FilterConnector, Vec<FilterCondition>)> {
    match settings {
        FilterSettings::Discrete(discrete) => discrete_conditions(discrete),
        FilterSettings::Top10(top10) => Some((FilterConnector::And, vec![top10_condition(top10)])),
        FilterSettings::Custom(custom) => custom_conditions(custom),
        FilterSettings::Color(color) => Some((FilterConnector::And, vec![color_condition(color)])),
    }
}

fn discrete_conditions(filter: &DiscreteFilter) -> Option<(FilterConnector, Vec<FilterCondition>)> {
    let mut conditions: Vec<FilterCondition> = filter
        .values
        .iter()
        .map(|v| FilterCondition::Compare {
            operator: FilterOperator::Equal,
            value: FilterValue::Text(v.clone()),
        })
        .collect();
    if filter.show_blank {
        conditions.push(FilterCondition::Compare {
            operator: FilterOperator::Equal,
            value: FilterValue::Empty,
        });
    }
    if conditions.is_empty() {
        return None;
    }
    Some((FilterConnector::Or, conditions))
}

fn top10_condition(filter: &Top10Filter) -> FilterCondition {
    FilterCondition::Top {
        count_or_percent: filter.value,
        top: filter.top,
        percent: filter.percent,
    }
}

fn custom_conditions(filter: &CustomFilter) -> Option<(FilterConnector, Vec<FilterCondition>)> {
    if filter.criteria.is_empty() {
        return None;
    }
    let connector = if filter.and {
        FilterConnector::And
    } else {
        FilterConnector::Or
    };
    let conditions = filter
        .criteria
        .iter()
        .map(|c| FilterCondition::Compare {
            operator: c.operator,
            value: c.value.clone(),
        })
        .collect();
    Some((connector, conditions))
}

fn color_condition(filter: &ColorFilter) -> FilterCondition {
    FilterCondition::CellColor {
        dxf_id: filter.dxf_id,
        background: filter.cell_color,
    }
}
