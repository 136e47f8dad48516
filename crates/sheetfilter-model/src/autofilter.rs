use serde::{Deserialize, Serialize};

use crate::SheetRange;

/// Calendar used to interpret grouped date values of a discrete filter
/// (`filters/@calendarType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarType {
    #[default]
    None,
    Gregorian,
    GregorianUs,
    Japan,
    Taiwan,
    Korea,
    Hijri,
    Thai,
    Hebrew,
    GregorianMeFrench,
    GregorianArabic,
    GregorianXlitEnglish,
    GregorianXlitFrench,
}

impl CalendarType {
    /// Index order of the BIFF12 `calendarType` field.
    const BIFF_ORDER: [CalendarType; 13] = [
        CalendarType::None,
        CalendarType::Gregorian,
        CalendarType::GregorianUs,
        CalendarType::Japan,
        CalendarType::Taiwan,
        CalendarType::Korea,
        CalendarType::Hijri,
        CalendarType::Thai,
        CalendarType::Hebrew,
        CalendarType::GregorianMeFrench,
        CalendarType::GregorianArabic,
        CalendarType::GregorianXlitEnglish,
        CalendarType::GregorianXlitFrench,
    ];

    /// Parse an `ST_CalendarType` value. Unknown names fall back to [`CalendarType::None`].
    pub fn from_ooxml(name: &str) -> Self {
        match name {
            "gregorian" => CalendarType::Gregorian,
            "gregorianUs" => CalendarType::GregorianUs,
            "japan" => CalendarType::Japan,
            "taiwan" => CalendarType::Taiwan,
            "korea" => CalendarType::Korea,
            "hijri" => CalendarType::Hijri,
            "thai" => CalendarType::Thai,
            "hebrew" => CalendarType::Hebrew,
            "gregorianMeFrench" => CalendarType::GregorianMeFrench,
            "gregorianArabic" => CalendarType::GregorianArabic,
            "gregorianXlitEnglish" => CalendarType::GregorianXlitEnglish,
            "gregorianXlitFrench" => CalendarType::GregorianXlitFrench,
            _ => CalendarType::None,
        }
    }

    pub fn from_biff(code: u32) -> Self {
        Self::BIFF_ORDER
            .get(code as usize)
            .copied()
            .unwrap_or(CalendarType::None)
    }
}

/// Comparison operator of a custom filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl FilterOperator {
    /// Parse an `ST_FilterOperator` name.
    pub fn from_ooxml(name: &str) -> Option<Self> {
        Some(match name {
            "equal" => FilterOperator::Equal,
            "notEqual" => FilterOperator::NotEqual,
            "lessThan" => FilterOperator::LessThan,
            "lessThanOrEqual" => FilterOperator::LessThanOrEqual,
            "greaterThan" => FilterOperator::GreaterThan,
            "greaterThanOrEqual" => FilterOperator::GreaterThanOrEqual,
            _ => return None,
        })
    }

    /// Map the operator byte of a BIFF12 `BrtCustomFilter` record.
    pub fn from_biff(code: u8) -> Option<Self> {
        Some(match code {
            1 => FilterOperator::LessThan,
            2 => FilterOperator::Equal,
            3 => FilterOperator::LessThanOrEqual,
            4 => FilterOperator::GreaterThan,
            5 => FilterOperator::NotEqual,
            6 => FilterOperator::GreaterThanOrEqual,
            _ => return None,
        })
    }

    pub fn as_ooxml(self) -> &'static str {
        match self {
            FilterOperator::Equal => "equal",
            FilterOperator::NotEqual => "notEqual",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::LessThanOrEqual => "lessThanOrEqual",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::GreaterThanOrEqual => "greaterThanOrEqual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Matches blank cells (`equal`) or non-blank cells (`notEqual`).
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub operator: FilterOperator,
    pub value: FilterValue,
}

/// Value-list filter (`<filters>`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscreteFilter {
    /// Accepted values in document order. Grouped dates are stored as
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default)]
    pub show_blank: bool,
    #[serde(default)]
    pub calendar_type: CalendarType,
}

/// `<top10>` filter: keep the top/bottom N items or N percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Top10Filter {
    pub value: f64,
    pub top: bool,
    pub percent: bool,
}

impl Default for Top10Filter {
    fn default() -> Self {
        Self {
            value: 0.0,
            top: true,
            percent: false,
        }
    }
}

/// Up to two comparison criteria (`<customFilters>`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomFilter {
    /// All criteria must match when set, otherwise any criterion may match.
    #[serde(default)]
    pub and: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<FilterCriterion>,
}

impl CustomFilter {
    /// OOXML allows at most two `customFilter` children.
    pub const MAX_CRITERIA: usize = 2;

    /// Append a criterion. Returns `false` when the criterion was dropped
    /// because the filter is already full.
    pub fn append_criterion(&mut self, criterion: FilterCriterion) -> bool {
        if self.criteria.len() >= Self::MAX_CRITERIA {
            log::warn!(
                "dropping custom filter criterion {:?}: at most {} are supported",
                criterion.operator,
                Self::MAX_CRITERIA
            );
            return false;
        }
        self.criteria.push(criterion);
        true
    }
}

/// Filter by cell or font color (`<colorFilter>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFilter {
    /// Differential format holding the color to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dxf_id: Option<u32>,
    /// `true` to match the cell fill, `false` to match the font color.
    pub cell_color: bool,
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self {
            dxf_id: None,
            cell_color: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Discrete,
    Top10,
    Custom,
    Color,
}

/// The single filter definition a [`FilterColumn`] carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSettings {
    Discrete(DiscreteFilter),
    Top10(Top10Filter),
    Custom(CustomFilter),
    Color(ColorFilter),
}

impl FilterSettings {
    pub fn new(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Discrete => FilterSettings::Discrete(DiscreteFilter::default()),
            FilterKind::Top10 => FilterSettings::Top10(Top10Filter::default()),
            FilterKind::Custom => FilterSettings::Custom(CustomFilter::default()),
            FilterKind::Color => FilterSettings::Color(ColorFilter::default()),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterSettings::Discrete(_) => FilterKind::Discrete,
            FilterSettings::Top10(_) => FilterKind::Top10,
            FilterSettings::Custom(_) => FilterKind::Custom,
            FilterSettings::Color(_) => FilterKind::Color,
        }
    }
}

/// Filter configuration of one column within an AutoFilter range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterColumn {
    /// 0-based column offset within the AutoFilter range (`filterColumn/@colId`).
    pub col_id: u32,
    #[serde(default)]
    pub hidden_button: bool,
    pub show_button: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FilterSettings>,
}

impl Default for FilterColumn {
    fn default() -> Self {
        Self {
            col_id: 0,
            hidden_button: false,
            show_button: true,
            settings: None,
        }
    }
}

impl FilterColumn {
    /// Create the settings object of `kind`, replacing whatever the column held before.
    pub fn create_filter_settings(&mut self, kind: FilterKind) -> &mut FilterSettings {
        self.settings.insert(FilterSettings::new(kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SheetRange>,
    #[serde(default)]
    pub descending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_list: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SheetRange>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<SortCondition>,
}

/// Worksheet-level AutoFilter state (`<autoFilter>` / `BrtBeginAFilter`).
///
/// Columns and sort conditions are addressed by index so import contexts can
/// refer to them while the importer holds `&mut AutoFilter`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SheetRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<FilterColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_state: Option<SortState>,
}

impl AutoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new column and return its index.
    pub fn create_filter_column(&mut self) -> usize {
        self.columns.push(FilterColumn::default());
        self.columns.len() - 1
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut FilterColumn> {
        self.columns.get_mut(index)
    }

    /// The sort state, created on first use.
    pub fn sort_state_mut(&mut self) -> &mut SortState {
        self.sort_state.get_or_insert_with(SortState::default)
    }

    /// Append a new sort condition (document order) and return its index.
    pub fn create_sort_condition(&mut self) -> usize {
        let state = self.sort_state_mut();
        state.conditions.push(SortCondition::default());
        state.conditions.len() - 1
    }

    pub fn sort_condition_mut(&mut self, index: usize) -> Option<&mut SortCondition> {
        self.sort_state.as_mut()?.conditions.get_mut(index)
    }
}
