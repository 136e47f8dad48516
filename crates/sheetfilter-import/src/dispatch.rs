//! The single parent/child table both dialects dispatch through.
//!
//! Each rule says which child a parent element accepts, in which dialects, and
//! what kind of context the child gets. Dialect gaps are spelled out as
//! [`Coverage::XmlOnly`] entries instead of being missing match arms in two
//! independently maintained dispatchers.

use sheetfilter_model::FilterKind;

use crate::token::{Dialect, Element, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Both,
    XmlOnly,
}

impl Coverage {
    pub fn covers(self, dialect: Dialect) -> bool {
        match self {
            Coverage::Both => true,
            Coverage::XmlOnly => dialect == Dialect::Xml,
        }
    }
}

/// What the parent context produces for an accepted child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    SortState,
    /// Append a sort condition and wrap it.
    SortCondition,
    /// Append a filter column and wrap it.
    FilterColumn,
    /// Create (or replace) the column's settings with this kind and wrap them.
    FilterSettings(FilterKind),
    /// Keep feeding the current settings object.
    Reuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub parent: Element,
    pub child: Element,
    pub coverage: Coverage,
    pub spawn: Spawn,
}

const fn rule(parent: Element, child: Element, coverage: Coverage, spawn: Spawn) -> Rule {
    Rule {
        parent,
        child,
        coverage,
        spawn,
    }
}

pub const DISPATCH_TABLE: &[Rule] = &[
    // BIFF12 has no sort state support.
    rule(Element::AutoFilter, Element::SortState, Coverage::XmlOnly, Spawn::SortState),
    rule(Element::AutoFilter, Element::FilterColumn, Coverage::Both, Spawn::FilterColumn),
    rule(Element::SortState, Element::SortCondition, Coverage::XmlOnly, Spawn::SortCondition),
    rule(
        Element::FilterColumn,
        Element::Filters,
        Coverage::Both,
        Spawn::FilterSettings(FilterKind::Discrete),
    ),
    rule(
        Element::FilterColumn,
        Element::Top10,
        Coverage::Both,
        Spawn::FilterSettings(FilterKind::Top10),
    ),
    rule(
        Element::FilterColumn,
        Element::CustomFilters,
        Coverage::Both,
        Spawn::FilterSettings(FilterKind::Custom),
    ),
    // No BIFF12 color filter import.
    rule(
        Element::FilterColumn,
        Element::ColorFilter,
        Coverage::XmlOnly,
        Spawn::FilterSettings(FilterKind::Color),
    ),
    rule(Element::Filters, Element::Filter, Coverage::Both, Spawn::Reuse),
    rule(Element::Filters, Element::DateGroupItem, Coverage::XmlOnly, Spawn::Reuse),
    rule(Element::CustomFilters, Element::CustomFilter, Coverage::Both, Spawn::Reuse),
    rule(Element::ColorFilter, Element::ColorFilter, Coverage::XmlOnly, Spawn::Reuse),
];

/// Look up the rule for `child` under `parent`, honoring dialect coverage.
pub fn lookup(parent: Element, child: Token) -> Option<Spawn> {
    let rule = DISPATCH_TABLE
        .iter()
        .find(|r| r.parent == parent && r.child == child.element)?;
    if !rule.coverage.covers(child.dialect) {
        log::debug!(
            "{}/{} is not imported from {:?}",
            parent.xml_name(),
            child.element.xml_name(),
            child.dialect
        );
        return None;
    }
    Some(rule.spawn)
}
