//! Import contexts: one per open element / record block.
//!
//! A context never borrows the sink. It names the object it feeds by index
//! into the [`AutoFilter`] being built, and receives `&mut AutoFilter` on every
//! call, so a whole stack of contexts can be alive at once.

use sheetfilter_biff12::SequenceInputStream;
use sheetfilter_model::AutoFilter;

use crate::attributes::AttributeList;
use crate::dispatch::{self, Spawn};
use crate::sinks::{self, SettingsImport};
use crate::token::{Element, Token};
use crate::{ImportError, ImportOptions};

/// Start-event payload handed to [`Context::on_start`].
#[derive(Debug)]
pub enum Payload<'a> {
    Attributes(&'a AttributeList),
    Record(SequenceInputStream<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Root context of one worksheet AutoFilter.
    AutoFilter,
    SortState,
    /// Feeds `sort_state.conditions[index]`.
    SortCondition { index: usize },
    /// Feeds `columns[column]`.
    FilterColumn { column: usize },
    /// Feeds the settings of `columns[column]`.
    FilterSettings { column: usize },
}

impl Context {
    /// Child context for an XML element below `current`, if it is accepted.
    pub fn on_create_context(
        &self,
        current: Element,
        child: Element,
        sink: &mut AutoFilter,
        options: &ImportOptions,
    ) -> Result<Option<Context>, ImportError> {
        self.create_child(current, Token::xml(child), sink, options)
    }

    /// Child context for a BIFF12 record below `current`, if it is accepted.
    pub fn on_create_record_context(
        &self,
        current: Element,
        record_id: u32,
        sink: &mut AutoFilter,
        options: &ImportOptions,
    ) -> Result<Option<Context>, ImportError> {
        match Element::from_record_id(record_id) {
            Some(child) => self.create_child(current, Token::biff12(child), sink, options),
            None => Ok(None),
        }
    }

    pub fn on_start_element(
        &self,
        current: Element,
        attrs: &AttributeList,
        sink: &mut AutoFilter,
        sheet: u16,
    ) -> Result<(), ImportError> {
        self.on_start(current, Payload::Attributes(attrs), sink, sheet)
    }

    pub fn on_start_record(
        &self,
        current: Element,
        strm: SequenceInputStream<'_>,
        sink: &mut AutoFilter,
        sheet: u16,
    ) -> Result<(), ImportError> {
        self.on_start(current, Payload::Record(strm), sink, sheet)
    }

    pub(crate) fn create_child(
        &self,
        current: Element,
        child: Token,
        sink: &mut AutoFilter,
        options: &ImportOptions,
    ) -> Result<Option<Context>, ImportError> {
        let Some(spawn) = dispatch::lookup(current, child) else {
            return Ok(None);
        };

        let context = match (*self, spawn) {
            (Context::AutoFilter, Spawn::SortState) => Context::SortState,
            (Context::AutoFilter, Spawn::FilterColumn) => Context::FilterColumn {
                column: sink.create_filter_column(),
            },
            (Context::SortState, Spawn::SortCondition) => Context::SortCondition {
                index: sink.create_sort_condition(),
            },
            (Context::FilterColumn { column }, Spawn::FilterSettings(kind)) => {
                let Some(filter_column) = sink.column_mut(column) else {
                    return Ok(None);
                };
                if let Some(previous) = filter_column.settings.as_ref() {
                    if options.strict_filter_kinds {
                        return Err(ImportError::DuplicateFilterSettings {
                            col_id: filter_column.col_id,
                        });
                    }
                    log::debug!(
                        "filterColumn {}: {:?} settings replace {:?}",
                        filter_column.col_id,
                        kind,
                        previous.kind()
                    );
                }
                filter_column.create_filter_settings(kind);
                Context::FilterSettings { column }
            }
            (Context::FilterSettings { .. }, Spawn::Reuse) => *self,
            _ => return Ok(None),
        };
        Ok(Some(context))
    }

    /// Forward the start payload of `current` to the sink this context feeds.
    pub fn on_start(
        &self,
        current: Element,
        payload: Payload<'_>,
        sink: &mut AutoFilter,
        sheet: u16,
    ) -> Result<(), ImportError> {
        match (*self, payload) {
            (Context::AutoFilter, Payload::Attributes(attrs)) => {
                sinks::import_auto_filter_attribs(sink, attrs, sheet);
            }
            (Context::AutoFilter, Payload::Record(mut strm)) => {
                sinks::import_auto_filter_record(sink, &mut strm, sheet)?;
                trace_trailing_bytes(current, &strm);
            }
            (Context::SortState, Payload::Attributes(attrs)) => {
                sinks::import_sort_state_attribs(sink.sort_state_mut(), attrs, sheet);
            }
            (Context::SortCondition { index }, Payload::Attributes(attrs)) => {
                if let Some(condition) = sink.sort_condition_mut(index) {
                    sinks::import_sort_condition_attribs(condition, attrs, sheet);
                }
            }
            // Sort state is never read from records.
            (Context::SortState | Context::SortCondition { .. }, Payload::Record(_)) => {}
            (Context::FilterColumn { column }, Payload::Attributes(attrs)) => {
                if let Some(filter_column) = sink.column_mut(column) {
                    sinks::import_filter_column_attribs(filter_column, attrs);
                }
            }
            (Context::FilterColumn { column }, Payload::Record(mut strm)) => {
                if let Some(filter_column) = sink.column_mut(column) {
                    sinks::import_filter_column_record(filter_column, &mut strm)?;
                    trace_trailing_bytes(current, &strm);
                }
            }
            (Context::FilterSettings { column }, payload) => {
                let Some(settings) = sink
                    .column_mut(column)
                    .and_then(|c| c.settings.as_mut())
                else {
                    return Ok(());
                };
                match payload {
                    Payload::Attributes(attrs) => settings.import_attribs(current, attrs),
                    Payload::Record(mut strm) => {
                        settings.import_record(current, &mut strm)?;
                        trace_trailing_bytes(current, &strm);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Records may carry fields newer than the layout read here.
fn trace_trailing_bytes(element: Element, strm: &SequenceInputStream<'_>) {
    if !strm.is_at_end() {
        log::trace!(
            "{}: {} unread payload bytes after offset {}",
            element.xml_name(),
            strm.remaining(),
            strm.position()
        );
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    element: Element,
    context: Context,
}

/// The stack of open contexts for one import pass, plus the sink they feed.
///
/// Drivers translate their token stream into `start`/`end` calls. Elements the
/// top context does not accept open a skipped scope: everything until the
/// matching end is ignored.
#[derive(Debug)]
pub(crate) struct ContextChain<'o> {
    sink: Option<AutoFilter>,
    frames: Vec<Frame>,
    skipped: usize,
    sheet: u16,
    options: &'o ImportOptions,
}

impl<'o> ContextChain<'o> {
    pub(crate) fn new(sheet: u16, options: &'o ImportOptions) -> Self {
        Self {
            sink: None,
            frames: Vec::new(),
            skipped: 0,
            sheet,
            options,
        }
    }

    /// True while an AutoFilter block is open.
    pub(crate) fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    /// True once an AutoFilter block has been opened in this pass.
    pub(crate) fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Open the root AutoFilter context.
    pub(crate) fn begin_root(&mut self, payload: Payload<'_>) -> Result<(), ImportError> {
        let sink = self.sink.insert(AutoFilter::new());
        Context::AutoFilter.on_start(Element::AutoFilter, payload, sink, self.sheet)?;
        self.frames.push(Frame {
            element: Element::AutoFilter,
            context: Context::AutoFilter,
        });
        Ok(())
    }

    /// Offer a start event to the top context. `token` is `None` for names
    /// outside the AutoFilter vocabulary.
    pub(crate) fn start(
        &mut self,
        token: Option<Token>,
        payload: Payload<'_>,
    ) -> Result<(), ImportError> {
        let depth = self.frames.len() + self.skipped;
        if depth >= self.options.max_depth {
            return Err(ImportError::TooDeep {
                depth: self.options.max_depth,
            });
        }
        if self.skipped > 0 {
            self.skipped += 1;
            return Ok(());
        }
        let (Some(top), Some(sink)) = (self.frames.last().copied(), self.sink.as_mut()) else {
            return Ok(());
        };

        let child = match token {
            Some(token) => top
                .context
                .create_child(top.element, token, sink, self.options)?
                .map(|context| (token.element, context)),
            None => None,
        };

        match child {
            Some((element, context)) => {
                context.on_start(element, payload, sink, self.sheet)?;
                self.frames.push(Frame { element, context });
            }
            None => {
                log::debug!(
                    "skipping {} below {}",
                    token.map_or("unknown element", |t| t.element.xml_name()),
                    top.element.xml_name()
                );
                self.skipped = 1;
            }
        }
        Ok(())
    }

    /// Close the innermost open scope.
    pub(crate) fn end(&mut self) {
        if self.skipped > 0 {
            self.skipped -= 1;
        } else {
            self.frames.pop();
        }
    }

    pub(crate) fn finish(self) -> Option<AutoFilter> {
        if self.is_active() {
            log::warn!("AutoFilter block on sheet {} was not closed", self.sheet);
        }
        self.sink
    }
}
