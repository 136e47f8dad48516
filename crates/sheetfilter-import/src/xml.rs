use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use sheetfilter_model::AutoFilter;

use crate::attributes::AttributeList;
use crate::context::{ContextChain, Payload};
use crate::token::{Element, Token};
use crate::{ImportError, ImportOptions};

/// Import the first `<autoFilter>` block of a worksheet part.
///
/// `xml` may be a whole `sheetN.xml` or just the `<autoFilter>` fragment; any
/// namespace prefix is ignored. Returns `Ok(None)` when the part has no
/// AutoFilter.
pub fn import_autofilter_xml(
    xml: &str,
    sheet: u16,
    options: &ImportOptions,
) -> Result<Option<AutoFilter>, ImportError> {
    import_autofilter_xml_reader(xml.as_bytes(), sheet, options)
}

/// Streaming variant of [`import_autofilter_xml`].
pub fn import_autofilter_xml_reader<R: BufRead>(
    input: R,
    sheet: u16,
    options: &ImportOptions,
) -> Result<Option<AutoFilter>, ImportError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut chain = ContextChain::new(sheet, options);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                start_element(&mut chain, &e)?;
            }
            Event::Empty(e) => {
                if start_element(&mut chain, &e)? {
                    chain.end();
                }
            }
            Event::End(_) => {
                if chain.is_active() {
                    chain.end();
                    if !chain.is_active() {
                        break;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(chain.finish())
}

/// Returns whether the element opened a scope on the chain.
fn start_element(chain: &mut ContextChain<'_>, e: &BytesStart<'_>) -> Result<bool, ImportError> {
    let element = Element::from_xml_name(e.local_name().as_ref());

    if !chain.is_active() {
        if element != Some(Element::AutoFilter) || chain.has_sink() {
            return Ok(false);
        }
        let attrs = AttributeList::from_start(e)?;
        chain.begin_root(Payload::Attributes(&attrs))?;
        return Ok(true);
    }

    let attrs = AttributeList::from_start(e)?;
    chain.start(element.map(Token::xml), Payload::Attributes(&attrs))?;
    Ok(true)
}
