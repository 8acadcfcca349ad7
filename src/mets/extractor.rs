//! Page reference extraction from METS file sections.
//!
//! Selects `//mets:fileGrp[@USE="MAX"]//mets:file/mets:FLocat` and reads the
//! `xlink:href` of every match. Matching is done on namespace URIs, so the
//! prefixes a document happens to use do not matter.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use tracing::{debug, warn};

use super::error::MetsError;

/// METS namespace URI.
pub const METS_NS: &str = "http://www.loc.gov/METS/";

/// XLink namespace URI (carries `href` on `FLocat`).
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// `USE` value of the file group holding the highest-resolution renditions.
const MAX_FILE_GROUP_USE: &str = "MAX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    MaxFileGroup,
    File,
    Other,
}

#[derive(Debug, Default)]
struct ReferenceCollector {
    stack: Vec<Frame>,
    open_max_groups: usize,
    references: Vec<String>,
}

impl ReferenceCollector {
    /// Classifies an opening (or empty) element and records it if it is a
    /// matching `FLocat`.
    fn element(
        &mut self,
        reader: &NsReader<&[u8]>,
        in_mets_ns: bool,
        element: &BytesStart<'_>,
    ) -> Result<Frame, MetsError> {
        if !in_mets_ns {
            return Ok(Frame::Other);
        }

        match element.local_name().as_ref() {
            b"fileGrp" => Ok(if has_use_max(reader, element)? {
                Frame::MaxFileGroup
            } else {
                Frame::Other
            }),
            b"file" => Ok(Frame::File),
            b"FLocat" => {
                if self.open_max_groups > 0 && self.stack.last() == Some(&Frame::File) {
                    match xlink_href(reader, element)? {
                        Some(href) => self.references.push(href),
                        None => warn!(
                            position = reader.buffer_position(),
                            "FLocat without xlink:href skipped"
                        ),
                    }
                }
                Ok(Frame::Other)
            }
            _ => Ok(Frame::Other),
        }
    }

    fn push(&mut self, frame: Frame) {
        if frame == Frame::MaxFileGroup {
            self.open_max_groups += 1;
        }
        self.stack.push(frame);
    }

    fn pop(&mut self) {
        if self.stack.pop() == Some(Frame::MaxFileGroup) {
            self.open_max_groups -= 1;
        }
    }
}

/// Extracts the page image references of a METS document, in document order.
///
/// A document without any matching `FLocat` yields an empty list. Duplicate
/// references are kept.
///
/// # Errors
///
/// Returns [`MetsError::Xml`] for malformed XML, [`MetsError::Unclosed`] for
/// a truncated document and [`MetsError::NoRootElement`] when the input
/// contains no element at all.
///
/// # Example
///
/// ```
/// use mets_downloader_core::mets::extract_page_references;
///
/// let xml = r#"<mets:mets xmlns:mets="http://www.loc.gov/METS/"
///                         xmlns:xlink="http://www.w3.org/1999/xlink">
///   <mets:fileSec>
///     <mets:fileGrp USE="MAX">
///       <mets:file ID="f1">
///         <mets:FLocat LOCTYPE="URL" xlink:href="https://example.org/iiif/p1"/>
///       </mets:file>
///     </mets:fileGrp>
///   </mets:fileSec>
/// </mets:mets>"#;
///
/// let references = extract_page_references(xml).unwrap();
/// assert_eq!(references, vec!["https://example.org/iiif/p1".to_string()]);
/// ```
pub fn extract_page_references(xml: &str) -> Result<Vec<String>, MetsError> {
    let mut reader = NsReader::from_str(xml);
    let mut collector = ReferenceCollector::default();
    let mut saw_element = false;

    loop {
        let (namespace, event) = match reader.read_resolved_event() {
            Ok(resolved) => resolved,
            Err(source) => return Err(MetsError::xml(reader.error_position(), source)),
        };
        let in_mets_ns = is_mets_namespace(&namespace);

        match event {
            Event::Start(element) => {
                saw_element = true;
                let frame = collector.element(&reader, in_mets_ns, &element)?;
                collector.push(frame);
            }
            Event::Empty(element) => {
                saw_element = true;
                collector.element(&reader, in_mets_ns, &element)?;
            }
            Event::End(_) => collector.pop(),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_element {
        return Err(MetsError::NoRootElement);
    }
    if !collector.stack.is_empty() {
        return Err(MetsError::Unclosed {
            open_elements: collector.stack.len(),
        });
    }

    debug!(references = collector.references.len(), "extracted page references");
    Ok(collector.references)
}

fn is_mets_namespace(namespace: &ResolveResult<'_>) -> bool {
    matches!(namespace, ResolveResult::Bound(Namespace(uri)) if *uri == METS_NS.as_bytes())
}

fn has_use_max(reader: &NsReader<&[u8]>, element: &BytesStart<'_>) -> Result<bool, MetsError> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| MetsError::xml(reader.buffer_position(), e))?;
        let (namespace, local_name) = reader.resolve_attribute(attribute.key);
        if matches!(namespace, ResolveResult::Unbound) && local_name.as_ref() == b"USE" {
            let value = attribute
                .unescape_value()
                .map_err(|e| MetsError::xml(reader.buffer_position(), e))?;
            return Ok(value == MAX_FILE_GROUP_USE);
        }
    }
    Ok(false)
}

fn xlink_href(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
) -> Result<Option<String>, MetsError> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| MetsError::xml(reader.buffer_position(), e))?;
        let (namespace, local_name) = reader.resolve_attribute(attribute.key);
        let in_xlink_ns = matches!(
            namespace,
            ResolveResult::Bound(Namespace(uri)) if uri == XLINK_NS.as_bytes()
        );
        if in_xlink_ns && local_name.as_ref() == b"href" {
            let value = attribute
                .unescape_value()
                .map_err(|e| MetsError::xml(reader.buffer_position(), e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
