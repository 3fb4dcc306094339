//! XML re-indenting
//!
//! Copies every token from a reader to a writer and regenerates only the
//! whitespace between elements. Each line starts with [`LINE_PREFIX`] followed
//! by one [`INDENT_UNIT`] per nesting level.
//!
//! An element is laid out as a block only when its children are all markup.
//! Leaf elements and elements holding text, CDATA or entity references are
//! written on one line exactly as read, so text content never changes.

use crate::error::{TabError, TabResult};
use crate::files::replace_with;
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

pub const LINE_PREFIX: &str = " ";
pub const INDENT_UNIT: &str = "\t";

fn is_blank(text: &BytesText) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Direct children seen so far for one open element
#[derive(Debug, Default)]
struct Children {
    start: usize,
    markup: bool,
    content: bool,
}

/// For every event index, whether it starts an element that must stay on
/// one line: a leaf, or an element with text content of its own.
fn inline_elements(events: &[Event]) -> Vec<bool> {
    let mut inline = vec![false; events.len()];
    let mut open: Vec<Children> = Vec::new();

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Start(_) => {
                if let Some(parent) = open.last_mut() {
                    parent.markup = true;
                }
                open.push(Children {
                    start: index,
                    ..Children::default()
                });
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    inline[element.start] = element.content || !element.markup;
                }
            }
            Event::Text(text) if is_blank(text) => {}
            Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) => {
                if let Some(parent) = open.last_mut() {
                    parent.content = true;
                }
            }
            Event::Empty(_) | Event::Comment(_) | Event::PI(_) => {
                if let Some(parent) = open.last_mut() {
                    parent.markup = true;
                }
            }
            _ => {}
        }
    }

    inline
}

/// Tracks indentation and where the next line break goes
#[derive(Debug, Default)]
struct Layout {
    depth: usize,
    started: bool,
    /// Nesting inside the current one-line element; 0 outside one
    verbatim: usize,
}

impl Layout {
    fn break_line<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.started {
            out.write_all(b"\n")?;
        }
        self.started = true;
        out.write_all(LINE_PREFIX.as_bytes())?;
        for _ in 0..self.depth {
            out.write_all(INDENT_UNIT.as_bytes())?;
        }
        Ok(())
    }

    // The declaration must stay at column 0
    fn declaration<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.started {
            out.write_all(b"\n")?;
        }
        self.started = true;
        Ok(())
    }
}

/// Re-indent an XML document held in memory
pub fn format_xml(input: &str) -> TabResult<String> {
    let mut reader = Reader::from_str(input);
    let mut events = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => events.push(event),
        }
    }

    let inline = inline_elements(&events);
    let mut writer = Writer::new(Vec::new());
    let mut layout = Layout::default();

    for (event, inline) in events.into_iter().zip(inline) {
        if layout.verbatim > 0 {
            match &event {
                Event::Start(_) => layout.verbatim += 1,
                Event::End(_) => layout.verbatim -= 1,
                _ => {}
            }
            writer.write_event(event)?;
            continue;
        }

        match event {
            Event::Text(ref text) if is_blank(text) => {}
            event @ Event::Start(_) => {
                layout.break_line(writer.get_mut())?;
                if inline {
                    layout.verbatim = 1;
                } else {
                    layout.depth += 1;
                }
                writer.write_event(event)?;
            }
            event @ Event::End(_) => {
                layout.depth = layout.depth.saturating_sub(1);
                layout.break_line(writer.get_mut())?;
                writer.write_event(event)?;
            }
            event @ Event::Decl(_) => {
                layout.declaration(writer.get_mut())?;
                writer.write_event(event)?;
            }
            event @ (Event::Empty(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {
                layout.break_line(writer.get_mut())?;
                writer.write_event(event)?;
            }
            // Stray content outside any element
            event => writer.write_event(event)?,
        }
    }

    let mut bytes = writer.into_inner();
    if layout.started {
        bytes.push(b'\n');
    }
    // Every byte came from the &str input or ASCII whitespace
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Re-indent one XML file in place
pub fn format_xml_file(path: &Path) -> TabResult<()> {
    let input = fs::read_to_string(path).map_err(|source| TabError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let formatted = format_xml(&input)?;
    replace_with(path, |out| {
        out.write_all(formatted.as_bytes())?;
        Ok(())
    })?;

    debug!(path = %path.display(), bytes = formatted.len(), "Formatted XML file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_elements_get_tab_per_level() {
        let formatted = format_xml("<a><b><c>1</c></b><d/></a>").unwrap();
        assert_eq!(
            formatted,
            " <a>\n \t<b>\n \t\t<c>1</c>\n \t</b>\n \t<d/>\n </a>\n"
        );
    }

    #[test]
    fn test_existing_whitespace_is_replaced() {
        let messy = "<root>\n        <item>x</item>\n  <item>y</item>\n\n</root>";
        let formatted = format_xml(messy).unwrap();
        assert_eq!(formatted, " <root>\n \t<item>x</item>\n \t<item>y</item>\n </root>\n");
    }

    #[test]
    fn test_declaration_stays_first() {
        let formatted = format_xml("<?xml version=\"1.0\"?><r><x/></r>").unwrap();
        assert!(formatted.starts_with("<?xml version=\"1.0\"?>\n <r>"));
    }

    #[test]
    fn test_text_and_attributes_are_preserved() {
        let formatted =
            format_xml("<r kind=\"a&amp;b\"><t> padded text </t><!-- note --></r>").unwrap();
        assert!(formatted.contains("<r kind=\"a&amp;b\">"));
        assert!(formatted.contains("<t> padded text </t>"));
        assert!(formatted.contains("\n \t<!-- note -->"));
    }

    #[test]
    fn test_formatting_is_stable() {
        let once = format_xml("<?xml version=\"1.0\"?><a><b>t</b><c><d/></c></a>").unwrap();
        let twice = format_xml(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_text_around_entity_references_is_kept() {
        let formatted = format_xml("<r><t>&lt; &gt;</t><u>a &amp; b</u><v> </v></r>").unwrap();
        assert_eq!(
            formatted,
            " <r>\n \t<t>&lt; &gt;</t>\n \t<u>a &amp; b</u>\n \t<v> </v>\n </r>\n"
        );
    }

    #[test]
    fn test_mixed_content_stays_on_one_line() {
        let input = "<doc>\n  <p>Hello <b>world</b> again</p>\n  <q><![CDATA[x]]><i/></q>\n</doc>";
        let once = format_xml(input).unwrap();
        assert_eq!(
            once,
            " <doc>\n \t<p>Hello <b>world</b> again</p>\n \t<q><![CDATA[x]]><i/></q>\n </doc>\n"
        );
        assert_eq!(format_xml(&once).unwrap(), once);
    }

    #[test]
    fn test_inline_element_keeps_inner_whitespace() {
        let formatted = format_xml("<p>Hi\n   <b> x </b>\n</p>").unwrap();
        assert_eq!(formatted, " <p>Hi\n   <b> x </b>\n</p>\n");
        assert_eq!(format_xml(&formatted).unwrap(), formatted);
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        let result = format_xml("<a><b></a>");
        assert!(matches!(result, Err(TabError::Xml(_))));
    }

    #[test]
    fn test_format_xml_file_in_place() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.xml");
        fs::write(&path, "<a><b/></a>").unwrap();

        format_xml_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), " <a>\n \t<b/>\n </a>\n");
    }

    #[test]
    fn test_format_xml_file_keeps_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(&path, "<a><b></a>").unwrap();

        assert!(format_xml_file(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<a><b></a>");
    }
}
