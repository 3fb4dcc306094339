use crate::error::{TabError, TabResult};
use crate::types::Document;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Root element of a serialized DataTable
pub const DATA_TABLE_ELEMENT: &str = "DataTable";
/// Element wrapping each record
pub const ROW_ELEMENT: &str = "Row";

/// Serialize a document as an XML DataTable:
///
/// ```text
/// <DataTable>
///   <Row>
///     <Name>Ada</Name>
///     <City></City>
///   </Row>
/// </DataTable>
/// ```
///
/// No XML declaration is written. Field names must be non-empty.
pub fn write_data_table<W: Write>(document: &Document, out: W) -> TabResult<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);

    if document.records.is_empty() {
        xml.write_event(Event::Empty(BytesStart::new(DATA_TABLE_ELEMENT)))?;
        return Ok(());
    }

    xml.write_event(Event::Start(BytesStart::new(DATA_TABLE_ELEMENT)))?;
    for record in &document.records {
        xml.write_event(Event::Start(BytesStart::new(ROW_ELEMENT)))?;
        for (index, field) in record.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(TabError::InvalidElementName { column: index + 1 });
            }
            write_text_element(&mut xml, &field.name, &field.value)?;
        }
        xml.write_event(Event::End(BytesEnd::new(ROW_ELEMENT)))?;
    }
    xml.write_event(Event::End(BytesEnd::new(DATA_TABLE_ELEMENT)))?;

    Ok(())
}

/// Serialize a document to an in-memory XML string
pub fn data_table_to_string(document: &Document) -> TabResult<String> {
    let mut buf = Vec::new();
    write_data_table(document, &mut buf)?;
    // Everything written came from &str values
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// An explicit (possibly empty) Text event keeps `<a></a>` on one line
fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> TabResult<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Serialize a document as CSV: header row, then one line per record
pub fn write_csv<W: Write>(document: &Document, out: W) -> TabResult<()> {
    let mut writer = csv::Writer::from_writer(out);

    if !document.headers.is_empty() {
        writer.write_record(&document.headers)?;
    }
    for record in &document.records {
        writer.write_record(record.values())?;
    }

    writer.flush()?;
    Ok(())
}
