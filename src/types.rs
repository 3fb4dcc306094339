//==============================================================================
// Conversion modes
//==============================================================================

/// How header names are cleaned after duplicates are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// Dedup only; names are otherwise kept byte-for-byte
    Plain,
    /// Dedup, then make each name usable as an XML element name
    Markup,
}

/// Kind of tabular source being converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Spreadsheet sheet: markup-safe headers, date-like values coerced
    Spreadsheet,
    /// CSV records: plain headers, values passed through
    Csv,
}

impl TableMode {
    pub fn header_mode(self) -> HeaderMode {
        match self {
            TableMode::Spreadsheet => HeaderMode::Markup,
            TableMode::Csv => HeaderMode::Plain,
        }
    }

    pub fn coerces_values(self) -> bool {
        matches!(self, TableMode::Spreadsheet)
    }
}

//==============================================================================
// Document model
//==============================================================================

/// A single (column name, value) pair inside a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One data row, with fields in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field::new(name, value));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.value.as_str())
    }

    /// Value of the first field called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Hierarchical row/column document built from one tabular source.
///
/// `headers` is the normalized header set; every record pairs its values with
/// these names by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Document {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
        }
    }

    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// True when there is neither a header row nor any record
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.records.is_empty()
    }
}
