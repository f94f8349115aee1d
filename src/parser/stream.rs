use crate::error::Result;
use csv::{ByteRecord, ReaderBuilder, StringRecord};

/// Line reader for DataFlash text logs.
///
/// Every line is a comma separated record whose first field names the message
/// type. Quoting is disabled because status texts may contain stray quotes, and
/// invalid UTF-8 is replaced rather than rejected so one corrupt byte in a status
/// text does not make the whole log unreadable.
pub struct LogLineReader<'a> {
    reader: csv::Reader<&'a [u8]>,
    bytes: ByteRecord,
    row: StringRecord,
}

/// One record of a text log. Fields keep their surrounding whitespace; the
/// accessors trim it.
#[derive(Debug)]
pub struct LogLine<'r> {
    /// 1-based line number in the file
    pub line: u64,
    pub fields: &'r StringRecord,
}

impl<'r> LogLine<'r> {
    /// Message type name, e.g. `GPS` or `FMT`
    pub fn message_name(&self) -> &'r str {
        self.fields.get(0).map(str::trim).unwrap_or("")
    }

    /// Number of values after the message name
    pub fn value_count(&self) -> usize {
        self.fields.len().saturating_sub(1)
    }

    /// Value at `index`, counting from the first field after the message name
    pub fn value(&self, index: usize) -> Option<&'r str> {
        self.fields.get(index + 1).map(str::trim)
    }

    /// Values from `index` to the end of the line
    pub fn values_from(&self, index: usize) -> impl Iterator<Item = &'r str> {
        self.fields.iter().skip(index + 1).map(str::trim)
    }

    /// Everything from value `index` to the end of the line as written, commas
    /// included. Only the outer whitespace is removed.
    pub fn text_from(&self, index: usize) -> String {
        self.fields
            .iter()
            .skip(index + 1)
            .collect::<Vec<_>>()
            .join(",")
            .trim()
            .to_string()
    }
}

impl<'a> LogLineReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(data);
        Self {
            reader,
            bytes: ByteRecord::new(),
            row: StringRecord::new(),
        }
    }

    /// Reads the next non-empty line, `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<LogLine<'_>>> {
        if !self.reader.read_byte_record(&mut self.bytes)? {
            return Ok(None);
        }
        let line = self.bytes.position().map(|p| p.line()).unwrap_or(0);
        let bytes = std::mem::replace(&mut self.bytes, ByteRecord::new());
        self.row = StringRecord::from_byte_record_lossy(bytes);
        Ok(Some(LogLine {
            line,
            fields: &self.row,
        }))
    }
}
