use crate::error::Result;
use crate::params::ParameterSet;
use crate::parser::header::{parse_format_line, scan_log_metadata, LogMetadata};
use crate::parser::record::{decode_record, RECORD_TYPES};
use crate::parser::stream::LogLineReader;
use crate::types::{FormatTable, ModeTransition, TelemetryRecord};
use std::path::Path;

/// A DataFlash text log loaded into memory.
///
/// Parameters and the mode timeline are available right after opening; the
/// telemetry records are decoded lazily by [`DataFlashLog::records`].
#[derive(Debug)]
pub struct DataFlashLog {
    data: Vec<u8>,
    metadata: LogMetadata,
}

impl DataFlashLog {
    /// Read and prescan a log file
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(data)
    }

    /// Prescan log data held in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let metadata = scan_log_metadata(&data)?;
        Ok(Self { data, metadata })
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.metadata.parameters
    }

    pub fn mode_transitions(&self) -> &[ModeTransition] {
        &self.metadata.mode_transitions
    }

    pub fn line_count(&self) -> u64 {
        self.metadata.line_count
    }

    /// Decode GPS, BAT, BARO, MSG, MODE and CMD records in log order
    pub fn records(&self) -> RecordStream<'_> {
        RecordStream {
            reader: LogLineReader::new(&self.data),
            formats: FormatTable::new(),
            finished: false,
        }
    }
}

/// Lazy iterator over the telemetry records of a log.
///
/// Stops after the first decode error. Dropping it early is fine.
pub struct RecordStream<'a> {
    reader: LogLineReader<'a>,
    formats: FormatTable,
    finished: bool,
}

impl<'a> RecordStream<'a> {
    fn next_record(&mut self) -> Result<Option<TelemetryRecord>> {
        while let Some(line) = self.reader.next_line()? {
            let name = line.message_name();
            if name == "FMT" {
                self.formats.insert(parse_format_line(&line)?);
                continue;
            }
            if !RECORD_TYPES.contains(&name) {
                continue;
            }
            let Some(definition) = self.formats.get(name) else {
                log::debug!("Line {}: {} before its FMT, skipped", line.line, name);
                continue;
            };
            if let Some(record) = decode_record(definition, &line)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

impl<'a> Iterator for RecordStream<'a> {
    type Item = Result<TelemetryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
