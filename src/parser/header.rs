use crate::error::{LogError, Result};
use crate::params::ParameterSet;
use crate::parser::record::{decode_mode, decode_parameter, RecordFields};
use crate::parser::stream::{LogLine, LogLineReader};
use crate::types::{build_mode_timeline, FormatDefinition, FormatTable, ModeTransition};

/// Log-wide data gathered before records are streamed
#[derive(Debug, Default)]
pub struct LogMetadata {
    pub formats: FormatTable,
    pub parameters: ParameterSet,
    pub mode_transitions: Vec<ModeTransition>,
    pub line_count: u64,
}

/// Parse a FMT line: `FMT, Type, Length, Name, Format, Col1,Col2,...`
pub fn parse_format_line(line: &LogLine<'_>) -> Result<FormatDefinition> {
    let decode_error = |message: String| LogError::Decode {
        line: line.line,
        message,
    };

    if line.value_count() < 4 {
        return Err(decode_error(format!(
            "FMT line has {} fields, expected at least 4",
            line.value_count()
        )));
    }

    let raw_type = line.value(0).unwrap_or("");
    let type_id = raw_type
        .parse::<u8>()
        .map_err(|_| decode_error(format!("invalid FMT type id '{}'", raw_type)))?;
    let name = line.value(2).unwrap_or("");
    let format = line.value(3).unwrap_or("");
    if name.is_empty() {
        return Err(decode_error("FMT line without message name".to_string()));
    }

    let columns: Vec<String> = line
        .values_from(4)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect();

    Ok(FormatDefinition::new(type_id, name, format, columns))
}

/// Scan the whole log for message layouts, parameters and mode changes
pub fn scan_log_metadata(data: &[u8]) -> Result<LogMetadata> {
    let mut metadata = LogMetadata::default();
    let mut mode_changes = Vec::new();
    let mut reader = LogLineReader::new(data);

    while let Some(line) = reader.next_line()? {
        metadata.line_count += 1;
        match line.message_name() {
            "FMT" => {
                let definition = parse_format_line(&line)?;
                log::trace!("FMT {} -> {:?}", definition.name, definition.columns);
                metadata.formats.insert(definition);
            }
            "PARM" => {
                if let Some(definition) = metadata.formats.get("PARM") {
                    let fields = RecordFields::new(definition, &line)?;
                    let (name, value) = decode_parameter(&fields)?;
                    metadata.parameters.insert(&name, value);
                }
            }
            "MODE" => {
                if let Some(definition) = metadata.formats.get("MODE") {
                    let fields = RecordFields::new(definition, &line)?;
                    let mode = decode_mode(&fields)?;
                    mode_changes.push((mode.time_us, mode.mode, mode.mode_number));
                }
            }
            _ => {}
        }
    }

    metadata.mode_transitions = build_mode_timeline(&mode_changes);

    log::debug!(
        "Scanned {} lines: {} formats, {} parameters, {} mode changes",
        metadata.line_count,
        metadata.formats.len(),
        metadata.parameters.len(),
        metadata.mode_transitions.len()
    );

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
FMT, 128, 89, FMT, BBnNZ, Type,Length,Name,Format,Columns
FMT, 64, 31, PARM, QNf, TimeUS,Name,Value
FMT, 65, 20, MODE, QMBB, TimeUS,Mode,ModeNum,Rsn
PARM, 100, SERVO_AUTO_TRIM, 1
PARM, 100, STALL_PREVENTION, 0
MODE, 2000000, MANUAL, 0, 0
PARM, 3000000, SERVO_AUTO_TRIM, 0
MODE, 9000000, AUTO, 10, 2
";

    #[test]
    fn test_parse_format_line() {
        let mut reader = LogLineReader::new(b"FMT, 130, 45, GPS, QBLLe, TimeUS,Status,Lat,Lng,Alt\n");
        let line = reader.next_line().unwrap().unwrap();
        let def = parse_format_line(&line).unwrap();
        assert_eq!(def.type_id, 130);
        assert_eq!(def.name, "GPS");
        assert_eq!(def.format, "QBLLe");
        assert_eq!(def.columns, vec!["TimeUS", "Status", "Lat", "Lng", "Alt"]);
    }

    #[test]
    fn test_invalid_format_line() {
        let mut reader = LogLineReader::new(b"FMT, abc, 45, GPS, Q, TimeUS\n");
        let line = reader.next_line().unwrap().unwrap();
        assert!(parse_format_line(&line).is_err());
    }

    #[test]
    fn test_scan_collects_parameters_and_modes() {
        let metadata = scan_log_metadata(LOG.as_bytes()).unwrap();

        assert_eq!(metadata.line_count, 8);
        assert_eq!(metadata.formats.len(), 3);
        assert_eq!(metadata.parameters.len(), 2);
        assert_eq!(metadata.parameters.get("SERVO_AUTO_TRIM"), Some(0.0));
        assert_eq!(metadata.parameters.get("STALL_PREVENTION"), Some(0.0));

        assert_eq!(metadata.mode_transitions.len(), 2);
        assert_eq!(metadata.mode_transitions[0].mode, "MANUAL");
        assert_eq!(metadata.mode_transitions[0].end_us, Some(9_000_000));
        assert_eq!(metadata.mode_transitions[1].mode_number, Some(10));
    }

    #[test]
    fn test_lines_before_their_format_are_ignored() {
        let metadata = scan_log_metadata(b"PARM, 1, THR_MAX, 100\n").unwrap();
        assert!(metadata.parameters.is_empty());
    }
}
