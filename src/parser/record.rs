//! Record decoding for the message types the analyzer consumes
//!
//! Values are looked up by column name through the FMT definition of each
//! message, so logs from different firmware versions decode alike.

use crate::conversion::convert_gps_coordinate;
use crate::error::{LogError, Result};
use crate::parser::stream::LogLine;
use crate::types::{
    BaroSample, BatterySample, FormatDefinition, GpsFix, MessageEvent, MissionWaypoint,
    ModeChangeEvent, TelemetryRecord,
};

/// Minimum GPS status for a 3D fix
const GPS_OK_FIX_3D: u64 = 3;

/// Message types turned into [`TelemetryRecord`]s
pub const RECORD_TYPES: [&str; 6] = ["GPS", "BAT", "BARO", "MSG", "MODE", "CMD"];

/// A log line paired with the layout that describes it
pub struct RecordFields<'l, 'r> {
    definition: &'l FormatDefinition,
    line: &'l LogLine<'r>,
}

impl<'l, 'r> RecordFields<'l, 'r> {
    pub fn new(definition: &'l FormatDefinition, line: &'l LogLine<'r>) -> Result<Self> {
        if line.value_count() < definition.column_count() {
            return Err(LogError::Decode {
                line: line.line,
                message: format!(
                    "{} record has {} fields, expected {}",
                    definition.name,
                    line.value_count(),
                    definition.column_count()
                ),
            });
        }
        Ok(Self { definition, line })
    }

    fn error(&self, message: String) -> LogError {
        LogError::Decode {
            line: self.line.line,
            message,
        }
    }

    pub fn has(&self, column: &str) -> bool {
        self.definition.column_index(column).is_some()
    }

    pub fn raw(&self, column: &str) -> Result<&'r str> {
        self.definition
            .column_index(column)
            .and_then(|index| self.line.value(index))
            .ok_or_else(|| {
                self.error(format!(
                    "{} record has no {} column",
                    self.definition.name, column
                ))
            })
    }

    /// Text column. When it is the last column, any extra fields are commas that
    /// belonged to the text and are joined back as written.
    pub fn text(&self, column: &str) -> Result<String> {
        let index = self.definition.column_index(column).ok_or_else(|| {
            self.error(format!(
                "{} record has no {} column",
                self.definition.name, column
            ))
        })?;
        if index + 1 == self.definition.column_count() {
            Ok(self.line.text_from(index))
        } else {
            Ok(self.raw(column)?.to_string())
        }
    }

    pub fn f64(&self, column: &str) -> Result<f64> {
        let raw = self.raw(column)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.error(format!(
                "{}.{} is not a number: '{}'",
                self.definition.name, column, raw
            ))),
        }
    }

    pub fn f64_or(&self, column: &str, default: f64) -> Result<f64> {
        if self.has(column) {
            self.f64(column)
        } else {
            Ok(default)
        }
    }

    pub fn u64(&self, column: &str) -> Result<u64> {
        let raw = self.raw(column)?;
        raw.parse::<u64>().map_err(|_| {
            self.error(format!(
                "{}.{} is not an unsigned integer: '{}'",
                self.definition.name, column, raw
            ))
        })
    }

    /// Timestamp in microseconds; older logs carry milliseconds in `TimeMS`
    pub fn time_us(&self) -> Result<u64> {
        if self.has("TimeUS") {
            self.u64("TimeUS")
        } else if self.has("TimeMS") {
            let millis = self.u64("TimeMS")?;
            millis
                .checked_mul(1000)
                .ok_or_else(|| self.error(format!("TimeMS out of range: {}", millis)))
        } else {
            Ok(0)
        }
    }

    /// True for secondary sensor instances (GPS2, second battery monitor)
    fn is_secondary_instance(&self) -> Result<bool> {
        for column in ["I", "Instance", "Inst"] {
            if self.has(column) {
                return Ok(self.u64(column)? != 0);
            }
        }
        Ok(false)
    }
}

/// Decode a GPS/BAT/BARO/MSG/MODE/CMD line.
///
/// Returns `None` for lines that are valid but carry nothing to analyze:
/// GPS samples without a 3D fix and secondary sensor instances.
pub fn decode_record(
    definition: &FormatDefinition,
    line: &LogLine<'_>,
) -> Result<Option<TelemetryRecord>> {
    let fields = RecordFields::new(definition, line)?;

    let record = match definition.name.as_str() {
        "GPS" => {
            if fields.is_secondary_instance()? {
                return Ok(None);
            }
            if fields.has("Status") && fields.u64("Status")? < GPS_OK_FIX_3D {
                return Ok(None);
            }
            TelemetryRecord::GpsFix(GpsFix {
                time_us: fields.time_us()?,
                latitude: convert_gps_coordinate(fields.f64("Lat")?),
                longitude: convert_gps_coordinate(fields.f64("Lng")?),
                altitude: fields.f64_or("Alt", 0.0)?,
            })
        }
        "BAT" => {
            if fields.is_secondary_instance()? {
                return Ok(None);
            }
            TelemetryRecord::BatterySample(BatterySample {
                time_us: fields.time_us()?,
                voltage: fields.f64_or("Volt", 0.0)?,
                current: fields.f64_or("Curr", 0.0)?,
                consumed_mah: fields.f64("CurrTot")?,
            })
        }
        "BARO" => {
            if fields.is_secondary_instance()? {
                return Ok(None);
            }
            TelemetryRecord::BaroSample(BaroSample {
                time_us: fields.time_us()?,
                altitude: fields.f64("Alt")?,
            })
        }
        "MSG" => TelemetryRecord::MessageEvent(MessageEvent {
            time_us: fields.time_us()?,
            text: fields.text("Message")?,
        }),
        "MODE" => TelemetryRecord::ModeChangeEvent(decode_mode(&fields)?),
        "CMD" => TelemetryRecord::MissionCommand(MissionWaypoint {
            latitude: convert_gps_coordinate(fields.f64("Lat")?),
            longitude: convert_gps_coordinate(fields.f64("Lng")?),
            sequence: to_u32(&fields, "CNum")?,
            altitude: fields.f64_or("Alt", 0.0)?,
            command_id: to_u16(&fields, "CId")?,
        }),
        _ => return Ok(None),
    };

    Ok(Some(record))
}

/// Decode a MODE line
pub fn decode_mode(fields: &RecordFields<'_, '_>) -> Result<ModeChangeEvent> {
    let mode_number = if fields.has("ModeNum") {
        fields.raw("ModeNum")?.parse::<i64>().ok()
    } else {
        None
    };
    Ok(ModeChangeEvent {
        time_us: fields.time_us()?,
        mode: fields.raw("Mode")?.to_string(),
        mode_number,
    })
}

/// Decode a PARM line into name and value
pub fn decode_parameter(fields: &RecordFields<'_, '_>) -> Result<(String, f64)> {
    Ok((fields.raw("Name")?.to_string(), fields.f64("Value")?))
}

fn to_u32(fields: &RecordFields<'_, '_>, column: &str) -> Result<u32> {
    let value = fields.u64(column)?;
    u32::try_from(value).map_err(|_| fields.error(format!("{} out of range: {}", column, value)))
}

fn to_u16(fields: &RecordFields<'_, '_>, column: &str) -> Result<u16> {
    let value = fields.u64(column)?;
    u16::try_from(value).map_err(|_| fields.error(format!("{} out of range: {}", column, value)))
}
