//! Single pass over the record stream
//!
//! Each record is dispatched by kind: fixes, baro and battery samples feed the
//! [`StatisticsAggregator`], mission commands are buffered for the normalizer, and
//! text messages and mode changes become event markers at the last known position.

use crate::conversion::{extract_firmware_version, format_mode_change};
use crate::error::Result;
use crate::mission::normalize_mission;
use crate::stats::StatisticsAggregator;
use crate::types::{
    EventMarker, FirmwareInfo, FlightSummary, GeoPoint, MissionReport, MissionWaypoint,
    TelemetryRecord,
};

/// Everything derived from one pass over a log
#[derive(Debug, Clone, PartialEq)]
pub struct FlightAnalysis {
    pub flight: FlightSummary,
    pub track: Vec<GeoPoint>,
    pub mission: MissionReport,
    pub events: Vec<EventMarker>,
    pub firmware: Option<FirmwareInfo>,
    pub records_processed: usize,
}

#[derive(Debug, Default)]
pub struct RecordClassifier {
    stats: StatisticsAggregator,
    mission_commands: Vec<MissionWaypoint>,
    events: Vec<EventMarker>,
    firmware: Option<FirmwareInfo>,
    records_processed: usize,
}

impl RecordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, record: TelemetryRecord) {
        self.records_processed += 1;

        match record {
            TelemetryRecord::GpsFix(fix) => self.stats.observe_fix(fix),
            TelemetryRecord::BatterySample(sample) => self.stats.observe_battery(sample),
            TelemetryRecord::BaroSample(sample) => self.stats.observe_altitude(sample),
            TelemetryRecord::MessageEvent(message) => {
                if self.firmware.is_none() {
                    self.firmware = extract_firmware_version(&message.text);
                }
                self.push_event(message.time_us, message.text);
            }
            TelemetryRecord::ModeChangeEvent(change) => {
                self.push_event(change.time_us, format_mode_change(&change.mode));
            }
            TelemetryRecord::MissionCommand(waypoint) => self.mission_commands.push(waypoint),
        }
    }

    fn push_event(&mut self, time_us: u64, text: String) {
        let position = self.stats.last_fix().map(|fix| fix.position());
        if position.is_none() {
            log::debug!("Event before first GPS fix has no position: {}", text);
        }
        self.events.push(EventMarker {
            time_us,
            text,
            position,
        });
    }

    /// Finalizes the aggregator and normalizes the buffered mission
    pub fn finish(self) -> FlightAnalysis {
        let mission = normalize_mission(&self.mission_commands);
        let (flight, track) = self.stats.finish();
        FlightAnalysis {
            flight,
            track,
            mission,
            events: self.events,
            firmware: self.firmware,
            records_processed: self.records_processed,
        }
    }
}

/// Classify every record of `records`, stopping at the first decode error
pub fn analyze_records<I>(records: I) -> Result<FlightAnalysis>
where
    I: IntoIterator<Item = Result<TelemetryRecord>>,
{
    let mut classifier = RecordClassifier::new();
    for record in records {
        classifier.classify(record?);
    }
    let analysis = classifier.finish();
    log::debug!(
        "Classified {} records: {} fixes, {} events",
        analysis.records_processed,
        analysis.flight.fix_count,
        analysis.events.len()
    );
    Ok(analysis)
}
