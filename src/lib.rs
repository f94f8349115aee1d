//! MAVLog Analyzer Library
//!
//! A Rust library for analyzing ArduPilot DataFlash text logs: flight statistics,
//! mission geometry, parameter checks and map layers for the flown track.
//!
//! # Features
//!
//! - **`cli`** (default): Build the `mavlog` command-line binary
//! - **`json`** (default): Enable map export as JSON or a Leaflet HTML page
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Analyze a log and print the flight statistics:
//! ```rust,no_run
//! use mavlog_analyzer::{analyze_records, render_flight_report, DataFlashLog};
//! use std::path::Path;
//!
//! let log = DataFlashLog::open(Path::new("00000042.log")).unwrap();
//! let analysis = analyze_records(log.records()).unwrap();
//! println!("{}", render_flight_report(&analysis.flight, analysis.firmware.as_ref()));
//! ```
//!
//! Check vehicle parameters:
//! ```rust,no_run
//! use mavlog_analyzer::{default_rules, DataFlashLog};
//! use std::path::Path;
//!
//! let log = DataFlashLog::open(Path::new("00000042.log")).unwrap();
//! for rule in default_rules() {
//!     println!("{}: {}", rule.label, rule.check(log.parameters()));
//! }
//! ```
//!
//! # Public API
//!
//! ## Decoding
//! - [`DataFlashLog`] - Text log with its parameters, mode timeline and record stream
//! - [`TelemetryRecord`] - One decoded GPS/BAT/BARO/MSG/MODE/CMD record
//!
//! ## Analysis
//! - [`analyze_records`] - Single pass producing a [`FlightAnalysis`]
//! - [`StatisticsAggregator`] - Running flight statistics
//! - [`normalize_mission`] - Deduplicated, ordered mission summary
//! - [`distance`] - WGS-84 geodesic distance
//!
//! ## Parameters
//! - [`filter_by_pattern`] - Case-insensitive glob filter over a [`ParameterSet`]
//! - [`check_named_rule`] - Evaluate one parameter against a predicate
//!
//! ## Output
//! - [`render_flight_report`], [`render_mission_report`] - Text report sections
//! - [`build_map`] - Map layers for the external renderer
//! - [`export_map`] - Save the map as JSON or HTML (`json` feature)

pub mod classifier;
pub mod conversion;
pub mod error;
pub mod export;
pub mod geodesy;
pub mod map;
pub mod mission;
pub mod params;
pub mod parser;
pub mod report;
pub mod stats;
pub mod types;

#[allow(ambiguous_glob_reexports)]
pub use classifier::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use geodesy::*;
#[allow(ambiguous_glob_reexports)]
pub use map::*;
#[allow(ambiguous_glob_reexports)]
pub use mission::*;
#[allow(ambiguous_glob_reexports)]
pub use params::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use report::*;
#[allow(ambiguous_glob_reexports)]
pub use stats::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
