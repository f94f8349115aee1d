//! CLI binary for MAVLog Analyzer
//!
//! Prints flight statistics, the mission summary, the flight mode timeline and
//! parameter checks for an ArduPilot text log, and optionally saves a map.

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use mavlog_analyzer::{
    analyze_records, default_rules, export_map, render_flight_report, render_mission_report,
    render_mode_timeline, render_parameter_dump, render_rule_checks, DataFlashLog,
    ExportOptions, MapFormat, ParameterRule,
};
use std::path::{Path, PathBuf};

/// Runtime options collected from the command line
#[derive(Debug, Clone)]
struct AnalysisOptions {
    show_params: bool,
    pattern: String,
    rules: Vec<ParameterRule>,
    export: ExportOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            show_params: false,
            pattern: "*".to_string(),
            rules: default_rules(),
            export: ExportOptions::default(),
        }
    }
}

impl AnalysisOptions {
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut options = Self {
            show_params: matches.get_flag("params"),
            ..Self::default()
        };

        if let Some(pattern) = matches.get_one::<String>("pattern") {
            options.pattern = pattern.clone();
        }
        if let Some(checks) = matches.get_many::<ParameterRule>("check") {
            options.rules.extend(checks.cloned());
        }
        if let Some(format) = matches.get_one::<String>("map") {
            options.export.map = Some(format.parse::<MapFormat>()?);
        }
        options.export.output_dir = matches.get_one::<PathBuf>("output-dir").cloned();

        Ok(options)
    }
}

fn long_version() -> &'static str {
    let sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    let built = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    Box::leak(
        format!(
            "{} (git {}, built {})",
            env!("CARGO_PKG_VERSION"),
            sha,
            built
        )
        .into_boxed_str(),
    )
}

fn parse_rule(value: &str) -> std::result::Result<ParameterRule, String> {
    ParameterRule::parse(value).ok_or_else(|| format!("expected NAME=VALUE, got '{}'", value))
}

fn build_command() -> Command {
    Command::new("mavlog")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version())
        .about("Flight statistics, parameter checks and track maps for ArduPilot text logs.")
        .arg(
            Arg::new("logfile")
                .help("DataFlash text log to analyze (.log)")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("params")
                .long("params")
                .help("List all vehicle parameters matching --pattern")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .help("Case-insensitive wildcard for --params (default: *)")
                .value_name("GLOB"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Additional parameter check, e.g. --check ARMING_CHECK=1 (repeatable)")
                .value_name("NAME=VALUE")
                .value_parser(parse_rule)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .help("Save the flight map as <logfile>.html or <logfile>.json")
                .value_name("FORMAT")
                .value_parser(PossibleValuesParser::new(["html", "json"])),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for the saved map (default: same as input file)")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(path: &Path, options: &AnalysisOptions) -> Result<()> {
    println!("Loading {}", path.display());
    let log = DataFlashLog::open(path)
        .with_context(|| format!("Failed to load log file: {}", path.display()))?;

    let analysis = analyze_records(log.records())
        .with_context(|| format!("Failed to decode log file: {}", path.display()))?;

    println!();
    println!(
        "{}",
        render_flight_report(&analysis.flight, analysis.firmware.as_ref())
    );
    println!();
    println!("{}", render_mission_report(&analysis.mission));
    println!();
    println!("{}", render_mode_timeline(log.mode_transitions()));
    println!();
    println!("{}", render_rule_checks(&options.rules, log.parameters()));

    if options.show_params {
        println!();
        println!("{}", render_parameter_dump(log.parameters(), &options.pattern)?);
    }

    if let Some(format) = options.export.map {
        let map = analysis.to_map();
        let saved = export_map(&map, path, format, options.export.output_dir.as_deref())
            .with_context(|| format!("Failed to save map for {}", path.display()))?;
        println!();
        match format {
            MapFormat::Html => println!("{} saved. Open in browser to show track", saved.display()),
            MapFormat::Json => println!("{} saved", saved.display()),
        }
    }

    Ok(())
}

/// Dispatch parsed arguments. Without a log file the usage text is printed and
/// nothing else happens.
fn execute(matches: &ArgMatches) -> Result<()> {
    let Some(path) = matches.get_one::<PathBuf>("logfile") else {
        println!("{}", build_command().render_help());
        return Ok(());
    };

    let options = AnalysisOptions::from_matches(matches)?;
    log::debug!("Options: {:?}", options);

    run(path, &options)
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("debug"));
    execute(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_options_from_arguments() {
        let matches = build_command()
            .try_get_matches_from([
                "mavlog",
                "flight.log",
                "--params",
                "--pattern",
                "SERVO*",
                "--check",
                "ARMING_CHECK=1",
                "--map",
                "json",
                "--output-dir",
                "/tmp/maps",
            ])
            .unwrap();
        let options = AnalysisOptions::from_matches(&matches).unwrap();

        assert!(options.show_params);
        assert_eq!(options.pattern, "SERVO*");
        assert_eq!(options.rules.len(), 3);
        assert_eq!(options.rules[2].name, "ARMING_CHECK");
        assert_eq!(options.export.map, Some(MapFormat::Json));
        assert_eq!(options.export.output_dir, Some(PathBuf::from("/tmp/maps")));
    }

    #[test]
    fn test_defaults_without_logfile() {
        let matches = build_command().try_get_matches_from(["mavlog"]).unwrap();
        assert!(matches.get_one::<PathBuf>("logfile").is_none());
        let options = AnalysisOptions::from_matches(&matches).unwrap();
        assert_eq!(options.pattern, "*");
        assert_eq!(options.rules.len(), 2);
        assert_eq!(options.export.map, None);
    }

    #[test]
    fn test_no_logfile_prints_usage_and_succeeds() {
        let matches = build_command().try_get_matches_from(["mavlog"]).unwrap();
        assert!(execute(&matches).is_ok());

        let usage = build_command().render_help().to_string();
        assert!(usage.contains("[LOGFILE]") || usage.contains("[logfile]"));
        assert!(usage.contains("--params"));
        assert!(usage.contains("--map"));
    }

    #[test]
    fn test_missing_logfile_is_an_error() {
        let matches = build_command()
            .try_get_matches_from(["mavlog", "/nonexistent/dir/missing.log"])
            .unwrap();
        let err = execute(&matches).unwrap_err();
        assert!(err.to_string().contains("Failed to load log file"));
    }

    #[test]
    fn test_invalid_check_is_rejected() {
        let result = build_command().try_get_matches_from(["mavlog", "x.log", "--check", "THR_MAX"]);
        assert!(result.is_err());
    }
}
