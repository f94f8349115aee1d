//! Running flight statistics
//!
//! The aggregator folds GPS, barometer and battery samples in log order and is
//! finalized once into an immutable [`FlightSummary`].

use crate::error::MetricError;
use crate::geodesy::fix_distance;
use crate::types::{BaroSample, BatterySample, FlightSummary, GeoPoint, GpsFix, Metric};

/// Incremental state for the flight statistics
#[derive(Debug, Default, Clone)]
pub struct StatisticsAggregator {
    home: Option<GpsFix>,
    last_fix: Option<GpsFix>,
    total_distance_m: f64,
    max_range_m: f64,
    most_remote: Option<GpsFix>,
    max_altitude_m: Option<f64>,
    last_battery: Option<BatterySample>,
    track: Vec<GeoPoint>,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_fix(&mut self, fix: GpsFix) {
        self.track.push(fix.position());

        let (home, last) = match (self.home, self.last_fix) {
            (Some(home), Some(last)) => (home, last),
            _ => {
                self.home = Some(fix);
                self.last_fix = Some(fix);
                return;
            }
        };

        self.total_distance_m += fix_distance(&last, &fix);

        let home_distance = fix_distance(&home, &fix);
        if home_distance > self.max_range_m {
            self.max_range_m = home_distance;
            self.most_remote = Some(fix);
        }

        self.last_fix = Some(fix);
    }

    pub fn observe_altitude(&mut self, sample: BaroSample) {
        self.max_altitude_m = Some(match self.max_altitude_m {
            Some(current) => current.max(sample.altitude),
            None => sample.altitude,
        });
    }

    /// Keeps only the most recent sample; the log is assumed chronological
    pub fn observe_battery(&mut self, sample: BatterySample) {
        self.last_battery = Some(sample);
    }

    pub fn home(&self) -> Option<&GpsFix> {
        self.home.as_ref()
    }

    pub fn last_fix(&self) -> Option<&GpsFix> {
        self.last_fix.as_ref()
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    pub fn max_range_m(&self) -> f64 {
        self.max_range_m
    }

    pub fn max_altitude_m(&self) -> Option<f64> {
        self.max_altitude_m
    }

    /// Finalizes the statistics, returning the summary and the GPS track
    pub fn finish(self) -> (FlightSummary, Vec<GeoPoint>) {
        let battery = self.last_battery.ok_or(MetricError::MissingBattery);

        let total_time_s = battery.map(|b| b.time_us as f64 / 1_000_000.0);
        let battery_used_mah = battery.map(|b| b.consumed_mah);
        let average_efficiency =
            efficiency(battery_used_mah, self.home.is_some(), self.total_distance_m);

        let summary = FlightSummary {
            total_time_s,
            max_altitude_m: self.max_altitude_m.ok_or(MetricError::MissingBaro),
            battery_used_mah,
            total_distance_m: self.total_distance_m,
            max_range_m: self.max_range_m,
            average_efficiency,
            home: self.home,
            last_fix: self.last_fix,
            most_remote: self.most_remote,
            fix_count: self.track.len(),
        };
        (summary, self.track)
    }
}

/// mAh per km flown
fn efficiency(consumed_mah: Metric, has_fix: bool, distance_m: f64) -> Metric {
    let consumed = consumed_mah?;
    if !has_fix {
        return Err(MetricError::MissingGps);
    }
    if distance_m <= 0.0 {
        return Err(MetricError::ZeroDistance);
    }
    Ok(consumed * 1000.0 / distance_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::distance;

    fn fix(time_us: u64, latitude: f64, longitude: f64) -> GpsFix {
        GpsFix {
            time_us,
            latitude,
            longitude,
            altitude: 100.0,
        }
    }

    fn battery(time_us: u64, consumed_mah: f64) -> BatterySample {
        BatterySample {
            time_us,
            voltage: 12.1,
            current: 8.0,
            consumed_mah,
        }
    }

    #[test]
    fn test_first_fix_becomes_home() {
        let mut stats = StatisticsAggregator::new();
        stats.observe_fix(fix(1, 47.0, 8.0));
        assert_eq!(stats.home().map(|h| h.time_us), Some(1));
        assert_eq!(stats.last_fix().map(|h| h.time_us), Some(1));
        assert_eq!(stats.total_distance_m(), 0.0);

        stats.observe_fix(fix(2, 47.001, 8.0));
        assert_eq!(stats.home().map(|h| h.time_us), Some(1));
        assert_eq!(stats.last_fix().map(|h| h.time_us), Some(2));
    }

    #[test]
    fn test_equator_track_distance_and_range() {
        let mut stats = StatisticsAggregator::new();
        stats.observe_fix(fix(1, 0.0, 0.0));
        stats.observe_fix(fix(2, 0.0, 0.001));
        stats.observe_fix(fix(3, 0.0, 0.002));

        let (summary, track) = stats.finish();
        assert_eq!(track.len(), 3);
        assert!((summary.total_distance_m - 222.64).abs() < 0.1);
        assert!((summary.max_range_m - 222.64).abs() < 0.1);
        assert_eq!(summary.most_remote.map(|f| f.time_us), Some(3));
    }

    #[test]
    fn test_cumulative_distance_is_sum_of_segments() {
        let fixes = [
            fix(1, 47.0, 8.0),
            fix(2, 47.002, 8.001),
            fix(3, 47.001, 8.004),
            fix(4, 46.998, 8.002),
            fix(5, 47.0, 8.0),
        ];
        let mut stats = StatisticsAggregator::new();
        for f in fixes {
            stats.observe_fix(f);
        }

        let expected: f64 = fixes
            .windows(2)
            .map(|w| distance(w[0].position(), w[1].position()))
            .sum();
        assert!((stats.total_distance_m() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_max_range_is_non_decreasing_and_tracks_furthest_fix() {
        let fixes = [
            fix(1, 47.0, 8.0),
            fix(2, 47.01, 8.0),
            fix(3, 47.005, 8.0),
            fix(4, 47.02, 8.0),
            fix(5, 47.0, 8.0),
        ];
        let mut stats = StatisticsAggregator::new();
        let mut previous = 0.0;
        for f in fixes {
            stats.observe_fix(f);
            assert!(stats.max_range_m() >= previous);
            previous = stats.max_range_m();
        }

        let expected = fixes
            .iter()
            .map(|f| distance(fixes[0].position(), f.position()))
            .fold(0.0, f64::max);
        let (summary, _) = stats.finish();
        assert!((summary.max_range_m - expected).abs() < 1e-6);
        assert_eq!(summary.most_remote.map(|f| f.time_us), Some(4));
    }

    #[test]
    fn test_max_altitude_keeps_highest_sample() {
        let mut stats = StatisticsAggregator::new();
        assert_eq!(stats.max_altitude_m(), None);
        for altitude in [-2.0, 35.5, 120.25, 80.0] {
            stats.observe_altitude(BaroSample {
                time_us: 0,
                altitude,
            });
        }
        assert_eq!(stats.max_altitude_m(), Some(120.25));
    }

    #[test]
    fn test_last_battery_sample_wins() {
        let mut stats = StatisticsAggregator::new();
        stats.observe_fix(fix(1, 0.0, 0.0));
        stats.observe_fix(fix(2, 0.0, 0.01));
        stats.observe_battery(battery(10_000_000, 120.0));
        stats.observe_battery(battery(95_500_000, 870.0));

        let (summary, _) = stats.finish();
        assert_eq!(summary.total_time_s, Ok(95.5));
        assert_eq!(summary.battery_used_mah, Ok(870.0));
        let expected = 870.0 * 1000.0 / summary.total_distance_m;
        let efficiency = summary.average_efficiency.expect("efficiency");
        assert!((efficiency - expected).abs() < 1e-9);
    }

    #[test]
    fn test_missing_battery_is_reported_per_metric() {
        let mut stats = StatisticsAggregator::new();
        stats.observe_fix(fix(1, 0.0, 0.0));
        stats.observe_fix(fix(2, 0.0, 0.001));
        stats.observe_altitude(BaroSample {
            time_us: 2,
            altitude: 10.0,
        });

        let (summary, _) = stats.finish();
        assert_eq!(summary.total_time_s, Err(MetricError::MissingBattery));
        assert_eq!(summary.battery_used_mah, Err(MetricError::MissingBattery));
        assert_eq!(summary.average_efficiency, Err(MetricError::MissingBattery));
        assert_eq!(summary.max_altitude_m, Ok(10.0));
        assert!(summary.total_distance_m > 0.0);
    }

    #[test]
    fn test_zero_distance_efficiency_is_undefined() {
        let mut stats = StatisticsAggregator::new();
        stats.observe_fix(fix(1, 47.0, 8.0));
        stats.observe_fix(fix(2, 47.0, 8.0));
        stats.observe_battery(battery(5_000_000, 12.0));

        let (summary, _) = stats.finish();
        assert_eq!(summary.average_efficiency, Err(MetricError::ZeroDistance));
        assert_eq!(summary.most_remote, None);
    }

    #[test]
    fn test_no_gps_efficiency() {
        let mut stats = StatisticsAggregator::new();
        stats.observe_battery(battery(5_000_000, 12.0));

        let (summary, track) = stats.finish();
        assert!(track.is_empty());
        assert_eq!(summary.average_efficiency, Err(MetricError::MissingGps));
        assert_eq!(summary.total_time_s, Ok(5.0));
        assert_eq!(summary.home, None);
    }
}
