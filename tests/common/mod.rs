//! Shared fixtures for the integration tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const FORMATS: &str = "\
FMT, 128, 89, FMT, BBnNZ, Type,Length,Name,Format,Columns
FMT, 64, 31, PARM, QNf, TimeUS,Name,Value
FMT, 130, 45, GPS, QBLLe, TimeUS,Status,Lat,Lng,Alt
FMT, 131, 30, BAT, Qfff, TimeUS,Volt,Curr,CurrTot
FMT, 132, 20, BARO, Qf, TimeUS,Alt
FMT, 133, 70, MSG, QZ, TimeUS,Message
FMT, 134, 20, MODE, QMBB, TimeUS,Mode,ModeNum,Rsn
FMT, 135, 60, CMD, QHHHffffLLf, TimeUS,CTot,CNum,CId,Prm1,Prm2,Prm3,Prm4,Lat,Lng,Alt
";

/// Three fixes 0.001 degrees apart along the equator, a four command mission
/// with a duplicated waypoint and an autoland, and 500 mAh used over 120 seconds
pub const FLIGHT: &str = "\
PARM, 100, SERVO_AUTO_TRIM, 1
PARM, 100, STALL_PREVENTION, 1
PARM, 100, THR_MAX, 100
MSG, 200, ArduPlane V4.3.2 (c2f5e8ac)
MODE, 500000, MANUAL, 0, 0
BARO, 900000, 10.5
GPS, 1000000, 3, 0.0, 10.000, 12.0
GPS, 1500000, 1, 5.0, 5.0, 0.0
BAT, 1100000, 12.4, 6.0, 3.0
CMD, 1200000, 4, 0, 16, 0, 0, 0, 0, 0.0, 10.000, 0
CMD, 1200000, 4, 1, 16, 0, 0, 0, 0, 0.0, 10.001, 100
CMD, 1200000, 4, 1, 16, 0, 0, 0, 0, 0.0, 10.001, 100
CMD, 1200000, 4, 2, 21, 0, 0, 0, 0, 0.0, 10.002, 0
GPS, 2000000, 3, 0.0, 10.001, 60.0
BARO, 2100000, 55.25
MODE, 5000000, AUTO, 10, 2
MSG, 5100000, Mission: 1 WP, alt 100
GPS, 3000000, 3, 0.0, 10.002, 30.0
MSG, 6000000, Failsafe. Long event on: type=1/reason=3
BARO, 6100000, 30.0
BAT, 120000000, 11.8, 4.0, 500.0
";

/// Same flight without a battery monitor or a mission
pub const FLIGHT_WITHOUT_BATTERY: &str = "\
GPS, 1000000, 3, 0.0, 10.000, 12.0
BARO, 1100000, 20.0
GPS, 2000000, 3, 0.0, 10.001, 60.0
";

/// Write `body` after the FMT header into `<dir>/<name>`
pub fn write_log(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("{}{}", FORMATS, body)).expect("Failed to write log fixture");
    path
}
