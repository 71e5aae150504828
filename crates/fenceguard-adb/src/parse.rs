use std::sync::LazyLock;

use regex::Regex;

use crate::bridge::Coordinate;

static LOCATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"last\s+location").unwrap());
static DECIMAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d*\.\d+|\d+").unwrap());

/// Parse `adb devices` output into the serials of online devices.
///
/// The first line is the header. Each following line is
/// `<serial>\t<state>`; only lines whose state is exactly `device` count
/// as online. Unauthorized and offline entries are dropped.
#[must_use]
pub fn device_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let serial = fields.next()?;
            match fields.next() {
                Some("device") if !serial.is_empty() => Some(serial.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Extract the last known location from a `dumpsys location` dump.
///
/// Finds the `last location` marker and reads the first two decimal
/// tokens after it as latitude then longitude. Returns `None` when the
/// marker is absent or fewer than two numbers follow it, so a device
/// without a fix never poisons the poll cycle.
#[must_use]
pub fn last_location(output: &str) -> Option<Coordinate> {
    let tail = &output[LOCATION_MARKER.find(output)?.end()..];
    let lat_match = DECIMAL_NUMBER.find(tail)?;
    let lat: f64 = lat_match.as_str().parse().ok()?;
    let lon_match = DECIMAL_NUMBER.find(&tail[lat_match.end()..])?;
    let lon: f64 = lon_match.as_str().parse().ok()?;

    Some(Coordinate { lat, lon })
}

/// Extract the resumed activity's package from a `dumpsys activity activities` dump.
///
/// The relevant line looks like
/// `mResumedActivity: ActivityRecord{29b6b2a u0 com.whatsapp/.Main t12}`;
/// the package is everything before the first `/` in the fourth field.
/// Returns `None` when no resumed activity is reported or the line is
/// too short to carry one.
#[must_use]
pub fn resumed_activity(output: &str) -> Option<String> {
    let line = output.lines().find(|l| l.contains("mResumedActivity"))?;
    let field = line.split_whitespace().nth(3)?;
    let package = field.split('/').next()?;
    if package.is_empty() {
        return None;
    }
    Some(package.to_string())
}
