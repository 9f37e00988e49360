//! Loading scan requests from JSON.

use anyhow::{Context, Result};
use deconflict_core::{FleetScanInput, MissionScanInput};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when the path is `-`.
fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("invalid {what} input"))
}

pub fn parse_mission(raw: &str) -> Result<MissionScanInput> {
    parse(raw, "mission")
}

pub fn parse_fleet(raw: &str) -> Result<FleetScanInput> {
    parse(raw, "fleet")
}

pub fn load_mission(path: &Path) -> Result<MissionScanInput> {
    parse_mission(&read_source(path)?)
}

pub fn load_fleet(path: &Path) -> Result<FleetScanInput> {
    parse_fleet(&read_source(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_accepts_short_timestamp_key() {
        let input = parse_mission(
            r#"{"primary": {"id": "survey", "waypoints": [{"x":0,"y":0,"z":0},{"x":1,"y":0,"z":0}],
                "time_window": [0, 4]},
                "others": [{"id": "d1", "waypoints": [{"x":1,"y":1,"z":1,"t":2.5}]}]}"#,
        )
        .unwrap();
        assert_eq!(input.primary.id, "survey");
        assert_eq!(input.others[0].waypoints[0].timestamp, 2.5);
    }

    #[test]
    fn fleet_rejects_missing_fields() {
        let err = parse_fleet(r#"{"trajectories": [{"id": "A"}]}"#).unwrap_err();
        assert!(err.to_string().contains("fleet"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_fleet(Path::new("/nonexistent/fleet.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fleet.json"));
    }
}
