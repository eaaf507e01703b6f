//! Parser for the raw forecast exports and the persisted training table.
//!
//! The raw exports are `;`-separated with a header row:
//! - day_forecast.csv: iddayforecast;date;...
//! - hour_forecast.csv: iddayforecast;time;sigheight;swellheight;period;windspeed;winddirdegree;...
//! - sea_condition_fact.csv: date;bulk;texture;shape;uniformity;score;...
//!
//! Extra columns are ignored. The cleaned training table is plain
//! comma-separated CSV.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Header of the persisted training table
pub const TRAINING_TABLE_HEADER: [&str; 6] = [
    "sigheight",
    "swellheight",
    "period",
    "windspeed",
    "winddirdegree",
    "bulk",
];

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Deserialize every record of a delimited file with a header row
fn read_records<T: DeserializeOwned>(path: &Path, delimiter: u8) -> Result<Vec<T>> {
    let file = open(path)?;
    let label = file_label(path);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| DataLoadError::ParseError {
            file: label.clone(),
            line: e.position().map(|p| p.line() as usize).unwrap_or(0),
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Parse the daily forecast table
pub fn parse_daily(path: &Path, delimiter: u8) -> Result<Vec<DailyForecastRecord>> {
    read_records(path, delimiter)
}

/// Parse the hourly forecast table
pub fn parse_hourly(path: &Path, delimiter: u8) -> Result<Vec<HourlyForecastRecord>> {
    read_records(path, delimiter)
}

/// Parse the observed sea-condition table
pub fn parse_conditions(path: &Path, delimiter: u8) -> Result<Vec<SeaConditionRecord>> {
    read_records(path, delimiter)
}

/// Read a previously persisted training table
pub fn read_training_table(path: &Path) -> Result<Vec<TrainingRow>> {
    read_records(path, b',')
}

/// Persist the training table as CSV
///
/// The header is always written, even for an empty table.
pub fn write_training_table(path: &Path, rows: &[TrainingRow]) -> Result<()> {
    let write_err = |reason: String| DataLoadError::WriteError {
        path: path.display().to_string(),
        reason,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_err(e.to_string()))?;

    writer
        .write_record(TRAINING_TABLE_HEADER)
        .map_err(|e| write_err(e.to_string()))?;
    for row in rows {
        writer.serialize(row).map_err(|e| write_err(e.to_string()))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_daily_accepts_iddayforecast_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "day_forecast.csv",
            "iddayforecast;date;idspot\n1;2023-05-01;7\n2;2023-05-02;7\n",
        );

        let daily = parse_daily(&path, b';').unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].id, 1);
        assert_eq!(daily[1].date, "2023-05-02");
    }

    #[test]
    fn test_parse_hourly_keeps_gaps_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "hour_forecast.csv",
            "iddayforecast;time;sigheight;swellheight;period;windspeed;winddirdegree\n\
             1;900;1.2;0.8;9;4.5;270\n\
             1;1200;;0.9;10;5.1;280\n",
        );

        let hourly = parse_hourly(&path, b';').unwrap();
        assert_eq!(hourly.len(), 2);
        assert_eq!(hourly[0].time, "900");
        assert_eq!(hourly[0].sigheight, Some(1.2));
        assert_eq!(hourly[1].sigheight, None);
    }

    #[test]
    fn test_parse_reports_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "hour_forecast.csv",
            "iddayforecast;time;sigheight;swellheight;period;windspeed;winddirdegree\n\
             1;900;1.2;0.8;9;4.5;270\n\
             1;1000;high;0.8;9;4.5;270\n",
        );

        match parse_hourly(&path, b';') {
            Err(DataLoadError::ParseError { file, line, .. }) => {
                assert_eq!(file, "hour_forecast.csv");
                assert_eq!(line, 3);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = parse_daily(Path::new("does/not/exist.csv"), b';');
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_training_table_roundtrip_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("sea_activity_dataset.csv");
        let rows = vec![TrainingRow {
            sigheight: 1.5,
            swellheight: 1.0,
            period: 11.0,
            windspeed: 3.2,
            winddirdegree: 240.0,
            bulk: 1,
        }];

        write_training_table(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("sigheight,swellheight,period,windspeed,winddirdegree,bulk\n"));
        assert!(text.trim_end().ends_with(",1"));
        assert_eq!(read_training_table(&path).unwrap(), rows);
    }

    #[test]
    fn test_empty_training_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_training_table(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), TRAINING_TABLE_HEADER.join(","));
        assert!(read_training_table(&path).unwrap().is_empty());
    }
}
