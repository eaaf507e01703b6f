//! Integration tests for loading raw exports and producing the training CSV.

use data_loader::{read_training_table, write_training_table, DataLoadError, SourceTables};
use std::fs;
use std::path::Path;

fn write_sources(dir: &Path, hourly: &str) {
    fs::write(
        dir.join("day_forecast.csv"),
        "iddayforecast;date;idspot\n10;2023-05-01;3\n11;2023-05-02;3\n",
    )
    .unwrap();
    fs::write(dir.join("hour_forecast.csv"), hourly).unwrap();
    fs::write(
        dir.join("sea_condition_fact.csv"),
        "date;bulk;texture;shape;uniformity;score;idspot\n\
         2023-05-01 09:00:00;1;clean;peaky;regular;4;3\n\
         2023-05-01 15:00:00;2;choppy;closeout;irregular;2;3\n\
         2023-05-02 00:00:00;0;glassy;;;1;3\n\
         2023-05-02 06:00:00;1;clean;peaky;regular;3;3\n",
    )
    .unwrap();
}

const HOURLY: &str = "iddayforecast;time;sigheight;swellheight;period;windspeed;winddirdegree\n\
    10;900;1.4;1.1;11;3.5;250\n\
    10;1200;1.6;1.2;11;6.0;255\n\
    10;1500;2.3;1.9;13;9.5;260\n\
    11;0;0.4;0.3;6;2.0;90\n\
    11;600;;0.5;7;2.5;95\n";

#[test]
fn test_end_to_end_build() {
    let dir = tempfile::tempdir().unwrap();
    write_sources(dir.path(), HOURLY);

    let tables = SourceTables::load_from_dir(dir.path(), b';').unwrap();
    assert_eq!(tables.daily.len(), 2);
    assert_eq!(tables.hourly.len(), 5);
    assert_eq!(tables.conditions.len(), 4);

    let rows = tables.build_training_table().unwrap();

    // 12:00 has no observation, 06:00 on day 11 has a missing sigheight
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.iter().map(|r| r.bulk).collect::<Vec<_>>(), vec![1, 2, 0]);
    assert_eq!(rows[1].windspeed, 9.5);
    assert_eq!(rows[2].sigheight, 0.4);

    let out = dir.path().join("sea_activity_dataset.csv");
    write_training_table(&out, &rows).unwrap();
    assert_eq!(read_training_table(&out).unwrap(), rows);
}

#[test]
fn test_bad_time_code_aborts_build() {
    let dir = tempfile::tempdir().unwrap();
    write_sources(
        dir.path(),
        "iddayforecast;time;sigheight;swellheight;period;windspeed;winddirdegree\n\
         10;9am;1.4;1.1;11;3.5;250\n",
    );

    let tables = SourceTables::load_from_dir(dir.path(), b';').unwrap();
    let err = tables.build_training_table().unwrap_err();
    assert!(matches!(err, DataLoadError::Timestamp { .. }));
}

#[test]
fn test_blank_time_cell_aborts_build() {
    let dir = tempfile::tempdir().unwrap();
    write_sources(
        dir.path(),
        "iddayforecast;time;sigheight;swellheight;period;windspeed;winddirdegree\n\
         11;;1.0;1.0;9;3;200\n",
    );

    let tables = SourceTables::load_from_dir(dir.path(), b';').unwrap();
    assert_eq!(tables.hourly[0].time, "");

    let err = tables.build_training_table().unwrap_err();
    assert!(matches!(err, DataLoadError::Timestamp { .. }));
}

#[test]
fn test_missing_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SourceTables::load_from_dir(dir.path(), b';');
    assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
}
