//! Training table construction.
//!
//! Joins the three raw tables into one feature/label table:
//! 1. Attach each hourly record's calendar date (left join on day id)
//! 2. Build a timestamp from date + HHMM time code
//! 3. Parse the observation timestamps
//! 4. Inner join hourly records to observations on exact timestamp
//! 5. Keep the five features plus `bulk`, dropping incomplete rows

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::timestamp::{hourly_timestamp, parse_timestamp};
use crate::types::*;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub const DAILY_FILE: &str = "day_forecast.csv";
pub const HOURLY_FILE: &str = "hour_forecast.csv";
pub const CONDITIONS_FILE: &str = "sea_condition_fact.csv";

/// The three raw tables, as read from disk
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub daily: Vec<DailyForecastRecord>,
    pub hourly: Vec<HourlyForecastRecord>,
    pub conditions: Vec<SeaConditionRecord>,
}

impl SourceTables {
    /// Load the three raw exports from a directory
    ///
    /// The files are parsed in parallel with nested `rayon::join`.
    pub fn load_from_dir(data_dir: &Path, delimiter: u8) -> Result<Self> {
        info!("Loading forecast tables from {:?}", data_dir);

        let daily_path = data_dir.join(DAILY_FILE);
        let hourly_path = data_dir.join(HOURLY_FILE);
        let conditions_path = data_dir.join(CONDITIONS_FILE);

        let ((daily, hourly), conditions) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_daily(&daily_path, delimiter),
                    || parser::parse_hourly(&hourly_path, delimiter),
                )
            },
            || parser::parse_conditions(&conditions_path, delimiter),
        );

        let tables = SourceTables {
            daily: daily?,
            hourly: hourly?,
            conditions: conditions?,
        };

        info!(
            "Loaded {} daily, {} hourly, {} condition records",
            tables.daily.len(),
            tables.hourly.len(),
            tables.conditions.len()
        );
        Ok(tables)
    }

    /// Run the full join and cleaning on these tables
    pub fn build_training_table(&self) -> Result<Vec<TrainingRow>> {
        build_training_table(&self.daily, &self.hourly, &self.conditions)
    }
}

/// Hourly record with its derived timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedHourly {
    pub record: HourlyForecastRecord,
    pub datetime: NaiveDateTime,
}

/// Build the clean training table from the raw tables
///
/// Output order follows the hourly input. Rows are dropped when their day
/// is unknown, when no observation shares their timestamp, or when any of
/// the six retained fields is missing. Timestamp failures abort the build.
pub fn build_training_table(
    daily: &[DailyForecastRecord],
    hourly: &[HourlyForecastRecord],
    conditions: &[SeaConditionRecord],
) -> Result<Vec<TrainingRow>> {
    let enriched = enrich_hourly(daily, hourly)?;
    let joined = join_conditions(&enriched, conditions)?;
    info!("Merged {} hourly records with observations", joined.len());

    let rows = clean_rows(&joined)?;
    info!(
        "Training table has {} rows after dropping incomplete ones",
        rows.len()
    );
    Ok(rows)
}

/// Steps 1-2: attach the parent day's date and derive the timestamp
///
/// Duplicate day ids produce one enriched record per matching day. Hourly
/// records without a parent day have no date and are skipped.
pub fn enrich_hourly(
    daily: &[DailyForecastRecord],
    hourly: &[HourlyForecastRecord],
) -> Result<Vec<EnrichedHourly>> {
    let mut dates_by_day: HashMap<DayId, Vec<&str>> = HashMap::new();
    for day in daily {
        dates_by_day
            .entry(day.id)
            .or_insert_with(Vec::new)
            .push(day.date.as_str());
    }

    let mut enriched = Vec::with_capacity(hourly.len());
    let mut orphans = 0usize;

    for record in hourly {
        let Some(dates) = dates_by_day.get(&record.iddayforecast) else {
            orphans += 1;
            continue;
        };
        for date in dates {
            let datetime = hourly_timestamp(date, &record.time)?;
            enriched.push(EnrichedHourly {
                record: record.clone(),
                datetime,
            });
        }
    }

    if orphans > 0 {
        debug!("{} hourly records reference an unknown day", orphans);
    }
    Ok(enriched)
}

/// Steps 3-4: inner join on exact timestamp equality
///
/// Every observation at the same instant yields its own joined record.
/// Observations with a blank date have no instant and are skipped; any
/// other unreadable date is an error.
pub fn join_conditions(
    enriched: &[EnrichedHourly],
    conditions: &[SeaConditionRecord],
) -> Result<Vec<JoinedRecord>> {
    let mut by_time: HashMap<NaiveDateTime, Vec<&SeaConditionRecord>> = HashMap::new();
    let mut undated = 0usize;

    for condition in conditions {
        if condition.date.trim().is_empty() {
            undated += 1;
            continue;
        }
        let datetime = parse_timestamp(&condition.date)?;
        by_time
            .entry(datetime)
            .or_insert_with(Vec::new)
            .push(condition);
    }

    if undated > 0 {
        debug!("{} observations have no date", undated);
    }

    let joined = enriched
        .iter()
        .flat_map(|hourly| {
            by_time
                .get(&hourly.datetime)
                .into_iter()
                .flatten()
                .map(move |condition| JoinedRecord {
                    hourly: hourly.record.clone(),
                    datetime: hourly.datetime,
                    bulk: condition.bulk,
                    texture: condition.texture.clone(),
                    shape: condition.shape.clone(),
                    uniformity: condition.uniformity.clone(),
                    score: condition.score.clone(),
                })
        })
        .collect();

    Ok(joined)
}

/// Step 5: project to features + label and drop incomplete rows
///
/// Missing means an empty cell or NaN. A present but fractional `bulk` is
/// an error, since the label must be an integer class.
pub fn clean_rows(joined: &[JoinedRecord]) -> Result<Vec<TrainingRow>> {
    let mut rows = Vec::with_capacity(joined.len());

    for record in joined {
        let h = &record.hourly;
        let (
            Some(sigheight),
            Some(swellheight),
            Some(period),
            Some(windspeed),
            Some(winddirdegree),
            Some(bulk),
        ) = (
            present(h.sigheight),
            present(h.swellheight),
            present(h.period),
            present(h.windspeed),
            present(h.winddirdegree),
            present(record.bulk),
        )
        else {
            continue;
        };

        rows.push(TrainingRow {
            sigheight,
            swellheight,
            period,
            windspeed,
            winddirdegree,
            bulk: bulk_class(bulk)?,
        });
    }

    Ok(rows)
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

fn bulk_class(value: f64) -> Result<BulkClass> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as BulkClass)
    } else {
        Err(DataLoadError::InvalidValue {
            field: "bulk".to_string(),
            value: value.to_string(),
        })
    }
}
