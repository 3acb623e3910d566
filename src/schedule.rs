//! Pipe schedule: parsing and procedural generation
//!
//! A schedule is a CSV table, one pipe pair per row:
//!
//! ```text
//! gap_y,gap_height,time
//! 0.5,0.25,1
//! 0.3,0.2,2.5
//! ```
//!
//! Rows are validated here so the reducer can assume well-formed spawns.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::Action;

/// Fields per schedule row
pub const SCHEDULE_FIELDS: usize = 3;

/// Gap of a generated schedule, as fractions of viewport height
pub const GENERATED_GAP_CENTER: std::ops::RangeInclusive<f64> = 0.3..=0.7;
pub const GENERATED_GAP_HEIGHT: std::ops::RangeInclusive<f64> = 0.2..=0.35;
/// Seconds between generated pipe pairs
pub const GENERATED_INTERVAL_SECS: f64 = 2.0;

/// Why a schedule row was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("field '{field}' is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field '{field}' must be a fraction in [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("spawn time must be a non-negative number of seconds, got {value}")]
    NegativeTime { value: f64 },
}

/// One scheduled pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSpawn {
    /// Vertical centre of the gap (fraction of viewport height)
    pub gap_center: f64,
    /// Gap height (fraction of viewport height)
    pub gap_height: f64,
    /// Seconds from game start
    pub time: f64,
}

impl PipeSpawn {
    pub fn action(&self) -> Action {
        Action::SpawnPipes {
            gap_center: self.gap_center,
            gap_height: self.gap_height,
            time: self.time,
        }
    }

    /// Spawn time in milliseconds
    pub fn at_ms(&self) -> u64 {
        (self.time * 1000.0).round() as u64
    }
}

impl From<&PipeSpawn> for Action {
    fn from(spawn: &PipeSpawn) -> Self {
        spawn.action()
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, ScheduleError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ScheduleError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        })
}

fn parse_fraction(field: &'static str, raw: &str) -> Result<f64, ScheduleError> {
    let value = parse_field(field, raw)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ScheduleError::FractionOutOfRange { field, value });
    }
    Ok(value)
}

/// Parse one data row (`gap_y,gap_height,time`)
pub fn parse_row(line: &str) -> Result<PipeSpawn, ScheduleError> {
    let columns: Vec<&str> = line.split(',').collect();
    if columns.len() != SCHEDULE_FIELDS {
        return Err(ScheduleError::FieldCount {
            expected: SCHEDULE_FIELDS,
            got: columns.len(),
        });
    }

    let gap_center = parse_fraction("gap_y", columns[0])?;
    let gap_height = parse_fraction("gap_height", columns[1])?;
    let time = parse_field("time", columns[2])?;
    if !time.is_finite() || time < 0.0 {
        return Err(ScheduleError::NegativeTime { value: time });
    }

    Ok(PipeSpawn {
        gap_center,
        gap_height,
        time,
    })
}

/// Validated pipe pairs, ordered by spawn time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub spawns: Vec<PipeSpawn>,
}

impl Schedule {
    pub fn new(mut spawns: Vec<PipeSpawn>) -> Self {
        // Stable: rows sharing a time keep file order
        spawns.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { spawns }
    }

    /// Parse CSV text. The header row is skipped; blank and malformed
    /// rows are dropped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut spawns = Vec::new();
        let mut dropped = 0usize;

        for (index, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            match parse_row(line) {
                Ok(spawn) => spawns.push(spawn),
                Err(e) => {
                    dropped += 1;
                    log::warn!("Schedule line {}: dropped ({})", index + 1, e);
                }
            }
        }

        log::info!(
            "Parsed schedule: {} pipe pairs, {} rows dropped",
            spawns.len(),
            dropped
        );
        Self::new(spawns)
    }

    /// Procedural schedule from a seed; the same seed always yields the same pipes
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawns = (0..count)
            .map(|i| PipeSpawn {
                gap_center: rng.random_range(GENERATED_GAP_CENTER),
                gap_height: rng.random_range(GENERATED_GAP_HEIGHT),
                time: 1.0 + i as f64 * GENERATED_INTERVAL_SECS,
            })
            .collect();

        log::info!("Generated schedule: {} pipe pairs (seed {})", count, seed);
        Self::new(spawns)
    }

    pub fn len(&self) -> usize {
        self.spawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PipeSpawn> {
        self.spawns.iter()
    }
}
