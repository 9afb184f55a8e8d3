//! Scrapes per-game stats for the roster into a single table.

use crate::{error::Error, roster::RosterEntry, Result, StatType, STAT_COLUMNS};
use chrono::NaiveDate;
use parse_display::Display;
use polars::prelude::*;
use std::{fs::File, path::Path, thread, time::Duration};

pub mod parse;
pub mod source;

pub use source::{GameLogSource, HttpSource};

pub const UNKNOWN_TEAM: &str = "Unknown";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[display(style = "lowercase")]
pub enum Segment {
    Regular,
    Postseason,
}

impl Segment {
    pub const ALL: [Segment; 2] = [Segment::Regular, Segment::Postseason];

    /// Path component of the game log page for this segment
    pub fn path(self, season: u16) -> String {
        match self {
            Segment::Regular => season.to_string(),
            Segment::Postseason => "post".to_string(),
        }
    }
}

/// One player's line for one game, as scraped
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub player: String,
    pub team: String,
    pub game_date: Option<NaiveDate>,
    /// Indexed by [`StatType::index`]
    pub stats: [f64; 7],
}

impl GameRecord {
    pub fn stat(&self, stat: StatType) -> f64 {
        self.stats[stat.index()]
    }
}

pub struct Collector<S> {
    source: S,
    delay: Duration,
}

impl<S: GameLogSource> Collector<S> {
    pub fn new(source: S, delay: Duration) -> Self {
        Self { source, delay }
    }

    pub fn collect_one(&self, entry: RosterEntry, segment: Segment) -> Result<Vec<GameRecord>> {
        let html = self.source.fetch(entry.code, segment)?;
        parse::parse_game_log(&html, entry.name)
    }

    /// Fetches every (player, segment) pair once. A failed pair is logged and skipped;
    /// the rest of the run carries on. Returns records newest first.
    pub fn run(&self, roster: &[RosterEntry]) -> Result<Vec<GameRecord>> {
        let mut records = Vec::new();

        for &entry in roster {
            for segment in Segment::ALL {
                match self.collect_one(entry, segment) {
                    Ok(games) => {
                        log::info!("Loaded {} ({}): {} games", entry.name, segment, games.len());
                        records.extend(games);
                    }
                    Err(err) => {
                        log::error!("Failed to load {} ({}): {}", entry.name, segment, err);
                    }
                }

                if !self.delay.is_zero() {
                    thread::sleep(self.delay);
                }
            }
        }

        if records.is_empty() {
            return Err(Error::NothingToSave);
        }

        // undated games sort last
        records.sort_by(|a, b| b.game_date.cmp(&a.game_date));
        Ok(records)
    }
}

/// Records as the persisted table, with dates as `YYYY-MM-DD` text
pub fn records_to_frame(records: &[GameRecord]) -> Result<DataFrame> {
    let mut columns = vec![
        Series::new(
            "player",
            records.iter().map(|r| r.player.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(
            "team",
            records.iter().map(|r| r.team.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(
            "game_date",
            records
                .iter()
                .map(|r| r.game_date.map(|d| d.format("%Y-%m-%d").to_string()))
                .collect::<Vec<_>>(),
        ),
    ];

    for (stat, name) in StatType::ALL.into_iter().zip(STAT_COLUMNS) {
        let values: Vec<f64> = records.iter().map(|r| r.stat(stat)).collect();
        columns.push(Series::new(name, values));
    }

    Ok(DataFrame::new(columns)?)
}

pub fn save<P: AsRef<Path>>(records: &[GameRecord], path: P) -> Result<()> {
    if records.is_empty() {
        return Err(Error::NothingToSave);
    }
    let df = records_to_frame(records)?;
    let file = File::create(path.as_ref())?;
    crate::write_csv(&df, file)?;
    log::info!("Saved {} rows to {}", df.height(), path.as_ref().display());
    Ok(())
}
