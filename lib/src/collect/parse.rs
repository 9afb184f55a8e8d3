//! Game log HTML tables into [`GameRecord`]s.
//!
//! The source groups columns under category headers ("Passing", "Rushing", ...), so the
//! two header rows are flattened into `Passing_Yds` style names before any lookup.

use super::{GameRecord, UNKNOWN_TEAM};
use crate::{error::Error, Result, StatType};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

/// Flattened source column for each stat
pub const SOURCE_COLUMNS: [(StatType, &str); 7] = [
    (StatType::PassingYards, "Passing_Yds"),
    (StatType::RushingYards, "Rushing_Yds"),
    (StatType::ReceivingYards, "Receiving_Yds"),
    (StatType::Receptions, "Receiving_Rec"),
    (StatType::PassingTds, "Passing_TD"),
    (StatType::RushingTds, "Rushing_TD"),
    (StatType::ReceivingTds, "Receiving_TD"),
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| Error::Selector(format!("{s}: {e}")))
}

/// The first table of a page, with flattened headers and colspans expanded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameLogTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl GameLogTable {
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let table = document
            .select(&selector("table")?)
            .next()
            .ok_or(Error::MissingTable)?;

        let header_rows: Vec<Vec<String>> = table
            .select(&selector("thead tr")?)
            .map(expand_cells)
            .collect();
        let columns = match header_rows.as_slice() {
            [] => return Err(Error::MissingTable),
            [bottom] => flatten_headers(&[], bottom),
            [.., top, bottom] => flatten_headers(top, bottom),
        };

        let rows = table
            .select(&selector("tbody tr")?)
            .filter(|row| !row.value().classes().any(|c| c == "thead"))
            .map(expand_cells)
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn position(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.columns.iter().position(|c| pred(c))
    }
}

/// Joins group and column headers as `Group_Column`, or just `Column` under a blank group.
pub fn flatten_headers(top: &[String], bottom: &[String]) -> Vec<String> {
    bottom
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let group = top.get(i).map(|g| g.trim()).unwrap_or_default();
            let name = name.trim();
            if group.is_empty() {
                name.to_string()
            } else {
                format!("{group}_{name}")
            }
        })
        .collect()
}

// Cell texts of a row, repeating a cell once per spanned column
fn expand_cells(row: ElementRef) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .flat_map(|cell| {
            let span = cell
                .value()
                .attr("colspan")
                .and_then(|c| c.parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);
            let text = cell.text().collect::<String>().trim().to_string();
            std::iter::repeat(text).take(span)
        })
        .collect()
}

fn leaf(column: &str) -> &str {
    column.rsplit('_').next().unwrap_or(column)
}

/// Numeric coercion where anything unparsable counts as zero
pub fn coerce_stat(cell: &str) -> f64 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

fn is_week(cell: &str) -> bool {
    cell.trim().parse::<u32>().is_ok()
}

/// Normalizes one player's game log page. Rows without a week number (bye weeks,
/// totals, repeated headers) are not games and are dropped.
pub fn parse_game_log(html: &str, player: &str) -> Result<Vec<GameRecord>> {
    let table = GameLogTable::parse(html)?;

    let week_col = table
        .position(|c| matches!(leaf(c), "Week" | "Wk"))
        .ok_or(Error::MissingColumn("Week"))?;
    let date_col = table
        .position(|c| c.contains("Date"))
        .ok_or(Error::MissingColumn("Date"))?;
    let team_col = table.position(|c| leaf(c) == "Team");
    let stat_cols: Vec<(StatType, Option<usize>)> = SOURCE_COLUMNS
        .iter()
        .map(|&(stat, name)| (stat, table.position(|c| c == name)))
        .collect();

    let records = table
        .rows
        .iter()
        .filter(|row| is_week(cell(row, week_col)))
        .map(|row| {
            let team = team_col
                .map(|i| cell(row, i))
                .filter(|t| !t.is_empty())
                .unwrap_or(UNKNOWN_TEAM);

            let mut stats = [0.0; 7];
            for &(stat, col) in &stat_cols {
                stats[stat.index()] = col.map(|i| coerce_stat(cell(row, i))).unwrap_or(0.0);
            }

            GameRecord {
                player: player.to_string(),
                team: team.to_string(),
                game_date: parse_date(cell(row, date_col)),
                stats,
            }
        })
        .collect();

    Ok(records)
}
