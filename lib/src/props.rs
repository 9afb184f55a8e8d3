use crate::{error::Error, gamelog::WindowDf, Result};
use itertools::izip;
use parse_display::Display;

/// A non-negative threshold, e.g. `74.5` receiving yards.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Display)]
#[display("{0}")]
pub struct PropLine(f64);

impl PropLine {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidPropLine(value));
        }
        Ok(PropLine(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Ties go under
    pub fn outcome(self, value: f64) -> Outcome {
        if value > self.0 {
            Outcome::Over
        } else {
            Outcome::Under
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum Outcome {
    Over,
    Under,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropSummary {
    pub games: usize,
    pub over_hits: usize,
    /// Percentage, 0-100
    pub hit_rate: f64,
    pub average: f64,
}

impl PropSummary {
    /// `None` for an empty window, where neither rate nor mean exists.
    pub fn from_values(values: &[f64], line: PropLine) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let games = values.len();
        let over_hits = values
            .iter()
            .filter(|&&v| line.outcome(v) == Outcome::Over)
            .count();
        let average = values.iter().sum::<f64>() / games as f64;

        Some(Self {
            games,
            over_hits,
            hit_rate: over_hits as f64 / games as f64 * 100.0,
            average,
        })
    }

    pub fn from_window(window: &WindowDf, line: PropLine) -> Result<Self> {
        let values = window.values()?;
        Self::from_values(&values, line).ok_or_else(|| Error::NoData {
            player: window.player().to_string(),
            stat: window.stat(),
        })
    }

    pub fn hits_display(&self) -> String {
        format!("{}/{}", self.over_hits, self.games)
    }

    pub fn hit_rate_display(&self) -> String {
        format!("{:.1}%", self.hit_rate)
    }

    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// One bar of the prop chart. Bars come out in the window's chronological order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub outcome: Outcome,
}

pub fn game_label(opponent: &str, home: bool, date: chrono::NaiveDate) -> String {
    let prefix = if home { "vs" } else { "@" };
    format!("{prefix} {opponent} {}", date.format("%b %d"))
}

pub fn chart_bars(window: &WindowDf, line: PropLine) -> Result<Vec<ChartBar>> {
    let bars = izip!(
        window.opponents()?,
        window.home_flags()?,
        window.dates()?,
        window.values()?
    )
    .map(|(opponent, home, date, value)| ChartBar {
        label: game_label(&opponent, home, date),
        value,
        outcome: line.outcome(value),
    })
    .collect();
    Ok(bars)
}
