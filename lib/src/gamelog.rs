use crate::{
    error::Error,
    filter::GameFilter,
    infer::{self, UNKNOWN_OPPONENT},
    Result, StatType, STAT_COLUMNS,
};
use chrono::NaiveDate;
use derive_deref::Deref;
use polars::prelude::*;
use std::{collections::BTreeSet, path::Path};

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// The full game log table with derived `position`, `opponent` and `home` columns.
#[derive(Clone, Deref)]
pub struct GameLogDf(DataFrame);

impl GameLogDf {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let df = crate::load_csv(path)?;
        log::info!("Loaded {} game rows", df.height());
        Self::from_raw(df)
    }

    /// Normalizes a table as persisted by the collector (or an alternate source) and
    /// adds the derived columns.
    pub fn from_raw(df: DataFrame) -> Result<Self> {
        let df = normalize(df)?;
        let df = with_position(df)?;
        let df = with_matchup(df)?;
        Ok(GameLogDf(df))
    }

    pub fn filter(self, filter: Expr) -> Result<Self> {
        let df = self.0.lazy().filter(filter).collect()?;
        log::debug!("{} game rows after filtering", df.height());
        Ok(GameLogDf(df))
    }

    /// Distinct teams, sorted
    pub fn teams(&self) -> Result<Vec<String>> {
        distinct_strings(&self.0, "team")
    }

    /// Distinct players remaining in this (possibly filtered) log, sorted
    pub fn players(&self) -> Result<Vec<String>> {
        distinct_strings(&self.0, "player")
    }

    /// Picks a player out of the filtered log, failing if the filters have already
    /// removed every row for them.
    pub fn select_player(self, player: &str) -> Result<Self> {
        let available = self.players()?;
        if !available.iter().any(|p| p == player) {
            return Err(Error::UnknownPlayer {
                player: player.to_string(),
                available,
            });
        }
        self.filter(GameFilter::new().player(player).build())
    }

    /// The `games` most recent rows with a date and a value for `stat`, oldest first.
    pub fn recent_window(self, player: &str, stat: StatType, games: usize) -> Result<WindowDf> {
        let stat_col = stat.column();
        let df = self
            .0
            .lazy()
            .filter(col("player").eq(lit(player)))
            .filter(
                col(stat_col)
                    .is_not_null()
                    .and(col(stat_col).is_not_nan())
                    .and(col("game_date").is_not_null()),
            )
            .sort(
                ["game_date"],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .limit(games as IdxSize)
            .sort(
                ["game_date"],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;
        log::debug!("{} games in window for {}", df.height(), player);

        if df.height() == 0 {
            return Err(Error::NoData {
                player: player.to_string(),
                stat,
            });
        }

        Ok(WindowDf {
            df,
            player: player.to_string(),
            stat,
        })
    }
}

/// A chronological, non-empty run of one player's games for one stat.
#[derive(Clone)]
pub struct WindowDf {
    df: DataFrame,
    player: String,
    stat: StatType,
}

impl std::ops::Deref for WindowDf {
    type Target = DataFrame;

    fn deref(&self) -> &DataFrame {
        &self.df
    }
}

impl WindowDf {
    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn stat(&self) -> StatType {
        self.stat
    }

    pub fn values(&self) -> Result<Vec<f64>> {
        let series = self.df.column(self.stat.column())?;
        Ok(series.f64()?.into_no_null_iter().collect())
    }

    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        let series = self.df.column("game_date")?;
        Ok(series.date()?.as_date_iter().flatten().collect())
    }

    pub fn opponents(&self) -> Result<Vec<String>> {
        let series = self.df.column("opponent")?.cast(&DataType::String)?;
        let opponents = series
            .str()?
            .into_iter()
            .map(|o| o.unwrap_or(UNKNOWN_OPPONENT).to_string())
            .collect();
        Ok(opponents)
    }

    pub fn home_flags(&self) -> Result<Vec<bool>> {
        let series = self.df.column("home")?;
        Ok(series.bool()?.into_iter().map(|h| h.unwrap_or(false)).collect())
    }

    /// Date, matchup and the selected stat, for display
    pub fn table(&self) -> Result<DataFrame> {
        let df = self
            .df
            .clone()
            .lazy()
            .select([cols(["game_date", "opponent", "home", self.stat.column()])])
            .collect()?;
        Ok(df)
    }

    /// Writes the window with every column, as shown
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        crate::write_csv(&self.df, writer)
    }
}

fn distinct_strings(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = df.column(column)?.cast(&DataType::String)?;
    let values: BTreeSet<String> = series
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(values.into_iter().collect())
}

fn normalize(df: DataFrame) -> Result<DataFrame> {
    let mut lf = df.clone().lazy();

    if !has_column(&df, "team") {
        lf = lf.with_column(lit(crate::collect::UNKNOWN_TEAM).alias("team"));
    }

    let date_options = StrptimeOptions {
        format: Some("%Y-%m-%d".into()),
        strict: false,
        exact: false,
        ..Default::default()
    };

    let df = lf
        .with_columns([
            col("player").cast(DataType::String),
            col("team").cast(DataType::String),
            col("game_date")
                .cast(DataType::String)
                .str()
                .to_date(date_options),
            cols(STAT_COLUMNS).cast(DataType::Float64),
        ])
        .collect()?;
    Ok(df)
}

fn with_position(mut df: DataFrame) -> Result<DataFrame> {
    let passing = df.column("passing_yards")?.f64()?;
    let rushing = df.column("rushing_yards")?.f64()?;
    let receiving = df.column("receiving_yards")?.f64()?;

    let positions: Vec<String> = passing
        .into_iter()
        .zip(rushing.into_iter())
        .zip(receiving.into_iter())
        .map(|((pass, rush), rec)| {
            infer::infer_position(
                pass.unwrap_or(f64::NAN),
                rush.unwrap_or(f64::NAN),
                rec.unwrap_or(f64::NAN),
            )
            .to_string()
        })
        .collect();

    df.with_column(Series::new("position", positions))?;
    Ok(df)
}

fn with_matchup(mut df: DataFrame) -> Result<DataFrame> {
    if has_column(&df, "opponent") {
        let opponent = df.column("opponent")?.cast(&DataType::String)?;
        df.with_column(opponent)?;
        let home = home_column(&df)?;
        df.with_column(home)?;
        return Ok(df);
    }

    let (opponents, home): (Vec<String>, Vec<bool>) = if has_column(&df, "game_string") {
        let game_strings = df.column("game_string")?.cast(&DataType::String)?;
        game_strings
            .str()?
            .into_iter()
            .map(|s| match s {
                Some(s) => {
                    let matchup = infer::parse_matchup(s);
                    (matchup.opponent_or_unknown().to_string(), matchup.home)
                }
                None => (UNKNOWN_OPPONENT.to_string(), false),
            })
            .unzip()
    } else {
        log::debug!("No opponent or game_string column, defaulting every game to home");
        let n = df.height();
        (vec![UNKNOWN_OPPONENT.to_string(); n], vec![true; n])
    };

    df.with_column(Series::new("opponent", opponents))?;
    df.with_column(Series::new("home", home))?;
    Ok(df)
}

// `home` from an alternate source may be missing, boolean or text
fn home_column(df: &DataFrame) -> Result<Series> {
    let Ok(home) = df.column("home") else {
        return Ok(Series::new("home", vec![true; df.height()]));
    };

    let series = match home.dtype() {
        DataType::Boolean => home.clone(),
        DataType::String => {
            let flags: Vec<bool> = home
                .str()?
                .into_iter()
                .map(|h| h.map(infer::parse_home_flag).unwrap_or(false))
                .collect();
            Series::new("home", flags)
        }
        _ => home.cast(&DataType::Boolean)?,
    };
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Position};

    fn raw() -> DataFrame {
        df!(
            "player" => &["Josh Allen", "Josh Allen", "Josh Allen", "Derrick Henry", "Travis Kelce"],
            "team" => &["BUF", "BUF", "BUF", "BAL", "KAN"],
            "game_date" => &["2024-09-08", "2024-09-15", "not a date", "2024-09-08", "2024-09-08"],
            "passing_yards" => &[232.0, 263.0, 180.0, 0.0, 0.0],
            "rushing_yards" => &[39.0, 10.0, 5.0, 169.0, 0.0],
            "receiving_yards" => &[0.0, 0.0, 0.0, 12.0, 34.0],
            "receptions" => &[0.0, 0.0, 0.0, 2.0, 3.0],
            "passing_tds" => &[2.0, 2.0, 1.0, 0.0, 0.0],
            "rushing_tds" => &[2.0, 0.0, 0.0, 2.0, 0.0],
            "receiving_tds" => &[0.0, 0.0, 0.0, 0.0, 0.0],
        )
        .unwrap()
    }

    fn strings(df: &DataFrame, column: &str) -> Vec<String> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|s| s.unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn derives_positions_per_row() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        assert_eq!(strings(&log, "position"), ["QB", "QB", "QB", "RB", "WR"]);
    }

    #[test]
    fn bad_dates_become_null() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        let dates = log.column("game_date").unwrap();
        assert_eq!(dates.null_count(), 1);
        assert!(dates.get(2).unwrap().is_null());
    }

    #[test]
    fn missing_matchup_defaults_to_unknown_home() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        assert!(strings(&log, "opponent").iter().all(|o| o == UNKNOWN_OPPONENT));
        let home = log.column("home").unwrap().bool().unwrap().clone();
        assert!(home.into_iter().all(|h| h == Some(true)));
    }

    #[test]
    fn matchup_from_game_string() {
        let mut df = raw();
        df.with_column(Series::new(
            "game_string",
            &["BUF vs ARI", "BUF @ MIA", "BUF vs JAX", "BAL @ KAN", "KAN vs BAL"],
        ))
        .unwrap();

        let log = GameLogDf::from_raw(df).unwrap();
        assert_eq!(strings(&log, "opponent"), ["ARI", "MIA", "JAX", "KAN", "BAL"]);

        let away = log.filter(GameFilter::new().location(Location::Away).build()).unwrap();
        assert_eq!(away.height(), 2);
    }

    #[test]
    fn existing_opponent_column_is_kept() {
        let mut df = raw();
        df.with_column(Series::new("opponent", &["ARI", "MIA", "JAX", "KAN", "BAL"]))
            .unwrap();
        df.with_column(Series::new("home", &["True", "False", "True", "False", "True"]))
            .unwrap();

        let log = GameLogDf::from_raw(df).unwrap();
        assert_eq!(strings(&log, "opponent"), ["ARI", "MIA", "JAX", "KAN", "BAL"]);
        let home: Vec<_> = log.column("home").unwrap().bool().unwrap().into_iter().collect();
        assert_eq!(home, [Some(true), Some(false), Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn available_players_follow_filters() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        assert_eq!(
            log.players().unwrap(),
            ["Derrick Henry", "Josh Allen", "Travis Kelce"]
        );

        let qbs = log
            .filter(GameFilter::new().position(Position::Qb).build())
            .unwrap();
        assert_eq!(qbs.players().unwrap(), ["Josh Allen"]);
        assert!(matches!(
            qbs.select_player("Travis Kelce"),
            Err(Error::UnknownPlayer { .. })
        ));
    }

    #[test]
    fn teams_are_sorted_and_distinct() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        assert_eq!(log.teams().unwrap(), ["BAL", "BUF", "KAN"]);
    }

    #[test]
    fn window_skips_undated_games() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        let window = log
            .recent_window("Josh Allen", StatType::PassingYards, 5)
            .unwrap();
        assert_eq!(window.values().unwrap(), [232.0, 263.0]);
    }

    #[test]
    fn window_takes_most_recent_games_in_order() {
        let dates: Vec<String> = (1..=12).map(|d| format!("2024-10-{d:02}")).collect();
        let yards: Vec<f64> = (1..=12).map(|d| d as f64 * 10.0).collect();
        let n = dates.len();
        // stored newest first, like the collector writes it
        let df = df!(
            "player" => vec!["Saquon Barkley"; n],
            "team" => vec!["PHI"; n],
            "game_date" => dates.iter().rev().cloned().collect::<Vec<_>>(),
            "passing_yards" => vec![0.0; n],
            "rushing_yards" => yards.iter().rev().copied().collect::<Vec<_>>(),
            "receiving_yards" => vec![0.0; n],
            "receptions" => vec![0.0; n],
            "passing_tds" => vec![0.0; n],
            "rushing_tds" => vec![0.0; n],
            "receiving_tds" => vec![0.0; n],
        )
        .unwrap();

        let window = GameLogDf::from_raw(df)
            .unwrap()
            .recent_window("Saquon Barkley", StatType::RushingYards, 5)
            .unwrap();

        assert_eq!(window.height(), 5);
        assert_eq!(window.values().unwrap(), [80.0, 90.0, 100.0, 110.0, 120.0]);
        let dates = window.dates().unwrap();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dates[4], NaiveDate::from_ymd_opt(2024, 10, 12).unwrap());
    }

    #[test]
    fn window_without_valid_games_is_no_data() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        let err = log
            .filter(col("game_date").is_null())
            .unwrap()
            .recent_window("Josh Allen", StatType::PassingYards, 5)
            .err()
            .unwrap();
        assert!(matches!(err, Error::NoData { .. }));
    }

    #[test]
    fn table_shows_matchup_and_stat() {
        let log = GameLogDf::from_raw(raw()).unwrap();
        let table = log
            .recent_window("Derrick Henry", StatType::RushingYards, 10)
            .unwrap()
            .table()
            .unwrap();
        let names: Vec<String> = table
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, ["game_date", "opponent", "home", "rushing_yards"]);
    }
}
