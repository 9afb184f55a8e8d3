use parse_display::{Display, FromStr};
use polars::prelude::*;
use std::path::Path;

pub mod collect;
pub mod config;
mod error;
pub mod filter;
pub mod gamelog;
pub mod infer;
pub mod props;
pub mod roster;

pub use error::Error;
pub use gamelog::{GameLogDf, WindowDf};
pub use props::{PropLine, PropSummary};

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, FromStr)]
#[display(style = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
}

/// Home/away split of a game, relative to the player's team.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, FromStr)]
pub enum Location {
    Home,
    Away,
}

impl Location {
    pub fn is_home(self) -> bool {
        self == Location::Home
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, FromStr)]
pub enum StatType {
    #[display("Passing Yards")]
    PassingYards,
    #[display("Rushing Yards")]
    RushingYards,
    #[display("Receiving Yards")]
    ReceivingYards,
    #[display("Receptions")]
    Receptions,
    #[display("Passing TDs")]
    PassingTds,
    #[display("Rushing TDs")]
    RushingTds,
    #[display("Receiving TDs")]
    ReceivingTds,
}

impl StatType {
    pub const ALL: [StatType; 7] = [
        StatType::PassingYards,
        StatType::RushingYards,
        StatType::ReceivingYards,
        StatType::Receptions,
        StatType::PassingTds,
        StatType::RushingTds,
        StatType::ReceivingTds,
    ];

    /// Position within [`StatType::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column holding this stat in the persisted table
    pub fn column(self) -> &'static str {
        match self {
            StatType::PassingYards => "passing_yards",
            StatType::RushingYards => "rushing_yards",
            StatType::ReceivingYards => "receiving_yards",
            StatType::Receptions => "receptions",
            StatType::PassingTds => "passing_tds",
            StatType::RushingTds => "rushing_tds",
            StatType::ReceivingTds => "receiving_tds",
        }
    }

    /// Accepts either the column name (`receiving_yards`) or the display label (`Receiving Yards`)
    pub fn lookup(name: &str) -> Option<StatType> {
        StatType::ALL
            .into_iter()
            .find(|stat| stat.column() == name)
            .or_else(|| name.parse().ok())
    }
}

pub const STAT_COLUMNS: [&str; 7] = [
    "passing_yards",
    "rushing_yards",
    "receiving_yards",
    "receptions",
    "passing_tds",
    "rushing_tds",
    "receiving_tds",
];

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    Ok(df)
}

pub fn write_csv<W: std::io::Write>(df: &DataFrame, writer: W) -> Result<()> {
    let mut df = df.clone();
    CsvWriter::new(writer).include_header(true).finish(&mut df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_columns_line_up_with_stat_types() {
        let columns: Vec<_> = StatType::ALL.iter().map(|s| s.column()).collect();
        assert_eq!(columns, STAT_COLUMNS);
    }

    #[test]
    fn stat_lookup_accepts_column_or_label() {
        assert_eq!(StatType::lookup("receptions"), Some(StatType::Receptions));
        assert_eq!(StatType::lookup("Passing TDs"), Some(StatType::PassingTds));
        assert_eq!(StatType::lookup("tackles"), None);
    }

    #[test]
    fn position_round_trips_as_uppercase() {
        assert_eq!(Position::Qb.to_string(), "QB");
        assert_eq!("TE".parse::<Position>().unwrap(), Position::Te);
        assert!("te".parse::<Position>().is_err());
    }
}
