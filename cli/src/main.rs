use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use log::LevelFilter;
use proptrack::{
    collect::{self, Collector, HttpSource},
    config::{self, CollectConfig},
    filter::GameFilter,
    props::chart_bars,
    roster, GameLogDf, Location, Position, PropLine, PropSummary, StatType,
};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::{fs::File, path::PathBuf, str::FromStr, time::Duration};

mod chart;

const WINDOW_SIZES: [usize; 4] = [5, 10, 15, 20];

#[derive(Parser, Debug)]
#[command(author, version, about = "NFL player prop tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape game logs for the roster into a CSV table
    Collect(CollectArgs),
    /// List the teams in the table
    Teams {
        #[arg(short = 'f', long = "file", value_name = "FILE", default_value = config::DEFAULT_OUTPUT)]
        file: PathBuf,
    },
    /// List the players left after team/position/location filters
    Players(FilterArgs),
    /// Hit rate of a player's recent games against a prop line
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct CollectArgs {
    #[arg(short, long, value_name = "FILE", default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, env = "PROPTRACK_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "PROPTRACK_SEASON", default_value_t = config::DEFAULT_SEASON)]
    season: u16,

    /// Seconds to wait after each request
    #[arg(long, env = "PROPTRACK_DELAY_SECS", default_value_t = config::DEFAULT_DELAY_SECS)]
    delay_secs: u64,

    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Only collect these roster players (repeatable)
    #[arg(short, long = "player", value_name = "NAME")]
    players: Vec<String>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(short = 'f', long = "file", value_name = "FILE", default_value = config::DEFAULT_OUTPUT)]
    file: PathBuf,

    #[arg(short = 't', long = "team", default_value = "All")]
    team: String,

    /// QB, RB, WR, TE or All
    #[arg(long, default_value = "All")]
    position: String,

    /// Home, Away or All
    #[arg(long, default_value = "All")]
    location: String,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    filters: FilterArgs,

    #[arg(short = 'p', long = "player")]
    player: String,

    /// Column name (receiving_yards) or label ("Receiving Yards")
    #[arg(short = 's', long = "stat", default_value = "passing_yards")]
    stat: String,

    /// Last N games: 5, 10, 15 or 20
    #[arg(short = 'n', long = "last", default_value_t = 5)]
    last: usize,

    #[arg(short = 'l', long = "line", default_value_t = 0.0)]
    line: f64,

    /// Also write the shown games to this CSV
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

// "All" means no filter
fn all_or<T: FromStr>(value: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    if value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match value.parse() {
        Ok(v) => Ok(Some(v)),
        Err(e) => bail!("Invalid filter value {value:?}: {e}"),
    }
}

// "home" and "HOME" parse like "Home"
fn capitalized(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lower,
    }
}

fn filtered_log(args: &FilterArgs) -> Result<GameLogDf> {
    let position: Option<Position> = all_or(&args.position.to_uppercase())?;
    let location: Option<Location> = all_or(&capitalized(&args.location))?;
    let team: Option<String> = all_or(&args.team)?;

    let log = GameLogDf::load(&args.file)?;
    let filter = GameFilter::new()
        .maybe_team(team.as_deref())
        .maybe_position(position)
        .maybe_location(location)
        .build();
    Ok(log.filter(filter)?)
}

fn collect(args: CollectArgs) -> Result<()> {
    let config = CollectConfig {
        base_url: args.base_url,
        season: args.season,
        delay: Duration::from_secs(args.delay_secs),
        timeout: Duration::from_secs(args.timeout_secs),
        output: args.output,
        ..Default::default()
    };
    log::trace!("Config {:#?}", config);

    let entries = match roster::select(&args.players) {
        Ok(entries) => entries,
        Err(unknown) => bail!("Not on the roster: {}", unknown.join(", ")),
    };

    let collector = Collector::new(HttpSource::new(&config)?, config.delay);
    match collector.run(&entries) {
        Ok(records) => {
            collect::save(&records, &config.output)?;
            println!(
                "Saved {} games to {}",
                records.len(),
                config.output.display()
            );
        }
        Err(proptrack::Error::NothingToSave) => {
            println!("No data to save. Check for scraping errors or rate limiting.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let Some(stat) = StatType::lookup(&args.stat) else {
        bail!(
            "Unsupported stat {:?}. Use one of: {}",
            args.stat,
            StatType::ALL.iter().map(|s| s.column()).join(", ")
        );
    };
    if !WINDOW_SIZES.contains(&args.last) {
        bail!("Unsupported window {}. Use: 5, 10, 15, or 20", args.last);
    }
    let line = PropLine::new(args.line)?;

    let log = filtered_log(&args.filters)?.select_player(&args.player)?;
    let window = match log.recent_window(&args.player, stat, args.last) {
        Ok(window) => window,
        Err(proptrack::Error::NoData { .. }) => {
            println!("No valid games with data found for that player.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Last {} Games – {}", window.height(), args.player);
    println!("{}", window.table()?);

    let summary = PropSummary::from_window(&window, line)?;
    println!();
    println!("Hits Over: {}", summary.hits_display());
    println!("Hit Rate:  {}", summary.hit_rate_display());
    println!("Avg {}: {}", stat, summary.average_display());

    let bars = chart_bars(&window, line)?;
    println!();
    // needs a terminal, piped output still gets the legend
    if let Err(e) = chart::print(
        &format!("{} – {} vs. Prop Line", args.player, stat),
        &bars,
        line,
    ) {
        log::warn!("Chart not drawn: {e}");
    }
    print!("{}", chart::legend(&bars));

    if let Some(path) = args.export {
        window.write_csv(File::create(&path)?)?;
        println!("Wrote {} games to {}", window.height(), path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set the default level based on verbosity
    let default_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = ConfigBuilder::new().add_filter_allow_str("proptrack").build();

    TermLogger::init(
        default_level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    log::trace!("Args {:#?}", cli);

    match cli.command {
        Command::Collect(args) => collect(args),
        Command::Teams { file } => {
            let log = GameLogDf::load(file)?;
            println!("All");
            for team in log.teams()? {
                println!("{team}");
            }
            Ok(())
        }
        Command::Players(args) => {
            for player in filtered_log(&args)?.players()? {
                println!("{player}");
            }
            Ok(())
        }
        Command::Analyze(args) => analyze(args),
    }
}
