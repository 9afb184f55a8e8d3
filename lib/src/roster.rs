/// A player tracked by the collector, with their pro-football-reference player code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: &'static str,
    pub code: &'static str,
}

const fn entry(name: &'static str, code: &'static str) -> RosterEntry {
    RosterEntry { name, code }
}

/// Starters across QB, RB, WR and TE
pub static ROSTER: &[RosterEntry] = &[
    // QBs
    entry("Patrick Mahomes", "MahoPa00"),
    entry("Josh Allen", "AlleJo02"),
    entry("Joe Burrow", "BurrJo00"),
    entry("Jalen Hurts", "HurtJa00"),
    entry("Justin Herbert", "HerbJu00"),
    entry("Lamar Jackson", "JackLa00"),
    entry("Tua Tagovailoa", "TagoTu00"),
    entry("Trevor Lawrence", "LawrTr01"),
    entry("C.J. Stroud", "StroCJ00"),
    // RBs
    entry("Christian McCaffrey", "McCaCh01"),
    entry("Derrick Henry", "HenrDe00"),
    entry("Saquon Barkley", "BarkSa00"),
    entry("Breece Hall", "HallBr00"),
    entry("Bijan Robinson", "RobiBi00"),
    // WRs
    entry("Justin Jefferson", "JeffJu00"),
    entry("Tyreek Hill", "HillTy00"),
    entry("Stefon Diggs", "DiggSt01"),
    entry("CeeDee Lamb", "LambCe00"),
    entry("A.J. Brown", "BrowAJ00"),
    // TEs
    entry("Travis Kelce", "KelcTr00"),
    entry("George Kittle", "KittGe00"),
    entry("Mark Andrews", "AndrMa00"),
    entry("T.J. Hockenson", "HockTJ00"),
    entry("Dallas Goedert", "GoedDa00"),
];

pub fn find(name: &str) -> Option<RosterEntry> {
    ROSTER.iter().copied().find(|entry| entry.name == name)
}

/// Roster entries for the given names, in roster order. An empty selection means everyone.
pub fn select(names: &[String]) -> std::result::Result<Vec<RosterEntry>, Vec<String>> {
    if names.is_empty() {
        return Ok(ROSTER.to_vec());
    }

    let unknown: Vec<String> = names
        .iter()
        .filter(|name| find(name).is_none())
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(unknown);
    }

    Ok(ROSTER
        .iter()
        .copied()
        .filter(|entry| names.iter().any(|n| n == entry.name))
        .collect())
}
