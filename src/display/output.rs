use colored::*;
use honstats::analysis::{AverageStats, DerivedMatchStats, HeroUsageSummary};
use honstats::api::models::{HeroInfo, MatchId, PlayerSummary};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Nick")]
    nick: String,
    #[tabled(rename = "MMR")]
    rating: i64,
    #[tabled(rename = "K")]
    kills: i64,
    #[tabled(rename = "D")]
    deaths: i64,
    #[tabled(rename = "A")]
    assists: i64,
    #[tabled(rename = "W/G")]
    wards_per_game: String,
    #[tabled(rename = "CD")]
    denies_per_game: String,
    #[tabled(rename = "KDR")]
    kdr: String,
    #[tabled(rename = "GP")]
    games: i64,
    #[tabled(rename = "W%")]
    win_percentage: String,
}

#[derive(Tabled)]
struct MatchLineRow {
    #[tabled(rename = "MID")]
    match_id: String,
    #[tabled(rename = "GT")]
    game_type: String,
    #[tabled(rename = "GD")]
    duration: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "K")]
    kills: String,
    #[tabled(rename = "D")]
    deaths: String,
    #[tabled(rename = "A")]
    assists: String,
    #[tabled(rename = "KDR")]
    kdr: String,
    #[tabled(rename = "Hero")]
    hero: String,
    #[tabled(rename = "W/L")]
    result: String,
    #[tabled(rename = "Wa")]
    wards: String,
    #[tabled(rename = "CK")]
    creep_kills: String,
    #[tabled(rename = "CD")]
    denies: String,
    #[tabled(rename = "GPM")]
    gpm: String,
}

#[derive(Tabled)]
struct RosterRow {
    #[tabled(rename = "Player")]
    nick: String,
    #[tabled(rename = "Hero")]
    hero: String,
    #[tabled(rename = "LV")]
    level: i64,
    #[tabled(rename = "K")]
    kills: i64,
    #[tabled(rename = "D")]
    deaths: i64,
    #[tabled(rename = "A")]
    assists: i64,
    #[tabled(rename = "CK")]
    creep_kills: i64,
    #[tabled(rename = "CD")]
    denies: i64,
    #[tabled(rename = "W")]
    wards: i64,
    #[tabled(rename = "GPM")]
    gpm: i64,
    #[tabled(rename = "GL2D")]
    gold_lost_to_death: i64,
}

#[derive(Tabled)]
struct HeroUsageRow {
    #[tabled(rename = "Hero")]
    hero: String,
    #[tabled(rename = "Use")]
    uses: i64,
    #[tabled(rename = "%")]
    perc: i64,
    #[tabled(rename = "K")]
    kills: i64,
    #[tabled(rename = "D")]
    deaths: i64,
    #[tabled(rename = "A")]
    assists: i64,
    #[tabled(rename = "KDR")]
    kdr: String,
    #[tabled(rename = "W")]
    wins: i64,
    #[tabled(rename = "L")]
    losses: i64,
    #[tabled(rename = "KPG")]
    kpg: String,
    #[tabled(rename = "DPG")]
    dpg: String,
    #[tabled(rename = "APG")]
    apg: String,
    #[tabled(rename = "GPM")]
    gpm: i64,
    #[tabled(rename = "WPG")]
    wpg: String,
}

#[derive(Tabled)]
struct HeroRow {
    #[tabled(rename = "ID")]
    hero_id: u32,
    #[tabled(rename = "Name")]
    name: String,
}

/// One line of a player's match list.
pub enum MatchLine {
    Played { stats: DerivedMatchStats, hero: String },
    Unavailable(MatchId),
}

/// One player of a match roster, with names already resolved.
pub struct RosterLine {
    pub nick: String,
    pub hero: String,
    pub stats: DerivedMatchStats,
}

pub struct TeamRoster {
    pub name: &'static str,
    pub won: Option<bool>,
    pub players: Vec<RosterLine>,
}

pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn short(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_heading(title: &str) {
    println!("\n{}", title.bold().cyan());
}

pub fn display_players(players: Vec<(String, PlayerSummary)>) {
    let rows = players
        .into_iter()
        .map(|(nick, p)| PlayerRow {
            nick,
            rating: p.rating,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            wards_per_game: format!("{:.1}", p.wards_per_game),
            denies_per_game: format!("{:.1}", p.denies_per_game),
            kdr: format!("{:.2}", p.kdr),
            games: p.games_played,
            win_percentage: format!("{:.0}", p.win_percentage),
        })
        .collect::<Vec<_>>();
    print_table(rows);
}

pub fn display_match_lines(nick: &str, lines: Vec<MatchLine>, average: Option<AverageStats>) {
    display_heading(nick);

    let mut rows: Vec<MatchLineRow> = lines
        .into_iter()
        .map(|line| match line {
            MatchLine::Played { stats, hero } => MatchLineRow {
                match_id: stats.match_id.to_string(),
                game_type: stats.game_type.code().to_string(),
                duration: format_duration(stats.duration_secs),
                date: stats
                    .played_at
                    .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                kills: stats.kills.to_string(),
                deaths: stats.deaths.to_string(),
                assists: stats.assists.to_string(),
                kdr: String::new(),
                hero: short(&hero, 5),
                result: if stats.won {
                    "W".green().to_string()
                } else {
                    "L".red().to_string()
                },
                wards: stats.wards.to_string(),
                creep_kills: stats.creep_kills.to_string(),
                denies: stats.denies.to_string(),
                gpm: stats.gpm.to_string(),
            },
            MatchLine::Unavailable(match_id) => MatchLineRow {
                match_id: match_id.to_string(),
                game_type: "--".to_string(),
                duration: String::new(),
                date: "Unable to fetch".yellow().to_string(),
                kills: String::new(),
                deaths: String::new(),
                assists: String::new(),
                kdr: String::new(),
                hero: String::new(),
                result: "-".to_string(),
                wards: String::new(),
                creep_kills: String::new(),
                denies: String::new(),
                gpm: String::new(),
            },
        })
        .collect();

    if let Some(avg) = average {
        rows.push(MatchLineRow {
            match_id: "average".bold().to_string(),
            game_type: "--".to_string(),
            duration: format_duration(avg.duration_secs),
            date: format!("{} matches", avg.matches),
            kills: avg.kills.to_string(),
            deaths: avg.deaths.to_string(),
            assists: avg.assists.to_string(),
            kdr: format!("{:.2}", avg.kdr),
            hero: String::new(),
            result: "-".to_string(),
            wards: avg.wards.to_string(),
            creep_kills: avg.creep_kills.to_string(),
            denies: avg.denies.to_string(),
            gpm: avg.gpm.to_string(),
        });
    }

    print_table(rows);
}

pub fn display_match(match_id: MatchId, date: Option<String>, duration_secs: u64, teams: Vec<TeamRoster>) {
    display_heading(&format!(
        "Match {} -- {} - GD: {}",
        match_id,
        date.unwrap_or_default(),
        format_duration(duration_secs)
    ));

    for team in teams {
        let outcome = match team.won {
            Some(true) => "(W)".green().to_string(),
            Some(false) => "(L)".red().to_string(),
            None => String::new(),
        };
        println!("{}{}", team.name.bold(), outcome);

        let rows = team
            .players
            .into_iter()
            .map(|line| RosterRow {
                nick: short(&line.nick, 14),
                hero: short(&line.hero, 5),
                level: line.stats.level,
                kills: line.stats.kills,
                deaths: line.stats.deaths,
                assists: line.stats.assists,
                creep_kills: line.stats.creep_kills,
                denies: line.stats.denies,
                wards: line.stats.wards,
                gpm: line.stats.gpm,
                gold_lost_to_death: line.stats.gold_lost_to_death,
            })
            .collect::<Vec<_>>();
        print_table(rows);
    }
}

pub fn display_unavailable_match(match_id: MatchId) {
    println!("{} {}", format!("Match {}:", match_id).bold(), "Unable to fetch".yellow());
}

pub fn display_hero_usage(nick: &str, heroes: Vec<(String, HeroUsageSummary)>) {
    display_heading(nick);

    if heroes.is_empty() {
        println!("{}", "No matches found for this player".yellow());
        return;
    }

    let rows = heroes
        .into_iter()
        .map(|(hero, s)| HeroUsageRow {
            hero: short(&hero, 10),
            uses: s.uses,
            perc: s.perc,
            kills: s.kills,
            deaths: s.deaths,
            assists: s.assists,
            kdr: format!("{:.2}", s.kdr),
            wins: s.wins,
            losses: s.losses,
            kpg: format!("{:.2}", s.kpg),
            dpg: format!("{:.2}", s.dpg),
            apg: format!("{:.2}", s.apg),
            gpm: s.gpm,
            wpg: format!("{:.1}", s.wpg),
        })
        .collect::<Vec<_>>();
    print_table(rows);
}

pub fn display_heroes(heroes: Vec<&HeroInfo>) {
    let rows = heroes
        .into_iter()
        .map(|hero| HeroRow {
            hero_id: hero.hero_id,
            name: hero.name.clone(),
        })
        .collect::<Vec<_>>();
    print_table(rows);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}
