mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use display::output::{
    display_error, display_heading, display_hero_usage, display_heroes, display_match, display_match_lines,
    display_players, display_unavailable_match, MatchLine, RosterLine, TeamRoster,
};
use honstats::analysis::{AverageAccumulator, HeroSortKey, Match, SortOrder, Team};
use honstats::api::models::{MatchId, StatsType};
use honstats::config::Config;
use honstats::{DataProvider, HeroFilter};
use indicatif::ProgressBar;

#[derive(Parser, Debug)]
#[command(name = "honstats")]
#[command(about = "Fetches and displays Heroes of Newerth statistics", long_about = None)]
struct Args {
    /// Limit error output to one line
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Statistics host (default: api.heroesofnewerth.com)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Statistics API token (default: HONSTATS_TOKEN)
    #[arg(short, long, global = true)]
    token: Option<String>,

    /// Limit output to the given number of rows
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    /// Stats type to show
    #[arg(short, long, global = true, value_enum, default_value_t = StatsType::Ranked)]
    statstype: StatsType,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show player stats
    Player {
        /// Player nicknames or account ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show the match history of players
    Matches {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show stats for matches
    Match {
        #[arg(required = true)]
        match_ids: Vec<MatchId>,
    },
    /// Show stats for heroes played
    PlayerHeroes {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Sort by the given stat
        #[arg(short = 'b', long, value_enum, default_value_t = HeroSortKey::Use)]
        sort_by: HeroSortKey,

        #[arg(short, long, value_enum, default_value_t = SortOrder::Desc)]
        order: SortOrder,
    },
    /// Show full scoreboards of the last matches of players
    Lastmatches {
        #[arg(required = true)]
        ids: Vec<String>,

        /// How many matches
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Only matches played with this hero (name or id)
        #[arg(long)]
        hero: Option<String>,
    },
    /// List all heroes
    Heroes,
}

fn main() {
    let args = Args::parse();
    let quiet = args.quiet;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if quiet { "error" } else { "warn" }),
    )
    .init();

    if let Err(e) = run(args) {
        if quiet {
            eprintln!("{}", e);
        } else {
            display_error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env(args.token, args.host)?;
    let provider = DataProvider::from_config(&config)
        .with_context(|| format!("opening cache at {}", config.cache_dir.display()))?;

    match args.command {
        Command::Player { ids } => player_command(&provider, &ids, args.statstype),
        Command::Matches { ids } => matches_command(&provider, &ids, args.statstype, args.limit),
        Command::Match { match_ids } => match_command(&provider, &match_ids),
        Command::PlayerHeroes { ids, sort_by, order } => {
            player_heroes_command(&provider, &ids, args.statstype, sort_by, order, args.limit)
        }
        Command::Lastmatches { ids, count, hero } => {
            last_matches_command(&provider, &ids, args.statstype, args.limit, count, hero)
        }
        Command::Heroes => heroes_command(&provider, args.limit),
    }
}

fn player_command(provider: &DataProvider, ids: &[String], stats_type: StatsType) -> anyhow::Result<()> {
    let mut players = Vec::new();
    for id in ids {
        let player = provider
            .fetch_player(id, stats_type)
            .with_context(|| format!("fetching player {}", id))?;
        let nick = provider.id2nick(player.account_id()?);
        players.push((nick, player.summary(stats_type)?));
    }
    display_players(players);
    Ok(())
}

fn matches_command(
    provider: &DataProvider,
    ids: &[String],
    stats_type: StatsType,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    for id in ids {
        let account_id = provider.nick2id(id)?;
        let match_ids = provider.matches(id, stats_type)?;
        let shown = limit.map_or(match_ids.len(), |limit| limit.min(match_ids.len()));

        let mut lines = Vec::with_capacity(shown);
        let mut average = AverageAccumulator::new();
        for &match_id in &match_ids[..shown] {
            let game = provider.fetch_match(match_id)?.for_account(account_id);
            if game.is_empty() {
                lines.push(MatchLine::Unavailable(match_id));
                continue;
            }
            let stats = game.derived_stats(account_id)?;
            average.add(&stats);
            let hero = provider.heroid2name(stats.hero_id)?;
            lines.push(MatchLine::Played { stats, hero });
        }

        let average = if average.is_empty() {
            None
        } else {
            Some(average.finish()?)
        };
        display_match_lines(&provider.id2nick(account_id), lines, average);
    }
    Ok(())
}

fn match_command(provider: &DataProvider, match_ids: &[MatchId]) -> anyhow::Result<()> {
    let matches = provider.fetch_match_data(match_ids, None, None)?;
    for match_id in match_ids {
        match matches.get(match_id) {
            Some(game) if !game.is_empty() => show_match(provider, game)?,
            _ => display_unavailable_match(*match_id),
        }
    }
    Ok(())
}

fn show_match(provider: &DataProvider, game: &Match) -> anyhow::Result<()> {
    let mut teams = Vec::new();
    for team in [Team::Legion, Team::Hellbourne] {
        let mut players = Vec::new();
        for (account_id, _) in game.players(Some(team)) {
            let stats = game.derived_stats(account_id)?;
            players.push(RosterLine {
                nick: provider.id2nick(account_id),
                hero: provider.heroid2name(stats.hero_id)?,
                stats,
            });
        }
        teams.push(TeamRoster {
            name: team.name(),
            won: game.team_won(team),
            players,
        });
    }

    display_match(
        game.match_id(),
        game.played_at().map(|date| date.format("%Y-%m-%d %H:%M").to_string()),
        game.duration_secs(),
        teams,
    );
    Ok(())
}

fn player_heroes_command(
    provider: &DataProvider,
    ids: &[String],
    stats_type: StatsType,
    sort_by: HeroSortKey,
    order: SortOrder,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    for id in ids {
        let progress = ProgressBar::new(0);
        progress.set_message("Fetching match details");
        let usage = provider.hero_usage_with_progress(id, stats_type, sort_by, order, |done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
        })?;
        progress.finish_and_clear();

        let shown = limit.unwrap_or(usage.len());
        let mut heroes = Vec::new();
        for summary in usage.into_iter().take(shown) {
            heroes.push((provider.heroid2name(summary.hero_id)?, summary));
        }
        display_hero_usage(&provider.id2nick(provider.nick2id(id)?), heroes);
    }
    Ok(())
}

fn last_matches_command(
    provider: &DataProvider,
    ids: &[String],
    stats_type: StatsType,
    limit: Option<usize>,
    count: usize,
    hero: Option<String>,
) -> anyhow::Result<()> {
    let wanted = limit.map_or(count, |limit| limit.min(count));

    for id in ids {
        let account_id = provider.nick2id(id)?;
        let match_ids = provider.matches(id, stats_type)?;
        let filter = hero.as_ref().map(|hero| HeroFilter {
            account_id,
            hero: hero.clone(),
        });

        let matches = provider.fetch_match_data(&match_ids, Some(wanted), filter.as_ref())?;
        display_heading(&provider.id2nick(account_id));
        for (match_id, game) in matches.iter().rev() {
            if game.is_empty() {
                display_unavailable_match(*match_id);
            } else {
                show_match(provider, game)?;
            }
        }
    }
    Ok(())
}

fn heroes_command(provider: &DataProvider, limit: Option<usize>) -> anyhow::Result<()> {
    let heroes = provider.heroes()?;
    let shown = limit.unwrap_or(heroes.len());
    display_heroes(heroes.values().take(shown).collect());
    Ok(())
}
