mod utils;
use honstats::analysis::{average, GameType, HeroSortKey, Match, SortOrder, Team};
use honstats::api::models::StatsType;
use honstats::{AppError, HeroFilter};
use rstest::rstest;
use serde_json::json;
use utils::{player_row, serve_history, MatchFixture, TestSetup};

const PLAYER: u64 = 42;

/// Ten matches for `PLAYER`: three on hero 14 (ids 1..=3), the rest on hero 20.
fn serve_ten_matches(setup: &TestSetup) {
    for match_id in 1..=10u64 {
        let hero_id = if match_id <= 3 { 14 } else { 20 };
        MatchFixture::new(match_id)
            .with_player(player_row(PLAYER, 1, hero_id, match_id as i64, 1, match_id % 2 == 0))
            .with_player(player_row(7, 2, 9, 0, 4, match_id % 2 == 1))
            .serve(setup.api());
    }
    serve_history(setup.api(), PLAYER, StatsType::Ranked, &(1..=10).collect::<Vec<_>>());
}

#[test]
fn hero_usage_percentages_cover_all_examined_matches() {
    let setup = TestSetup::new();
    serve_ten_matches(&setup);

    let usage = setup
        .provider
        .hero_usage("42", StatsType::Ranked, HeroSortKey::Use, SortOrder::Desc)
        .unwrap();

    assert_eq!(usage.len(), 2);
    assert_eq!(usage[0].hero_id, 20);
    assert_eq!(usage[0].uses, 7);
    assert_eq!(usage[0].perc, 70);
    assert_eq!(usage[1].hero_id, 14);
    assert_eq!(usage[1].uses, 3);
    assert_eq!(usage[1].perc, 30);
    assert_eq!(usage[1].kills, 1 + 2 + 3);
    assert_eq!(usage[1].wins, 1);
    assert_eq!(usage[1].losses, 2);
}

#[test]
fn hero_usage_reports_progress_for_every_match() {
    let setup = TestSetup::new();
    serve_ten_matches(&setup);
    let mut seen = Vec::new();

    setup
        .provider
        .hero_usage_with_progress("42", StatsType::Ranked, HeroSortKey::K, SortOrder::Asc, |done, total| {
            seen.push((done, total))
        })
        .unwrap();

    assert_eq!(seen.len(), 10);
    assert_eq!(seen.last(), Some(&(10, 10)));
}

#[test]
fn hero_usage_skips_matches_without_the_player() {
    let setup = TestSetup::new();
    MatchFixture::new(1)
        .with_player(player_row(PLAYER, 1, 14, 3, 1, true))
        .serve(setup.api());
    MatchFixture::new(2)
        .with_player(player_row(7, 1, 14, 3, 1, true))
        .serve(setup.api());
    // match 3 is unknown to the service
    serve_history(setup.api(), PLAYER, StatsType::Ranked, &[1, 2, 3]);

    let usage = setup
        .provider
        .hero_usage("42", StatsType::Ranked, HeroSortKey::Use, SortOrder::Desc)
        .unwrap();

    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].uses, 1);
    assert_eq!(usage[0].perc, 100);
}

#[rstest]
#[case(HeroSortKey::K, SortOrder::Desc, vec![20, 14])]
#[case(HeroSortKey::K, SortOrder::Asc, vec![14, 20])]
#[case(HeroSortKey::Kdr, SortOrder::Desc, vec![20, 14])]
fn hero_usage_honours_sort_key(#[case] key: HeroSortKey, #[case] order: SortOrder, #[case] expected: Vec<u32>) {
    let setup = TestSetup::new();
    serve_ten_matches(&setup);

    let usage = setup.provider.hero_usage("42", StatsType::Ranked, key, order).unwrap();

    assert_eq!(usage.iter().map(|s| s.hero_id).collect::<Vec<_>>(), expected);
}

#[test]
fn missing_player_yields_empty_match_and_batch_continues() {
    let setup = TestSetup::new();
    MatchFixture::new(1)
        .with_player(player_row(PLAYER, 1, 14, 3, 1, true))
        .serve(setup.api());
    MatchFixture::new(2)
        .with_player(player_row(7, 1, 14, 3, 1, true))
        .serve(setup.api());

    let matches = setup.provider.fetch_match_data(&[1, 2, 3], None, None).unwrap();

    assert_eq!(matches.len(), 3);
    assert!(!matches[&1].clone().for_account(PLAYER).is_empty());
    assert!(matches[&2].clone().for_account(PLAYER).is_empty());
    assert_eq!(matches[&3], Match::Empty);
    assert!(matches!(
        matches[&2].derived_stats(PLAYER),
        Err(AppError::PlayerNotInMatch { .. })
    ));
    assert_eq!(Match::Empty.player_stat(PLAYER, "herokills").unwrap(), 0);
}

#[test]
fn batch_fetch_stops_at_limit() {
    let setup = TestSetup::new();
    serve_ten_matches(&setup);

    let matches = setup.provider.fetch_match_data(&[10, 9, 8, 7], Some(2), None).unwrap();

    assert_eq!(matches.keys().copied().collect::<Vec<_>>(), vec![9, 10]);
    assert!(!setup.provider.cache().matches.contains(8));
}

#[rstest]
#[case("14")]
#[case("pebbles")]
#[case("PEBBLES")]
fn batch_fetch_filters_by_hero(#[case] hero: &str) {
    let setup = TestSetup::new();
    serve_ten_matches(&setup);
    setup.api().respond("heroes/id/14", json!({ "hero_id": "14", "disp_name": "Pebbles" }));
    setup.api().respond("heroes/id/20", json!({ "hero_id": "20", "disp_name": "Scout" }));
    let filter = HeroFilter {
        account_id: PLAYER,
        hero: hero.to_string(),
    };
    let ids = (1..=10).rev().collect::<Vec<_>>();

    let matches = setup.provider.fetch_match_data(&ids, Some(2), Some(&filter)).unwrap();

    assert_eq!(matches.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn average_over_a_player_window() {
    let setup = TestSetup::new();
    for (match_id, kills, deaths) in [(1u64, 2, 1), (2, 4, 2), (3, 6, 3)] {
        MatchFixture::new(match_id)
            .with_player(player_row(PLAYER, 1, 14, kills, deaths, true))
            .serve(setup.api());
    }

    let window = [1, 2, 3]
        .iter()
        .map(|&id| setup.provider.fetch_match(id).unwrap().derived_stats(PLAYER).unwrap())
        .collect::<Vec<_>>();
    let avg = average(&window).unwrap();

    assert_eq!(avg.kills, 4);
    assert_eq!(avg.deaths, 2);
    assert_eq!(avg.kdr, 2.0);
    assert_eq!(avg.gpm, 400);
}

#[test]
fn average_of_nothing_is_undefined() {
    assert!(matches!(average(&[]), Err(AppError::DivisionUndefined)));
}

#[test]
fn history_is_most_recent_first() {
    let setup = TestSetup::new();
    serve_history(setup.api(), PLAYER, StatsType::Ranked, &[100, 300, 200]);

    assert_eq!(
        setup.provider.matches("42", StatsType::Ranked).unwrap(),
        vec![300, 200, 100]
    );
}

#[test]
fn scoreboard_splits_teams_and_marks_the_winner() {
    let setup = TestSetup::new();
    MatchFixture::new(55)
        .all_pick()
        .with_duration(0)
        .with_player(player_row(PLAYER, 1, 14, 3, 1, true))
        .with_player(player_row(7, 2, 9, 1, 3, false))
        .with_player(player_row(8, 2, 20, 0, 2, false))
        .serve(setup.api());

    let game = setup.provider.fetch_match(55).unwrap();
    let (legion, hellbourne) = game.teams();

    assert_eq!(game.game_type(), Some(GameType::AllPick));
    assert_eq!(legion.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![PLAYER]);
    assert_eq!(hellbourne.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![7, 8]);
    assert_eq!(game.team_won(Team::Legion), Some(true));
    assert_eq!(game.team_won(Team::Hellbourne), Some(false));
    assert_eq!(game.derived_stats(PLAYER).unwrap().gpm, 0);
    assert!(game.record().unwrap().items().is_array());
}
