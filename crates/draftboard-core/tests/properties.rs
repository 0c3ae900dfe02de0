// Property tests for the draft order, lineup and board invariants.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use draftboard_core::board::{build_board, current_owner};
use draftboard_core::league::{
    Draft, DraftSettings, DraftType, Player, PlayerDirectory, PlayoffMatchup, Roster,
    RosterSettings, TradedPick,
};
use draftboard_core::lineup::optimizer::{lineup_points, LineupStrategy};
use draftboard_core::order::{
    calculate_draft_order, DraftOrderMethod, OrderInputs, UNRANKED_FINISH,
};
use draftboard_core::standings::TeamStanding;

const POSITIONS: [&str; 6] = ["QB", "RB", "WR", "TE", "K", "DEF"];

// Slots whose eligible sets are nested or disjoint.
const NESTED_SLOTS: [&str; 9] = ["QB", "RB", "WR", "TE", "K", "DEF", "FLEX", "SUPER_FLEX", "BN"];

const ANY_SLOTS: [&str; 11] = [
    "QB", "RB", "WR", "TE", "K", "DEF", "FLEX", "REC_FLEX", "WRRB_FLEX", "SUPER_FLEX", "BN",
];

#[derive(Debug, Clone)]
struct LeagueCase {
    rosters: Vec<Roster>,
    max_pf: HashMap<u32, f64>,
    bracket: Vec<PlayoffMatchup>,
    playoff_teams: u32,
    slot_order: Vec<u32>,
}

fn roster(id: u32, wins: u32, fpts: f64) -> Roster {
    Roster {
        roster_id: id,
        owner_id: Some(format!("user{id}")),
        settings: RosterSettings {
            wins,
            fpts,
            ..Default::default()
        },
        players: None,
        starters: None,
    }
}

/// Quarter-point scores keep hundredths exact.
fn points() -> impl Strategy<Value = f64> {
    (0u32..=160).prop_map(|q| q as f64 / 4.0)
}

/// A league of 2..=12 rosters with a single-round bracket among an even
/// number of them. Each bracket game is a placement game.
fn league_case() -> impl Strategy<Value = LeagueCase> {
    (2usize..=12)
        .prop_flat_map(|n| {
            let ids: Vec<u32> = (1..=n as u32).collect();
            (
                prop::collection::vec((0u32..=14, 1000u32..=2000), n),
                prop::collection::vec(1000u32..=2400, n),
                Just(ids.clone()).prop_shuffle(),
                1usize..=n / 2,
                Just(ids).prop_shuffle(),
            )
        })
        .prop_map(|(records, max_pf, playoff_order, games, slot_order)| {
            let rosters: Vec<Roster> = records
                .iter()
                .enumerate()
                .map(|(idx, &(wins, fpts))| roster(idx as u32 + 1, wins, fpts as f64))
                .collect();
            let max_pf = max_pf
                .iter()
                .enumerate()
                .map(|(idx, &pf)| (idx as u32 + 1, pf as f64))
                .collect();
            let bracket = (0..games)
                .map(|g| {
                    let (t1, t2) = (playoff_order[2 * g], playoff_order[2 * g + 1]);
                    PlayoffMatchup {
                        r: 1,
                        m: g as u32 + 1,
                        t1: Some(t1),
                        t2: Some(t2),
                        w: Some(t1),
                        l: Some(t2),
                        p: Some(2 * g as u32 + 1),
                        ..Default::default()
                    }
                })
                .collect();
            LeagueCase {
                rosters,
                max_pf,
                bracket,
                playoff_teams: 2 * games as u32,
                slot_order,
            }
        })
}

fn draft_for(slot_order: &[u32]) -> Draft {
    Draft {
        draft_id: "d".into(),
        season: "2025".into(),
        status: "pre_draft".into(),
        draft_type: DraftType::Snake,
        draft_order: None,
        slot_to_roster_id: Some(
            slot_order
                .iter()
                .enumerate()
                .map(|(idx, &roster_id)| ((idx + 1).to_string(), roster_id))
                .collect(),
        ),
        settings: DraftSettings {
            teams: slot_order.len() as u32,
            rounds: 3,
        },
    }
}

fn order(case: &LeagueCase, method: DraftOrderMethod) -> Vec<TeamStanding> {
    let draft = draft_for(&case.slot_order);
    let inputs = OrderInputs {
        rosters: &case.rosters,
        users: &[],
        max_pf: &case.max_pf,
        bracket: Some(&case.bracket),
        playoff_teams: Some(case.playoff_teams),
        draft: Some(&draft),
    };
    calculate_draft_order(method, &inputs).unwrap()
}

fn directory(positions: &[usize]) -> PlayerDirectory {
    positions
        .iter()
        .enumerate()
        .map(|(idx, &pos)| {
            let id = format!("P{idx}");
            let player = Player {
                player_id: id.clone(),
                first_name: None,
                last_name: None,
                position: Some(POSITIONS[pos].to_string()),
                fantasy_positions: None,
                team: None,
            };
            (id, player)
        })
        .collect()
}

fn week(scores: &[f64]) -> HashMap<String, f64> {
    scores
        .iter()
        .enumerate()
        .map(|(idx, &pts)| (format!("P{idx}"), pts))
        .collect()
}

fn roster_of_players() -> impl Strategy<Value = (Vec<usize>, Vec<f64>)> {
    (0usize..=12).prop_flat_map(|n| {
        (
            prop::collection::vec(0..POSITIONS.len(), n + 1),
            prop::collection::vec(points(), n + 1),
        )
    })
}

fn layout(labels: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(labels), 0..=10)
        .prop_map(|slots| slots.into_iter().map(str::to_string).collect())
}

/// Total with and without the last player in `positions`/`scores`.
fn with_and_without(
    strategy: LineupStrategy,
    positions: &[usize],
    scores: &[f64],
    layout: &[String],
) -> (f64, f64) {
    let players = directory(positions);
    let n = scores.len() - 1;
    let without = lineup_points(strategy, &week(&scores[..n]), layout, &players);
    let with = lineup_points(strategy, &week(scores), layout, &players);
    (without, with)
}

/// Total before and after raising one player's score by `bump`.
fn before_and_after_raise(
    strategy: LineupStrategy,
    positions: &[usize],
    scores: &[f64],
    layout: &[String],
    raised: usize,
    bump: f64,
) -> (f64, f64) {
    let players = directory(positions);
    let before = lineup_points(strategy, &week(scores), layout, &players);
    let mut raised_scores = scores.to_vec();
    raised_scores[raised] += bump;
    let after = lineup_points(strategy, &week(&raised_scores), layout, &players);
    (before, after)
}

proptest! {
    // Every policy yields draft positions 1..N, each roster exactly once,
    // listed in draft-position order.
    #[test]
    fn draft_positions_are_a_permutation(case in league_case()) {
        for method in [
            DraftOrderMethod::Standings,
            DraftOrderMethod::StandingsMaxPf,
            DraftOrderMethod::SleeperDraft,
        ] {
            let standings = order(&case, method);
            let n = case.rosters.len();
            prop_assert_eq!(standings.len(), n);

            let positions: Vec<u32> = standings.iter().map(|t| t.draft_position).collect();
            prop_assert_eq!(positions, (1..=n as u32).collect::<Vec<_>>());

            let rosters: HashSet<u32> = standings.iter().map(|t| t.roster_id).collect();
            prop_assert_eq!(rosters.len(), n);
        }
    }

    // Non-playoff teams come first by ascending Max PF, then playoff teams by
    // descending finish.
    #[test]
    fn max_pf_order_splits_playoff_teams(case in league_case()) {
        let standings = order(&case, DraftOrderMethod::StandingsMaxPf);
        let playoff: HashSet<u32> = case
            .bracket
            .iter()
            .flat_map(|m| [m.t1, m.t2])
            .flatten()
            .collect();

        let split = standings
            .iter()
            .position(|t| playoff.contains(&t.roster_id))
            .unwrap_or(standings.len());
        let (non_playoff, playoff_part) = standings.split_at(split);

        prop_assert!(non_playoff.iter().all(|t| !playoff.contains(&t.roster_id)));
        prop_assert!(playoff_part.iter().all(|t| playoff.contains(&t.roster_id)));
        prop_assert!(non_playoff.windows(2).all(|w| w[0].max_pf <= w[1].max_pf));

        let finish = |t: &TeamStanding| t.playoff_finish.unwrap_or(UNRANKED_FINISH);
        prop_assert!(playoff_part.windows(2).all(|w| finish(&w[0]) >= finish(&w[1])));
    }

    // Standings order is ascending by wins, ties by points-for.
    #[test]
    fn standings_order_is_worst_first(case in league_case()) {
        let standings = order(&case, DraftOrderMethod::Standings);
        for w in standings.windows(2) {
            prop_assert!(
                w[0].wins < w[1].wins
                    || (w[0].wins == w[1].wins && w[0].points_for <= w[1].points_for)
            );
        }
    }

    // The board covers every (round, slot) once and agrees with the ownership
    // lookup.
    #[test]
    fn board_has_one_pick_per_round_and_slot(
        case in league_case(),
        rounds in 0u32..=5,
        trades in prop::collection::vec((1u32..=5, 1u32..=12, 1u32..=12), 0..10),
    ) {
        let standings = order(&case, DraftOrderMethod::SleeperDraft);
        let traded: Vec<TradedPick> = trades
            .iter()
            .map(|&(round, original, owner)| TradedPick {
                season: "2025".into(),
                round,
                roster_id: original,
                owner_id: owner,
                previous_owner_id: None,
            })
            .collect();

        let board = build_board(&standings, &traded, "2025", rounds).unwrap();
        let n = standings.len() as u32;
        prop_assert_eq!(board.picks.len() as u32, n * rounds);

        for round in 1..=rounds {
            let slots: Vec<u32> = board.round(round).map(|p| p.slot).collect();
            prop_assert_eq!(slots, (1..=n).collect::<Vec<_>>());
        }
        for pick in &board.picks {
            let expected = current_owner(&traded, "2025", pick.round, pick.original_owner);
            prop_assert_eq!(pick.current_owner, expected);
            prop_assert_eq!(pick.is_traded, pick.original_owner != pick.current_owner);
        }
    }

    // Adding a scored player never lowers the greedy total when slot
    // eligibility is nested.
    #[test]
    fn greedy_is_monotonic_on_nested_layouts(
        (positions, scores) in roster_of_players(),
        layout in layout(&NESTED_SLOTS),
    ) {
        let (without, with) =
            with_and_without(LineupStrategy::Greedy, &positions, &scores, &layout);
        prop_assert!(with >= without - 1e-9, "with={with} without={without}");
    }

    // Raising one player's score never lowers the greedy total on nested
    // layouts.
    #[test]
    fn greedy_total_never_drops_when_a_score_rises(
        (positions, scores) in roster_of_players(),
        layout in layout(&NESTED_SLOTS),
        raised in any::<prop::sample::Index>(),
        bump in points(),
    ) {
        let raised = raised.index(scores.len());
        let (before, after) = before_and_after_raise(
            LineupStrategy::Greedy, &positions, &scores, &layout, raised, bump,
        );
        prop_assert!(after >= before - 1e-9, "after={after} before={before}");
    }

    // The exact assignment is monotonic on any layout.
    #[test]
    fn optimal_is_monotonic_on_any_layout(
        (positions, scores) in roster_of_players(),
        layout in layout(&ANY_SLOTS),
    ) {
        let (without, with) =
            with_and_without(LineupStrategy::Optimal, &positions, &scores, &layout);
        prop_assert!(with >= without - 1e-9, "with={with} without={without}");
    }

    // Raising one player's score never lowers the exact total on any layout.
    #[test]
    fn optimal_total_never_drops_when_a_score_rises(
        (positions, scores) in roster_of_players(),
        layout in layout(&ANY_SLOTS),
        raised in any::<prop::sample::Index>(),
        bump in points(),
    ) {
        let raised = raised.index(scores.len());
        let (before, after) = before_and_after_raise(
            LineupStrategy::Optimal, &positions, &scores, &layout, raised, bump,
        );
        prop_assert!(after >= before - 1e-9, "after={after} before={before}");
    }

    // The exact assignment never scores below greedy.
    #[test]
    fn optimal_never_below_greedy(
        (positions, scores) in roster_of_players(),
        layout in layout(&ANY_SLOTS),
    ) {
        let players = directory(&positions);
        let scores = week(&scores);
        let greedy = lineup_points(LineupStrategy::Greedy, &scores, &layout, &players);
        let optimal = lineup_points(LineupStrategy::Optimal, &scores, &layout, &players);
        prop_assert!(optimal >= greedy - 1e-9, "optimal={optimal} greedy={greedy}");
    }
}

#[test]
fn empty_scores_total_zero() {
    let players = directory(&[0, 1]);
    for strategy in [LineupStrategy::Greedy, LineupStrategy::Optimal] {
        let total = lineup_points(strategy, &HashMap::new(), &["QB", "RB", "FLEX"], &players);
        assert_eq!(total, 0.0);
    }
}
