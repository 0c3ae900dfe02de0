// Playoff bracket resolution: final finish per team and the set of playoff
// participants.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::league::PlayoffMatchup;

/// Final placement for every team that played a tracked placement game.
///
/// Placement games carry a `p` value: the winner finishes `p`, the loser
/// `p + 1`. Brackets where no entry carries a `p` value fall back to a
/// round-based reading (see [`resolve_finish_by_round`]).
pub fn resolve_finish(bracket: &[PlayoffMatchup]) -> HashMap<u32, u32> {
    if !bracket.iter().any(|m| m.p.is_some()) {
        debug!("bracket has no placement games, resolving finish by round");
        return resolve_finish_by_round(bracket);
    }

    let mut finish = HashMap::new();

    for entry in bracket {
        if let (Some(place), Some(winner), Some(loser)) = (entry.p, entry.w, entry.l) {
            finish.insert(winner, place);
            finish.insert(loser, place + 1);
        }
    }

    finish
}

/// Round-based finish for brackets without placement games.
///
/// The first decided match of the final round is the championship (1st and
/// 2nd). Losers of earlier rounds, latest round first, take 3rd, 4th, ... in
/// bracket order. Teams that never lose a recorded match (byes into a later
/// round that is itself unrecorded, for example) stay unranked.
pub fn resolve_finish_by_round(bracket: &[PlayoffMatchup]) -> HashMap<u32, u32> {
    let mut finish = HashMap::new();
    let Some(max_round) = bracket.iter().map(|m| m.r).max() else {
        return finish;
    };

    let championship = bracket
        .iter()
        .filter(|m| m.r == max_round)
        .find_map(|m| m.w.zip(m.l));
    if let Some((winner, loser)) = championship {
        finish.insert(winner, 1);
        finish.insert(loser, 2);
    }

    let mut next_place = 3;
    for round in (1..max_round).rev() {
        for entry in bracket.iter().filter(|m| m.r == round) {
            if let Some(loser) = entry.l {
                finish.entry(loser).or_insert_with(|| {
                    let place = next_place;
                    next_place += 1;
                    place
                });
            }
        }
    }

    finish
}

/// Every team that appears on either side of any bracket entry.
pub fn participant_team_ids(bracket: &[PlayoffMatchup]) -> HashSet<u32> {
    bracket
        .iter()
        .flat_map(|m| [m.t1, m.t2])
        .flatten()
        .collect()
}
