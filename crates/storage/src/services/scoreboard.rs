use std::collections::{BTreeMap, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::dto::scoreboard::ScoreboardEntry;
use crate::models::{Contestant, Criteria, Score};

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Average every criterion over the given scores, weight the averages by
/// criterion points and rank contestants by total.
///
/// Ties share a rank and the next distinct total skips ahead
/// (100, 90, 90, 80 ranks as 1, 2, 2, 4). Entries come back in rank order,
/// ties broken by contestant order.
pub fn build_scoreboard(
    contestants: &[Contestant],
    criteria: &[Criteria],
    scores: &[Score],
) -> Vec<ScoreboardEntry> {
    let mut sums: HashMap<(i64, i64), (Decimal, u32)> = HashMap::new();
    for score in scores {
        if let Some(value) = score.score {
            let slot = sums
                .entry((score.contestant_id, score.criteria_id))
                .or_insert((Decimal::ZERO, 0));
            slot.0 += Decimal::from(value);
            slot.1 += 1;
        }
    }

    let mut entries: Vec<ScoreboardEntry> = contestants
        .iter()
        .map(|contestant| {
            let mut averages = BTreeMap::new();
            let mut total = Decimal::ZERO;

            for criterion in criteria {
                let mean = sums
                    .get(&(contestant.contestant_id, criterion.criteria_id))
                    .map(|(sum, count)| round2(*sum / Decimal::from(*count)));

                if let Some(mean) = mean {
                    total += mean * criterion.points / HUNDRED;
                }
                averages.insert(criterion.criteria_id, mean);
            }

            ScoreboardEntry {
                contestant_id: contestant.contestant_id,
                name: contestant.name.clone(),
                order: contestant.sort_order,
                criteria: averages,
                total: round2(total),
                rank: 0,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.total.cmp(&a.total).then(a.order.cmp(&b.order)));

    let mut previous: Option<Decimal> = None;
    let mut rank = 0;
    for (index, entry) in entries.iter_mut().enumerate() {
        if previous != Some(entry.total) {
            rank = index as u32 + 1;
        }
        entry.rank = rank;
        previous = Some(entry.total);
    }

    entries
}
