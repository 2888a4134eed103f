use tracing::debug;

use super::lines::is_digits;
use crate::config::Windows;
use crate::profile::{Category, Medals, Profile, Tier};

const RANK_MARKER: &str = "Rank";
const MEDALS_MARKER: &str = "Medals";

/// Tier pass. Each exact tier line looks at its neighbourhood in reading
/// order and gives its tier to the first category marker found there.
/// A later tier line for the same category overwrites an earlier one.
pub fn assign_tiers(lines: &[String], windows: &Windows, profile: &mut Profile) {
    for (i, line) in lines.iter().enumerate() {
        let Some(tier) = Tier::from_label(line) else {
            continue;
        };
        let lo = i.saturating_sub(windows.tier_before);
        let hi = (i + windows.tier_after + 1).min(lines.len());
        if let Some(category) = lines[lo..hi].iter().find_map(|l| Category::find_in(l)) {
            debug!(line = i, %category, %tier, "tier");
            profile.record_mut(category).tier = tier;
        }
    }
}

/// Rank pass. `Rank` followed by a number (commas allowed) goes to the
/// nearest category marker above it.
pub fn assign_ranks(lines: &[String], windows: &Windows, profile: &mut Profile) {
    for (i, line) in lines.iter().enumerate() {
        if line != RANK_MARKER {
            continue;
        }
        let Some(rank) = lines.get(i + 1).and_then(|next| parse_rank(next)) else {
            continue;
        };
        if let Some(category) = nearest_marker_above(lines, i, windows.rank_lookback) {
            debug!(line = i, %category, rank, "rank");
            profile.record_mut(category).rank = Some(rank);
        }
    }
}

/// Medal pass. `Medals` is tied to the nearest category marker above it,
/// then the following lines are read as `<count>` / `<kind> medals` pairs.
/// The last pair per kind wins. An all-zero block leaves the record alone.
pub fn assign_medals(lines: &[String], windows: &Windows, profile: &mut Profile) {
    for (i, line) in lines.iter().enumerate() {
        if line != MEDALS_MARKER {
            continue;
        }
        let Some(category) = nearest_marker_above(lines, i, windows.medal_lookback) else {
            continue;
        };

        let mut medals = Medals::default();
        let end = (i + windows.medal_lookahead + 1).min(lines.len());
        for k in i + 1..end {
            let (Some(count), Some(kind)) = (lines.get(k), lines.get(k + 1)) else {
                continue;
            };
            if !is_digits(count) {
                continue;
            }
            let Ok(count) = count.parse::<u32>() else {
                continue;
            };
            let kind = kind.to_lowercase();
            if kind.contains("gold") {
                medals.gold = count;
            } else if kind.contains("silver") {
                medals.silver = count;
            } else if kind.contains("bronze") {
                medals.bronze = count;
            }
        }

        if !medals.is_empty() {
            debug!(line = i, %category, ?medals, "medals");
            profile.record_mut(category).medals = medals;
        }
    }
}

fn nearest_marker_above(lines: &[String], i: usize, lookback: usize) -> Option<Category> {
    let lo = i.saturating_sub(lookback);
    lines[lo..i].iter().rev().find_map(|l| Category::find_in(l))
}

fn parse_rank(token: &str) -> Option<u32> {
    let digits = token.replace(',', "");
    if !is_digits(&digits) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|&r| r > 0)
}
