//! Company standings: 3 points per victory, ties broken by victories, set difference, then name.

use crate::logic::outcome::validate_match_completion;
use crate::models::{League, MatchStatus, Side};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const POINTS_PER_VICTORY: u32 = 3;

/// A completed match reduced to what the standings need.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompletedMatch {
    pub company_1: String,
    pub company_2: String,
    pub score_1: Option<String>,
    pub score_2: Option<String>,
}

/// One line of the company standings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub position: usize,
    pub company: String,
    pub matches_played: u32,
    pub victories: u32,
    pub defeats: u32,
    pub points: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
}

impl RankingEntry {
    fn new(company: &str) -> Self {
        Self {
            company: company.to_string(),
            ..Self::default()
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }
}

fn compare_entries(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.victories.cmp(&a.victories))
        .then_with(|| b.set_difference().cmp(&a.set_difference()))
        .then_with(|| a.company.cmp(&b.company))
}

/// Rank every company appearing in the given completed matches.
pub fn compute_company_ranking(matches: &[CompletedMatch]) -> Vec<RankingEntry> {
    rank_companies(std::iter::empty::<&str>(), matches)
}

/// Rank `companies` plus every company appearing in `matches`.
///
/// Companies listed without any counted match appear with zero counts. Matches
/// missing a score, or whose scores do not validate, are skipped.
pub fn rank_companies<'a>(
    companies: impl IntoIterator<Item = &'a str>,
    matches: &[CompletedMatch],
) -> Vec<RankingEntry> {
    let mut table: BTreeMap<String, RankingEntry> = companies
        .into_iter()
        .map(|c| (c.to_string(), RankingEntry::new(c)))
        .collect();
    for m in matches {
        for company in [&m.company_1, &m.company_2] {
            table
                .entry(company.clone())
                .or_insert_with(|| RankingEntry::new(company));
        }
    }

    for m in matches {
        let (Some(score_1), Some(score_2)) = (m.score_1.as_deref(), m.score_2.as_deref()) else {
            log::debug!("Skipping {} vs {}: scores missing", m.company_1, m.company_2);
            continue;
        };
        let outcome = match validate_match_completion(score_1, score_2) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Skipping {} vs {} in ranking: {}", m.company_1, m.company_2, e);
                continue;
            }
        };

        // An internal match (both teams from one company) counts once, from team 1's side.
        let mut sides = vec![(&m.company_1, Side::One)];
        if m.company_2 != m.company_1 {
            sides.push((&m.company_2, Side::Two));
        }
        for (company, side) in sides {
            let Some(entry) = table.get_mut(company.as_str()) else {
                continue;
            };
            let (won, lost) = outcome.sets_for(side);
            entry.sets_won += won;
            entry.sets_lost += lost;
            if won > lost {
                entry.victories += 1;
            } else {
                entry.defeats += 1;
            }
        }
    }

    let mut ranking: Vec<RankingEntry> = table
        .into_values()
        .map(|mut e| {
            e.matches_played = e.victories + e.defeats;
            e.points = e.victories * POINTS_PER_VICTORY;
            e
        })
        .collect();
    ranking.sort_by(compare_entries);
    for (i, entry) in ranking.iter_mut().enumerate() {
        entry.position = i + 1;
    }
    ranking
}

/// Standings for the whole league: every company owning a team is listed.
pub fn company_ranking(league: &League) -> Vec<RankingEntry> {
    let completed: Vec<CompletedMatch> = league
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed)
        .filter_map(|m| {
            let team_1 = league.team(m.team_1).ok()?;
            let team_2 = league.team(m.team_2).ok()?;
            Some(CompletedMatch {
                company_1: team_1.company.clone(),
                company_2: team_2.company.clone(),
                score_1: m.score(Side::One).map(str::to_string),
                score_2: m.score(Side::Two).map(str::to_string),
            })
        })
        .collect();
    let companies = league.companies();
    rank_companies(companies.iter().map(String::as_str), &completed)
}

const CSV_HEADER: [&str; 8] = [
    "position",
    "company",
    "matches_played",
    "victories",
    "defeats",
    "points",
    "sets_won",
    "sets_lost",
];

/// Render standings as CSV, header row first (also for an empty ranking).
pub fn ranking_csv(ranking: &[RankingEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for entry in ranking {
        writer.serialize(entry)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}
