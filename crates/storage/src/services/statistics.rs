//! Leaderboard and participant statistics over a snapshot of the event.
//!
//! Everything here is pure: callers load a [`Snapshot`] from the database
//! and pass the home location and the current date explicitly.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::statistics::{
    DemographicExtremes, FacilityCount, FacilityPopularity, FarthestParticipant, HomeLocation,
    LeaderboardEntry, ParticipantSummary, StatisticsReport,
};
use crate::models::{Game, Participant, Score, Sex, Team};
use crate::services::geo::haversine_km;

/// Full contents of the four event tables
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
    pub participants: Vec<Participant>,
    pub scores: Vec<Score>,
}

pub fn compute(snapshot: &Snapshot, home: &HomeLocation, today: NaiveDate) -> StatisticsReport {
    let extremes = demographic_extremes(&snapshot.participants, today);
    let facilities = facility_popularity(&snapshot.participants);

    StatisticsReport {
        home: home.clone(),
        leaderboard: leaderboard(&snapshot.teams, &snapshot.games, &snapshot.scores),
        youngest_male: extremes.youngest_male,
        youngest_female: extremes.youngest_female,
        oldest: extremes.oldest,
        facility_counts: facilities.counts,
        top_facility: facilities.top,
        farthest: farthest_participant(&snapshot.participants, home),
    }
}

/// Teams ranked by total points, descending, ties broken by name.
///
/// Every team appears exactly once; a team without scores totals zero.
/// Scores pointing at a team or game outside the snapshot are ignored.
pub fn leaderboard(teams: &[Team], games: &[Game], scores: &[Score]) -> Vec<LeaderboardEntry> {
    let known_games: HashSet<Uuid> = games.iter().map(|g| g.game_id).collect();

    let mut totals: HashMap<Uuid, (Decimal, usize)> = teams
        .iter()
        .map(|t| (t.team_id, (Decimal::ZERO, 0)))
        .collect();

    for score in scores.iter().filter(|s| known_games.contains(&s.game_id)) {
        if let Some((total, count)) = totals.get_mut(&score.team_id) {
            *total += score.points;
            *count += 1;
        }
    }

    let mut ranked: Vec<(&Team, Decimal, usize)> = teams
        .iter()
        .map(|t| {
            let (total, count) = totals.get(&t.team_id).copied().unwrap_or_default();
            (t, total, count)
        })
        .collect();

    ranked.sort_by(|(a, a_total, _), (b, b_total, _)| {
        b_total
            .cmp(a_total)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (team, total, scores_recorded))| LeaderboardEntry {
            rank: i as i64 + 1,
            team_id: team.team_id,
            team_name: team.name.clone(),
            facility: team.facility.clone(),
            total,
            scores_recorded,
        })
        .collect()
}

/// Youngest male, youngest female and oldest participant overall.
///
/// Participants without a birth date, or born after `today`, are skipped.
/// `Sex::Other` only competes for the oldest.
pub fn demographic_extremes(participants: &[Participant], today: NaiveDate) -> DemographicExtremes {
    let dated: Vec<(&Participant, NaiveDate)> = by_name(participants)
        .into_iter()
        .filter_map(|p| p.birth_date.filter(|d| *d <= today).map(|d| (p, d)))
        .collect();

    let youngest_of = |sex: Sex| {
        first_best(
            dated.iter().filter(|(p, _)| p.sex == sex).copied(),
            |candidate, best| candidate > best,
        )
    };

    DemographicExtremes {
        youngest_male: youngest_of(Sex::Male).map(|p| ParticipantSummary::from_participant(p, today)),
        youngest_female: youngest_of(Sex::Female)
            .map(|p| ParticipantSummary::from_participant(p, today)),
        oldest: first_best(dated.iter().copied(), |candidate, best| candidate < best)
            .map(|p| ParticipantSummary::from_participant(p, today)),
    }
}

/// Participants per facility, plus the most populated one
pub fn facility_popularity(participants: &[Participant]) -> FacilityPopularity {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for facility in participants.iter().filter_map(Participant::facility_name) {
        *counts.entry(facility.to_string()).or_default() += 1;
    }

    // BTreeMap iterates by name, so the first maximum wins ties
    let top = counts
        .iter()
        .fold(None::<(&String, i64)>, |best, (name, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        })
        .map(|(name, count)| FacilityCount {
            facility: name.clone(),
            participants: count,
        });

    FacilityPopularity { counts, top }
}

/// The participant registered farthest from `home`.
///
/// Only participants with both coordinates count. `None` when nobody has
/// coordinates.
pub fn farthest_participant(
    participants: &[Participant],
    home: &HomeLocation,
) -> Option<FarthestParticipant> {
    let distances = by_name(participants)
        .into_iter()
        .filter_map(|p| p.coordinates().map(|c| (p, haversine_km(home.coordinates, c))));

    let mut farthest: Option<(&Participant, f64)> = None;
    for (participant, distance) in distances {
        let is_farther = match farthest {
            Some((_, best)) => distance.partial_cmp(&best) == Some(Ordering::Greater),
            None => !distance.is_nan(),
        };
        if is_farther {
            farthest = Some((participant, distance));
        }
    }

    farthest.map(|(participant, distance_km)| FarthestParticipant {
        participant_id: participant.participant_id,
        name: participant.name.clone(),
        facility: participant.facility_name().map(String::from),
        locality: participant.locality.clone(),
        province: participant.province.clone(),
        distance_km,
    })
}

/// Stable name-ascending order, id as the final tie-break
fn by_name(participants: &[Participant]) -> Vec<&Participant> {
    let mut sorted: Vec<&Participant> = participants.iter().collect();
    sorted.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
    sorted
}

/// Keeps the first candidate unless a later one strictly beats it
fn first_best<'a>(
    candidates: impl Iterator<Item = (&'a Participant, NaiveDate)>,
    beats: impl Fn(NaiveDate, NaiveDate) -> bool,
) -> Option<&'a Participant> {
    candidates
        .fold(None::<(&Participant, NaiveDate)>, |best, (p, date)| match best {
            Some((_, best_date)) if !beats(date, best_date) => best,
            _ => Some((p, date)),
        })
        .map(|(p, _)| p)
}
