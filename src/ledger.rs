use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

/// Which side of a fixture a team is viewed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perspective {
    Home,
    Away,
}

impl Perspective {
    // Margins are stored home-minus-away, so the away view flips them.
    pub fn orient(self, home_value: f64) -> f64 {
        match self {
            Perspective::Home => home_value,
            Perspective::Away if home_value == 0.0 => 0.0,
            Perspective::Away => -home_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_odds: f64,
    pub draw_odds: f64,
    pub away_odds: f64,
    pub bookmakers_surveyed: Option<u32>,
}

impl MatchRecord {
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn margin(&self) -> Option<i64> {
        let (Some(home), Some(away)) = (self.home_score, self.away_score) else {
            return None;
        };
        Some(home as i64 - away as i64)
    }

    pub fn home_win(&self) -> Option<bool> {
        self.won(Perspective::Home)
    }

    /// Strict win for the side given by `perspective`. A draw is a non-win for both sides.
    pub fn won(&self, perspective: Perspective) -> Option<bool> {
        let (Some(home), Some(away)) = (self.home_score, self.away_score) else {
            return None;
        };
        Some(match perspective {
            Perspective::Home => home > away,
            Perspective::Away => away > home,
        })
    }

    pub fn team(&self, perspective: Perspective) -> &str {
        match perspective {
            Perspective::Home => &self.home_team,
            Perspective::Away => &self.away_team,
        }
    }

    /// Bookmaker odds folded into a single home probability, draw odds ignored.
    pub fn implied_home_win_prob(&self) -> f64 {
        self.away_odds / (self.home_odds + self.away_odds)
    }
}

// Positions into Ledger::records, ascending by (date, position)
#[derive(Debug, Default)]
struct TeamHistory {
    home: Vec<usize>,
    away: Vec<usize>,
}

impl TeamHistory {
    fn slots(&self, perspective: Perspective) -> &[usize] {
        match perspective {
            Perspective::Home => &self.home,
            Perspective::Away => &self.away,
        }
    }
}

/// Immutable match table. Played fixtures are grouped per team and side up front so
/// prior history for any cutoff is a binary search away.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<MatchRecord>,
    history: HashMap<String, TeamHistory>,
    mean_margin: f64,
}

impl Ledger {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        let mut history: HashMap<String, TeamHistory> = HashMap::new();
        let mut margin_total: i64 = 0;
        let mut played = 0usize;

        for (idx, m) in records.iter().enumerate() {
            let Some(margin) = m.margin() else { continue };
            margin_total += margin;
            played += 1;

            history.entry(m.home_team.clone()).or_default().home.push(idx);
            history.entry(m.away_team.clone()).or_default().away.push(idx);
        }

        // Stable sort, so same-day fixtures keep ledger order
        for h in history.values_mut() {
            h.home.sort_by_key(|&i| records[i].date);
            h.away.sort_by_key(|&i| records[i].date);
        }

        let mean_margin = if played == 0 { 0.0 } else { margin_total as f64 / played as f64 };

        Self {
            records,
            history,
            mean_margin,
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean home margin across every played record, 0.0 if nothing has been played.
    pub fn mean_margin(&self) -> f64 {
        self.mean_margin
    }

    pub fn played_count(&self) -> usize {
        self.records.iter().filter(|m| m.is_played()).count()
    }

    pub fn teams(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
            .collect()
    }

    /// Played matches of `team` on the `perspective` side dated strictly before `cutoff`,
    /// most recent first.
    pub fn prior_matches<'a>(
        &'a self,
        team: &str,
        perspective: Perspective,
        cutoff: NaiveDate,
    ) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        let slots: &[usize] = self
            .history
            .get(team)
            .map(|h| h.slots(perspective))
            .unwrap_or(&[]);
        let end = slots.partition_point(|&i| self.records[i].date < cutoff);

        slots[..end].iter().rev().map(move |&i| &self.records[i])
    }
}
