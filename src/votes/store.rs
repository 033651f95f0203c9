//! In-memory vote bookkeeping
//!
//! Tracks per-user vote counts and streaks, and the community vote party.
//! Daily counts and streaks are kept against calendar dates, so a new day
//! needs no explicit rollover.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Everything recorded about one voter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterRecord {
    /// Votes ever received
    pub total: u32,
    /// Votes received on `daily_date`
    pub daily: u32,
    /// Consecutive days with at least one vote, ending on `last_vote`
    pub streak: u32,
    /// Whether vote reminders are enabled
    pub reminders: bool,
    /// Day the `daily` count belongs to
    pub daily_date: Option<NaiveDate>,
    /// Day of the most recent vote
    pub last_vote: Option<NaiveDate>,
}

impl VoterRecord {
    /// The record as seen on `today`: a stale daily count reads as zero and a
    /// streak not continued since yesterday reads as broken
    pub fn as_of(&self, today: NaiveDate) -> VoterRecord {
        let mut record = self.clone();
        if record.daily_date != Some(today) {
            record.daily = 0;
        }
        if let Some(last) = record.last_vote {
            if last < today && last.succ_opt() != Some(today) {
                record.streak = 0;
            }
        }
        record
    }

    fn roll_daily(&mut self, today: NaiveDate) {
        if self.daily_date != Some(today) {
            self.daily = 0;
            self.daily_date = Some(today);
        }
    }
}

/// Vote counts keyed by user name
#[derive(Debug, Default)]
pub struct VoteStore {
    voters: HashMap<String, VoterRecord>,
}

impl VoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record for `name`; an unknown voter has an all-zero record
    pub fn record(&self, name: &str) -> VoterRecord {
        self.voters.get(name).cloned().unwrap_or_default()
    }

    /// Record for `name` as seen on `today`
    pub fn record_on(&self, name: &str, today: NaiveDate) -> VoterRecord {
        self.record(name).as_of(today)
    }

    fn entry(&mut self, name: &str) -> &mut VoterRecord {
        self.voters.entry(name.to_string()).or_default()
    }

    /// Add votes granted by an administrator; returns the new total
    pub fn add_votes(&mut self, name: &str, amount: u32, today: NaiveDate) -> u32 {
        let record = self.entry(name);
        record.roll_daily(today);
        record.total = record.total.saturating_add(amount);
        record.daily = record.daily.saturating_add(amount);
        record.total
    }

    /// Remove votes, never going below zero; returns the new total
    pub fn remove_votes(&mut self, name: &str, amount: u32, today: NaiveDate) -> u32 {
        let record = self.entry(name);
        record.roll_daily(today);
        record.total = record.total.saturating_sub(amount);
        record.daily = record.daily.saturating_sub(amount);
        record.total
    }

    /// Record one incoming vote on `today`
    ///
    /// The first vote of a day continues the streak if the previous vote was
    /// yesterday and starts a new one otherwise.
    pub fn record_vote(&mut self, name: &str, today: NaiveDate) -> &VoterRecord {
        let record = self.entry(name);
        record.roll_daily(today);

        match record.last_vote {
            Some(last) if last == today => {}
            Some(last) if last.succ_opt() == Some(today) => {
                record.streak = record.streak.saturating_add(1);
            }
            _ => record.streak = 1,
        }
        record.last_vote = Some(today);

        record.daily = record.daily.saturating_add(1);
        record.total = record.total.saturating_add(1);
        record
    }

    /// Clear a streak; the next vote starts a new one
    pub fn reset_streak(&mut self, name: &str) {
        let record = self.entry(name);
        record.streak = 0;
        record.last_vote = None;
    }

    /// Set a streak that counts as current on `today`
    pub fn set_streak(&mut self, name: &str, streak: u32, today: NaiveDate) {
        let record = self.entry(name);
        record.streak = streak;
        record.last_vote = Some(today);
    }

    /// Add to a streak (negative amounts subtract); returns the new streak
    pub fn add_streak(&mut self, name: &str, amount: i32, today: NaiveDate) -> u32 {
        let record = self.entry(name).clone().as_of(today);
        let streak = record.streak.saturating_add_signed(amount);
        self.set_streak(name, streak, today);
        streak
    }

    /// Flip the reminder setting; returns the new value
    pub fn toggle_reminders(&mut self, name: &str) -> bool {
        let record = self.entry(name);
        record.reminders = !record.reminders;
        record.reminders
    }

    /// Top voters by total, ties broken by name
    pub fn leaderboard(&self, limit: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .voters
            .iter()
            .filter(|(_, record)| record.total > 0)
            .map(|(name, record)| (name.clone(), record.total))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }
}

/// What a change to the vote party led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyEvent {
    /// Progress moved but the threshold was not reached
    Progress { current: i64, required: i64 },
    /// The threshold was reached and a party started
    Started { required: i64 },
}

/// Community goal: every `threshold` votes start a party
#[derive(Debug)]
pub struct VoteParty {
    current: i64,
    threshold: i64,
    parties: u32,
}

impl VoteParty {
    pub fn new(threshold: i64) -> Self {
        VoteParty {
            current: 0,
            threshold: threshold.max(1),
            parties: 0,
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    /// Number of parties started so far
    pub fn parties(&self) -> u32 {
        self.parties
    }

    /// Change the threshold, e.g. after a configuration reload
    pub fn set_threshold(&mut self, threshold: i64) {
        self.threshold = threshold.max(1);
    }

    /// Add to the progress (negative amounts subtract, floored at zero)
    pub fn add(&mut self, amount: i64) -> PartyEvent {
        self.set(self.current.saturating_add(amount))
    }

    /// Set the progress; reaching the threshold starts a party
    pub fn set(&mut self, count: i64) -> PartyEvent {
        self.current = count.max(0);
        if self.current >= self.threshold {
            self.start(true)
        } else {
            PartyEvent::Progress {
                current: self.current,
                required: self.threshold,
            }
        }
    }

    /// Start a party right away, optionally keeping the current progress
    pub fn force_start(&mut self, reset_progress: bool) -> PartyEvent {
        self.start(reset_progress)
    }

    fn start(&mut self, reset_progress: bool) -> PartyEvent {
        self.parties += 1;
        if reset_progress {
            self.current = 0;
        }
        PartyEvent::Started {
            required: self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    #[test]
    fn test_add_and_remove_votes() {
        let mut store = VoteStore::new();
        assert_eq!(store.add_votes("alice", 5, day(1)), 5);
        assert_eq!(store.remove_votes("alice", 2, day(1)), 3);
        assert_eq!(store.remove_votes("alice", 10, day(1)), 0);
        assert_eq!(store.record("alice").daily, 0);
        assert_eq!(store.record("nobody"), VoterRecord::default());
    }

    #[test]
    fn test_daily_count_resets_on_a_new_day() {
        let mut store = VoteStore::new();
        store.add_votes("alice", 4, day(1));
        assert_eq!(store.record_on("alice", day(1)).daily, 4);
        assert_eq!(store.record_on("alice", day(2)).daily, 0);

        store.add_votes("alice", 1, day(2));
        assert_eq!(store.record_on("alice", day(2)).daily, 1);
        assert_eq!(store.record("alice").total, 5);
    }

    #[test]
    fn test_record_vote_extends_streak_once_per_day() {
        let mut store = VoteStore::new();
        store.record_vote("alice", day(1));
        store.record_vote("alice", day(1));
        assert_eq!(store.record_on("alice", day(1)).streak, 1);
        assert_eq!(store.record_on("alice", day(1)).daily, 2);

        store.record_vote("alice", day(2));
        assert_eq!(store.record_on("alice", day(2)).streak, 2);
        assert_eq!(store.record_on("alice", day(2)).daily, 1);
        assert_eq!(store.record_on("alice", day(3)).streak, 2);

        assert_eq!(store.record_on("alice", day(4)).streak, 0);
        store.record_vote("alice", day(5));
        assert_eq!(store.record_on("alice", day(5)).streak, 1);
        assert_eq!(store.record("alice").total, 4);
    }

    #[test]
    fn test_streak_edits() {
        let mut store = VoteStore::new();
        store.set_streak("bob", 4, day(1));
        assert_eq!(store.add_streak("bob", 3, day(1)), 7);
        assert_eq!(store.add_streak("bob", -10, day(1)), 0);
        store.set_streak("bob", 2, day(1));
        store.reset_streak("bob");
        assert_eq!(store.record("bob").streak, 0);

        store.record_vote("bob", day(1));
        assert_eq!(store.record_on("bob", day(1)).streak, 1);
    }

    #[test]
    fn test_edited_streak_continues_with_next_vote() {
        let mut store = VoteStore::new();
        store.set_streak("bob", 9, day(1));
        assert_eq!(store.record_on("bob", day(2)).streak, 9);
        store.record_vote("bob", day(2));
        assert_eq!(store.record_on("bob", day(2)).streak, 10);
        assert_eq!(store.add_streak("bob", 1, day(5)), 1);
    }

    #[test]
    fn test_toggle_reminders() {
        let mut store = VoteStore::new();
        assert!(store.toggle_reminders("alice"));
        assert!(!store.toggle_reminders("alice"));
    }

    #[test]
    fn test_leaderboard_order() {
        let mut store = VoteStore::new();
        store.add_votes("carol", 3, day(1));
        store.add_votes("alice", 5, day(1));
        store.add_votes("bob", 3, day(1));
        store.set_streak("dave", 1, day(1));

        assert_eq!(
            store.leaderboard(10),
            vec![
                ("alice".to_string(), 5),
                ("bob".to_string(), 3),
                ("carol".to_string(), 3)
            ]
        );
        assert_eq!(store.leaderboard(1).len(), 1);
    }

    #[test]
    fn test_party_progress_and_start() {
        let mut party = VoteParty::new(3);
        assert_eq!(party.add(2), PartyEvent::Progress { current: 2, required: 3 });
        assert_eq!(party.add(1), PartyEvent::Started { required: 3 });
        assert_eq!(party.current(), 0);
        assert_eq!(party.parties(), 1);
        assert_eq!(party.add(-5), PartyEvent::Progress { current: 0, required: 3 });
    }

    #[test]
    fn test_party_force_start() {
        let mut party = VoteParty::new(10);
        party.set(4);
        assert_eq!(party.force_start(false), PartyEvent::Started { required: 10 });
        assert_eq!(party.current(), 4);
        party.force_start(true);
        assert_eq!(party.current(), 0);
        assert_eq!(party.parties(), 2);
    }

    #[test]
    fn test_party_threshold_floor() {
        let mut party = VoteParty::new(0);
        assert_eq!(party.threshold(), 1);
        party.set_threshold(20);
        assert_eq!(party.threshold(), 20);
    }
}
