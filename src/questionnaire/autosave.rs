//! Autosave timing
//!
//! Decides when the draft should be written. Changes are debounced: a save
//! is due once no further change has arrived for the debounce period. A
//! periodic backup also fires on a fixed interval when the last save is
//! older than the minimum gap. Time is always passed in by the caller.

use chrono::{DateTime, Duration, Utc};

/// Saves closer together than this are skipped by the periodic backup
pub const MIN_BACKUP_GAP_SECS: i64 = 10;

/// Why a save is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    /// Answers changed and have been quiet for the debounce period
    Debounced,
    /// Periodic backup
    Backup,
}

#[derive(Debug, Clone)]
pub struct Autosaver {
    debounce: Duration,
    backup_interval: Duration,
    last_change: Option<DateTime<Utc>>,
    last_save: Option<DateTime<Utc>>,
    next_backup: DateTime<Utc>,
}

impl Autosaver {
    pub fn new(debounce: Duration, backup_interval: Duration, now: DateTime<Utc>) -> Self {
        Self {
            debounce,
            backup_interval,
            last_change: None,
            last_save: None,
            next_backup: now + backup_interval,
        }
    }

    /// Build from the millisecond/second values kept in settings
    pub fn from_millis(debounce_ms: u64, backup_interval_secs: u64, now: DateTime<Utc>) -> Self {
        Self::new(
            Duration::milliseconds(debounce_ms as i64),
            Duration::seconds(backup_interval_secs.max(1) as i64),
            now,
        )
    }

    /// Note an answer change; restarts the debounce period
    pub fn mark_changed(&mut self, now: DateTime<Utc>) {
        self.last_change = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    pub fn last_save(&self) -> Option<DateTime<Utc>> {
        self.last_save
    }

    /// Check whether a save is due at `now`
    ///
    /// Advances the backup schedule, so each backup slot is reported once.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<SaveReason> {
        if let Some(changed) = self.last_change {
            if now - changed >= self.debounce {
                return Some(SaveReason::Debounced);
            }
        }

        if now < self.next_backup {
            return None;
        }
        while self.next_backup <= now {
            self.next_backup = self.next_backup + self.backup_interval;
        }

        let stale = self
            .last_save
            .map_or(true, |saved| now - saved > Duration::seconds(MIN_BACKUP_GAP_SECS));
        stale.then_some(SaveReason::Backup)
    }

    /// Record a completed save
    pub fn record_save(&mut self, now: DateTime<Utc>) {
        self.last_change = None;
        self.last_save = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap()
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    fn saver() -> Autosaver {
        Autosaver::from_millis(500, 30, t0())
    }

    #[test]
    fn test_debounce_waits_for_quiet() {
        let mut autosave = saver();
        autosave.mark_changed(t0());
        assert_eq!(autosave.poll(t0() + ms(200)), None);

        autosave.mark_changed(t0() + ms(300));
        assert_eq!(autosave.poll(t0() + ms(600)), None);
        assert_eq!(autosave.poll(t0() + ms(800)), Some(SaveReason::Debounced));

        autosave.record_save(t0() + ms(800));
        assert!(!autosave.is_dirty());
        assert_eq!(autosave.poll(t0() + ms(2_000)), None);
    }

    #[test]
    fn test_backup_after_interval() {
        let mut autosave = saver();
        assert_eq!(autosave.poll(t0() + ms(29_999)), None);
        assert_eq!(autosave.poll(t0() + ms(30_000)), Some(SaveReason::Backup));
        // Same slot is not reported twice
        assert_eq!(autosave.poll(t0() + ms(30_100)), None);
    }

    #[test]
    fn test_backup_skipped_after_recent_save() {
        let mut autosave = saver();
        autosave.record_save(t0() + ms(25_000));
        assert_eq!(autosave.poll(t0() + ms(30_000)), None);

        // Next slot, more than 10s after the save
        assert_eq!(autosave.poll(t0() + ms(60_000)), Some(SaveReason::Backup));
    }

    #[test]
    fn test_missed_slots_collapse() {
        let mut autosave = saver();
        assert_eq!(autosave.poll(t0() + ms(125_000)), Some(SaveReason::Backup));
        assert_eq!(autosave.poll(t0() + ms(130_000)), None);
        assert_eq!(autosave.poll(t0() + ms(150_000)), Some(SaveReason::Backup));
    }
}
