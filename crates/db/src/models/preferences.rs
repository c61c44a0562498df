//! Per-user notification preference model.

use chrono::NaiveTime;
use hudur_core::types::{Timestamp, UserId};
use hudur_core::{Category, Channel};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notification_preferences` table.
///
/// One row per user, created lazily: reads fall back to
/// [`NotificationPreferences::default_for`] without persisting anything;
/// only an explicit preference update writes a row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPreferences {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub attendance_enabled: bool,
    pub leave_enabled: bool,
    pub system_enabled: bool,
    pub marketing_enabled: bool,
    pub quiet_hours_start: NaiveTime,
    pub quiet_hours_end: NaiveTime,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NotificationPreferences {
    /// The in-memory default returned when a user has no stored row.
    ///
    /// Never persisted; `id` is nil to make that unmistakable.
    pub fn default_for(user_id: UserId) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::nil(),
            user_id,
            email_enabled: true,
            sms_enabled: false,
            push_enabled: true,
            attendance_enabled: true,
            leave_enabled: true,
            system_enabled: true,
            marketing_enabled: false,
            quiet_hours_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            quiet_hours_end: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user has enabled the given category at all.
    pub fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::Attendance => self.attendance_enabled,
            Category::Leave => self.leave_enabled,
            Category::System => self.system_enabled,
            Category::Marketing => self.marketing_enabled,
        }
    }

    /// Whether the user's global toggle for the given channel is on.
    ///
    /// Realtime has no stored toggle and is always considered enabled;
    /// it is inherently best-effort.
    pub fn channel_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email_enabled,
            Channel::Sms => self.sms_enabled,
            Channel::Push => self.push_enabled,
            Channel::Realtime => true,
        }
    }

    /// Whether `at` falls inside the quiet-hours window.
    ///
    /// The window may cross midnight (e.g. 22:00-07:00).
    pub fn in_quiet_hours(&self, at: NaiveTime) -> bool {
        let (start, end) = (self.quiet_hours_start, self.quiet_hours_end);
        if start == end {
            return false;
        }
        if start < end {
            at >= start && at < end
        } else {
            at >= start || at < end
        }
    }
}

/// Full-replacement DTO for a preference update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePreferences {
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub attendance_enabled: bool,
    pub leave_enabled: bool,
    pub system_enabled: bool,
    pub marketing_enabled: bool,
    pub quiet_hours_start: NaiveTime,
    pub quiet_hours_end: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn defaults_match_the_documented_matrix() {
        let prefs = NotificationPreferences::default_for(uuid::Uuid::new_v4());
        assert!(prefs.email_enabled);
        assert!(!prefs.sms_enabled);
        assert!(prefs.push_enabled);
        assert!(prefs.attendance_enabled);
        assert!(prefs.leave_enabled);
        assert!(prefs.system_enabled);
        assert!(!prefs.marketing_enabled);
        assert_eq!(prefs.quiet_hours_start, t(22, 0));
        assert_eq!(prefs.quiet_hours_end, t(7, 0));
        assert!(prefs.id.is_nil());
    }

    #[test]
    fn quiet_hours_window_crossing_midnight() {
        let prefs = NotificationPreferences::default_for(uuid::Uuid::new_v4());
        assert!(prefs.in_quiet_hours(t(23, 30)));
        assert!(prefs.in_quiet_hours(t(3, 0)));
        assert!(!prefs.in_quiet_hours(t(12, 0)));
        assert!(!prefs.in_quiet_hours(t(7, 0)));
        assert!(prefs.in_quiet_hours(t(22, 0)));
    }

    #[test]
    fn quiet_hours_window_same_day() {
        let mut prefs = NotificationPreferences::default_for(uuid::Uuid::new_v4());
        prefs.quiet_hours_start = t(13, 0);
        prefs.quiet_hours_end = t(14, 0);
        assert!(prefs.in_quiet_hours(t(13, 30)));
        assert!(!prefs.in_quiet_hours(t(14, 0)));
        assert!(!prefs.in_quiet_hours(t(12, 59)));
    }

    #[test]
    fn degenerate_quiet_hours_window_never_matches() {
        let mut prefs = NotificationPreferences::default_for(uuid::Uuid::new_v4());
        prefs.quiet_hours_start = t(9, 0);
        prefs.quiet_hours_end = t(9, 0);
        assert!(!prefs.in_quiet_hours(t(9, 0)));
        assert!(!prefs.in_quiet_hours(t(21, 0)));
    }
}
