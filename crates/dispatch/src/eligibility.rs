//! Channel eligibility rules.
//!
//! Which channels a notification goes out on is a pure function of the
//! notification's category and priority, the user's stored preferences, and
//! the wall-clock time (quiet hours). The category gating is a lookup table
//! rather than per-channel conditionals, so adding a category or channel is
//! a data change.

use chrono::NaiveTime;
use hudur_core::{Category, Channel, Priority};
use hudur_db::models::preferences::NotificationPreferences;

/// Categories each channel is allowed to carry at all.
///
/// SMS is restricted to the high-signal categories; marketing never goes
/// out by text, regardless of the user's global SMS flag.
const CHANNEL_CATEGORIES: &[(Channel, &[Category])] = &[
    (Channel::Email, &Category::ALL),
    (
        Channel::Sms,
        &[Category::Attendance, Category::Leave, Category::System],
    ),
    (Channel::Push, &Category::ALL),
    (Channel::Realtime, &Category::ALL),
];

/// Whether the channel may carry the category at all, independent of any
/// user preference.
pub fn category_allows(channel: Channel, category: Category) -> bool {
    CHANNEL_CATEGORIES
        .iter()
        .find(|(ch, _)| *ch == channel)
        .is_some_and(|(_, categories)| categories.contains(&category))
}

/// Compute the set of channels eligible for one delivery.
///
/// A channel is eligible when all of:
/// - the channel's global preference toggle is on,
/// - the user has the notification's category enabled,
/// - the channel is allowed to carry the category ([`category_allows`]),
/// - the delivery is not suppressed by quiet hours (urgent priority
///   bypasses quiet hours; quiet hours are channel-agnostic).
pub fn eligible_channels(
    prefs: &NotificationPreferences,
    category: Category,
    priority: Priority,
    now: NaiveTime,
) -> Vec<Channel> {
    if priority != Priority::Urgent && prefs.in_quiet_hours(now) {
        return Vec::new();
    }
    if !prefs.category_enabled(category) {
        return Vec::new();
    }

    Channel::ALL
        .into_iter()
        .filter(|&channel| prefs.channel_enabled(channel) && category_allows(channel, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daytime() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn night() -> NaiveTime {
        NaiveTime::from_hms_opt(23, 0, 0).unwrap()
    }

    fn default_prefs() -> NotificationPreferences {
        NotificationPreferences::default_for(uuid::Uuid::new_v4())
    }

    #[test]
    fn default_attendance_goes_to_email_push_realtime() {
        let channels = eligible_channels(
            &default_prefs(),
            Category::Attendance,
            Priority::Normal,
            daytime(),
        );
        assert_eq!(
            channels,
            vec![Channel::Email, Channel::Push, Channel::Realtime]
        );
    }

    #[test]
    fn sms_never_carries_marketing_even_when_globally_enabled() {
        let mut prefs = default_prefs();
        prefs.sms_enabled = true;
        prefs.marketing_enabled = true;

        let channels =
            eligible_channels(&prefs, Category::Marketing, Priority::Normal, daytime());
        assert!(!channels.contains(&Channel::Sms));
        assert!(channels.contains(&Channel::Email));
    }

    #[test]
    fn sms_carries_high_signal_categories_when_enabled() {
        let mut prefs = default_prefs();
        prefs.sms_enabled = true;

        for category in [Category::Attendance, Category::Leave, Category::System] {
            let channels = eligible_channels(&prefs, category, Priority::Normal, daytime());
            assert!(channels.contains(&Channel::Sms), "{category} should allow SMS");
        }
    }

    #[test]
    fn disabled_category_suppresses_every_channel() {
        // Marketing is off by default.
        let channels = eligible_channels(
            &default_prefs(),
            Category::Marketing,
            Priority::Normal,
            daytime(),
        );
        assert!(channels.is_empty());
    }

    #[test]
    fn quiet_hours_suppress_normal_priority() {
        let channels = eligible_channels(
            &default_prefs(),
            Category::Attendance,
            Priority::Normal,
            night(),
        );
        assert!(channels.is_empty());
    }

    #[test]
    fn urgent_priority_bypasses_quiet_hours() {
        let channels = eligible_channels(
            &default_prefs(),
            Category::Attendance,
            Priority::Urgent,
            night(),
        );
        assert!(!channels.is_empty());
    }

    #[test]
    fn disabled_email_toggle_removes_only_email() {
        let mut prefs = default_prefs();
        prefs.email_enabled = false;

        let channels = eligible_channels(&prefs, Category::System, Priority::Normal, daytime());
        assert!(!channels.contains(&Channel::Email));
        assert!(channels.contains(&Channel::Push));
        assert!(channels.contains(&Channel::Realtime));
    }

    #[test]
    fn category_table_covers_every_channel() {
        for channel in Channel::ALL {
            assert!(
                CHANNEL_CATEGORIES.iter().any(|(ch, _)| *ch == channel),
                "{channel} missing from the gating table"
            );
        }
    }
}
