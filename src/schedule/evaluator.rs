// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure evaluation of what the rules currently want.
//!
//! Nothing here touches the network or the clock: callers supply "now"
//! as a [`ClockTime`] already projected into the controller's timezone.
//! The results are only ever used to decide whether a manual action
//! agrees with the rules; executing rules at their scheduled minute is
//! the controller's job, not the client's.

use crate::schedule::Rule;
use crate::types::{Brightness, ClockTime};

/// Minutes in a day.
const MINUTES_PER_DAY: u16 = 24 * 60;

/// Returns `true` if `now` falls inside the rule time window.
///
/// Three cases:
///
/// - `end` is `None`: the rule fires at a single minute, so only
///   `now == start` matches.
/// - `end > start`: a same-day range `[start, end)`.
/// - `end <= start`: the range wraps midnight; a minute matches when it
///   is at or after `start` **or** before `end`.
///
/// # Examples
///
/// ```
/// use gardor_lib::schedule::in_range;
/// use gardor_lib::types::ClockTime;
///
/// let t = |s: &str| s.parse::<ClockTime>().unwrap();
///
/// assert!(in_range(t("09:15"), t("08:00"), Some(t("10:00"))));
/// assert!(in_range(t("23:30"), t("22:00"), Some(t("06:00"))));
/// assert!(!in_range(t("12:00"), t("22:00"), Some(t("06:00"))));
/// assert!(in_range(t("08:00"), t("08:00"), None));
/// assert!(!in_range(t("08:01"), t("08:00"), None));
/// ```
#[must_use]
pub fn in_range(now: ClockTime, start: ClockTime, end: Option<ClockTime>) -> bool {
    let Some(end) = end else {
        return now == start;
    };
    let now = now.minutes_since_midnight();
    let start = start.minutes_since_midnight();
    let end = end.minutes_since_midnight();
    if end > start {
        now >= start && now < end
    } else {
        // Wraps midnight, e.g. 22:00-06:00.
        now >= start || now < end
    }
}

/// Computes the brightness the light rules currently imply.
///
/// Only enabled, non-individually-paused light rules whose window
/// contains `now` participate. When several match, the **maximum**
/// brightness wins; the tie-break is by value, so the result does not
/// depend on rule order.
///
/// `None` means no rule matches at all, which is not the same as
/// `Some(Brightness::MIN)`: a matching 0% rule is a definite "off",
/// while no match leaves the light in manual territory.
#[must_use]
pub fn effective_brightness(rules: &[Rule], now: ClockTime) -> Option<Brightness> {
    rules
        .iter()
        .filter(|rule| rule.is_effective())
        .filter_map(|rule| match rule {
            Rule::Light(light) if in_range(now, light.start_time, light.end_time) => {
                Some(light.brightness)
            }
            _ => None,
        })
        .max()
}

/// Returns `true` if a manual light action disagrees with the rules.
///
/// There is only a conflict when the rules have a definite answer and
/// the user wants the opposite on-ness: pressing "on" while the matching
/// rules say 0%, or "off" while they say more than 0%. No matching rule
/// means no conflict.
#[must_use]
pub fn light_conflict(rules: &[Rule], now: ClockTime, wants_on: bool) -> bool {
    effective_brightness(rules, now).is_some_and(|brightness| !brightness.is_off() != wants_on)
}

/// Returns `true` if some pump rule's watering window contains `now`.
///
/// A pump rule runs over `[time, time + duration_minutes)`, wrapping
/// midnight like light ranges do. This is display-level information; it
/// does not gate manual pump actions.
#[must_use]
pub fn pump_scheduled(rules: &[Rule], now: ClockTime) -> bool {
    rules
        .iter()
        .filter(|rule| rule.is_effective())
        .any(|rule| match rule {
            Rule::Pump(pump) => {
                let duration = pump.duration_minutes.get();
                if duration >= MINUTES_PER_DAY {
                    return true;
                }
                let start = pump.time.minutes_since_midnight();
                let end = ClockTime::from_minutes((start + duration) % MINUTES_PER_DAY)
                    .unwrap_or(ClockTime::MIDNIGHT);
                in_range(now, pump.time, Some(end))
            }
            Rule::Light(_) => false,
        })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU16;

    use uuid::Uuid;

    use super::*;
    use crate::schedule::{LightRule, PumpRule, RuleId};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn light_rule(start: &str, end: Option<&str>, brightness: u8) -> Rule {
        Rule::Light(LightRule {
            id: RuleId::from(Uuid::new_v4()),
            start_time: t(start),
            end_time: end.map(t),
            brightness: Brightness::new(brightness).unwrap(),
            enabled: true,
            paused: false,
        })
    }

    fn pump_rule(time: &str, duration: u16) -> Rule {
        Rule::Pump(PumpRule {
            id: RuleId::from(Uuid::new_v4()),
            time: t(time),
            duration_minutes: NonZeroU16::new(duration).unwrap(),
            enabled: true,
            paused: false,
        })
    }

    // ------------------------------------------------------------------
    // in_range
    // ------------------------------------------------------------------

    #[test]
    fn same_day_range_is_half_open() {
        assert!(in_range(t("08:00"), t("08:00"), Some(t("10:00"))));
        assert!(in_range(t("09:59"), t("08:00"), Some(t("10:00"))));
        assert!(!in_range(t("10:00"), t("08:00"), Some(t("10:00"))));
        assert!(!in_range(t("07:59"), t("08:00"), Some(t("10:00"))));
    }

    #[test]
    fn wrapping_range_covers_both_sides_of_midnight() {
        assert!(in_range(t("23:30"), t("22:00"), Some(t("06:00"))));
        assert!(in_range(t("00:00"), t("22:00"), Some(t("06:00"))));
        assert!(in_range(t("05:59"), t("22:00"), Some(t("06:00"))));
        assert!(!in_range(t("06:00"), t("22:00"), Some(t("06:00"))));
        assert!(!in_range(t("12:00"), t("22:00"), Some(t("06:00"))));
        assert!(!in_range(t("21:59"), t("22:00"), Some(t("06:00"))));
    }

    #[test]
    fn equal_start_and_end_wraps_the_whole_day() {
        // end <= start is the wrap case; equal endpoints cover every minute.
        assert!(in_range(t("00:00"), t("09:00"), Some(t("09:00"))));
        assert!(in_range(t("09:00"), t("09:00"), Some(t("09:00"))));
        assert!(in_range(t("17:45"), t("09:00"), Some(t("09:00"))));
    }

    #[test]
    fn open_ended_rule_matches_only_its_minute() {
        assert!(in_range(t("08:00"), t("08:00"), None));
        assert!(!in_range(t("08:01"), t("08:00"), None));
        assert!(!in_range(t("07:59"), t("08:00"), None));
    }

    // ------------------------------------------------------------------
    // effective_brightness
    // ------------------------------------------------------------------

    #[test]
    fn maximum_brightness_wins_among_overlapping_rules() {
        let rules = vec![
            light_rule("08:00", Some("10:00"), 40),
            light_rule("09:00", Some("09:30"), 80),
        ];
        assert_eq!(
            effective_brightness(&rules, t("09:15")),
            Some(Brightness::new(80).unwrap())
        );
        assert_eq!(
            effective_brightness(&rules, t("09:45")),
            Some(Brightness::new(40).unwrap())
        );
    }

    #[test]
    fn max_is_by_value_not_rule_order() {
        let a = vec![
            light_rule("08:00", Some("10:00"), 80),
            light_rule("08:00", Some("10:00"), 40),
        ];
        let b = vec![
            light_rule("08:00", Some("10:00"), 40),
            light_rule("08:00", Some("10:00"), 80),
        ];
        assert_eq!(effective_brightness(&a, t("09:00")), effective_brightness(&b, t("09:00")));
    }

    #[test]
    fn no_match_is_distinct_from_zero() {
        let rules = vec![light_rule("22:00", Some("23:00"), 0)];
        assert_eq!(
            effective_brightness(&rules, t("22:30")),
            Some(Brightness::MIN)
        );
        assert_eq!(effective_brightness(&rules, t("12:00")), None);
    }

    #[test]
    fn disabled_and_paused_rules_are_ignored() {
        let mut rules = vec![light_rule("08:00", Some("10:00"), 80)];
        let Rule::Light(light) = &mut rules[0] else {
            unreachable!()
        };
        light.enabled = false;
        assert_eq!(effective_brightness(&rules, t("09:00")), None);

        let Rule::Light(light) = &mut rules[0] else {
            unreachable!()
        };
        light.enabled = true;
        light.paused = true;
        assert_eq!(effective_brightness(&rules, t("09:00")), None);
    }

    #[test]
    fn pump_rules_never_contribute_brightness() {
        let rules = vec![pump_rule("08:00", 60)];
        assert_eq!(effective_brightness(&rules, t("08:30")), None);
    }

    // ------------------------------------------------------------------
    // light_conflict
    // ------------------------------------------------------------------

    #[test]
    fn on_conflicts_with_matching_zero_rule() {
        let rules = vec![light_rule("22:00", Some("06:00"), 0)];
        assert!(light_conflict(&rules, t("23:00"), true));
        assert!(!light_conflict(&rules, t("23:00"), false));
    }

    #[test]
    fn off_conflicts_with_matching_bright_rule() {
        let rules = vec![light_rule("08:00", Some("20:00"), 60)];
        assert!(light_conflict(&rules, t("12:00"), false));
        assert!(!light_conflict(&rules, t("12:00"), true));
    }

    #[test]
    fn no_matching_rule_never_conflicts() {
        let rules = vec![light_rule("08:00", Some("10:00"), 60)];
        assert!(!light_conflict(&rules, t("15:00"), true));
        assert!(!light_conflict(&rules, t("15:00"), false));
    }

    // ------------------------------------------------------------------
    // pump_scheduled
    // ------------------------------------------------------------------

    #[test]
    fn pump_window_is_time_plus_duration() {
        let rules = vec![pump_rule("07:30", 10)];
        assert!(pump_scheduled(&rules, t("07:30")));
        assert!(pump_scheduled(&rules, t("07:39")));
        assert!(!pump_scheduled(&rules, t("07:40")));
        assert!(!pump_scheduled(&rules, t("07:29")));
    }

    #[test]
    fn pump_window_wraps_midnight() {
        let rules = vec![pump_rule("23:55", 10)];
        assert!(pump_scheduled(&rules, t("23:58")));
        assert!(pump_scheduled(&rules, t("00:04")));
        assert!(!pump_scheduled(&rules, t("00:05")));
    }

    #[test]
    fn paused_pump_rule_is_not_scheduled() {
        let mut rules = vec![pump_rule("07:30", 10)];
        let Rule::Pump(pump) = &mut rules[0] else {
            unreachable!()
        };
        pump.paused = true;
        assert!(!pump_scheduled(&rules, t("07:35")));
    }
}
