//! Presentation rules: which mention and color an incident gets.
//!
//! Rules are evaluated in order and the first match wins. A `[DANGER]`
//! condition therefore stays red even after the incident closes.

use crate::incident::Incident;

/// Condition-name prefix that escalates an incident.
pub const DANGER_MARKER: &str = "[DANGER]";

/// Alert levels and their attachment colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Escalated condition
    Danger,
    /// Open incident, default level
    Warn,
    /// Incident resolved
    Health,
}

impl AlertLevel {
    /// Get the Slack attachment color for this level.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Danger => "#fc2f2f", // Red
            Self::Warn => "#ffcc14",   // Yellow
            Self::Health => "#27d871", // Green
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warn => "warn",
            Self::Health => "health",
        }
    }
}

/// Which channel members get notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mention {
    /// Active members only
    Here,
    /// Everyone in the channel
    Channel,
}

impl Mention {
    /// Slack markup for this mention.
    #[must_use]
    pub const fn markup(&self) -> &'static str {
        match self {
            Self::Here => "<!here>",
            Self::Channel => "<!channel>",
        }
    }
}

/// Resolved presentation for one incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub level: AlertLevel,
    pub mention: Mention,
}

impl Presentation {
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.level.color()
    }
}

/// A single presentation rule.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Incident) -> bool,
    pub presentation: Presentation,
}

/// Rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "danger",
        matches: is_danger,
        presentation: Presentation {
            level: AlertLevel::Danger,
            mention: Mention::Channel,
        },
    },
    Rule {
        name: "resolved",
        matches: Incident::is_closed,
        presentation: Presentation {
            level: AlertLevel::Health,
            mention: Mention::Here,
        },
    },
];

/// Used when no rule matches.
pub const DEFAULT_PRESENTATION: Presentation = Presentation {
    level: AlertLevel::Warn,
    mention: Mention::Here,
};

fn is_danger(incident: &Incident) -> bool {
    incident.condition_name.starts_with(DANGER_MARKER)
}

/// Return the first matching rule, if any.
#[must_use]
pub fn matching_rule(incident: &Incident) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(incident))
}

/// Resolve the presentation for an incident.
#[must_use]
pub fn present(incident: &Incident) -> Presentation {
    matching_rule(incident).map_or(DEFAULT_PRESENTATION, |rule| rule.presentation)
}
