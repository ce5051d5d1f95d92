//! Inferring whether dates in an export start with the day or the month.
//!
//! Each check looks at every date of the document at once and either settles
//! the question or leaves it [`DateOrder::Unknown`] for the next check.

use std::collections::BTreeMap;

use tracing::debug;

use crate::datetime::DateToken;

/// Outcome of a day/month order check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    /// No evidence either way.
    #[default]
    Unknown,
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    /// `Some(true)` for day first, `Some(false)` for month first.
    pub const fn days_first(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::DayFirst => Some(true),
            Self::MonthFirst => Some(false),
        }
    }

    const fn from_evidence(day_first: bool, month_first: bool) -> Self {
        if day_first {
            Self::DayFirst
        } else if month_first {
            Self::MonthFirst
        } else {
            Self::Unknown
        }
    }
}

/// A value above `12` cannot be a month.
///
/// Checked on the first component before the second.
pub fn check_above_12(dates: &[DateToken]) -> DateOrder {
    DateOrder::from_evidence(
        dates.iter().any(|d| d.first > 12),
        dates.iter().any(|d| d.second > 12),
    )
}

/// Within a single year months never go down, so the component that
/// decreases at some point is probably the day.
pub fn check_decreasing(dates: &[DateToken]) -> DateOrder {
    let mut by_year: BTreeMap<u32, Vec<&DateToken>> = BTreeMap::new();
    for date in dates {
        by_year.entry(date.year).or_default().push(date);
    }

    let decreases = |component: fn(&DateToken) -> u32| {
        by_year
            .values()
            .any(|dates| dates.windows(2).any(|w| component(w[1]) < component(w[0])))
    };

    DateOrder::from_evidence(decreases(|d| d.first), decreases(|d| d.second))
}

/// Days change more often than months, so the component with the larger total
/// movement across the document is probably the day.
pub fn change_frequency_analysis(dates: &[DateToken]) -> DateOrder {
    if dates.len() < 2 {
        return DateOrder::Unknown;
    }

    let (first, second) = dates.windows(2).fold((0u64, 0u64), |(first, second), w| {
        (
            first + u64::from(w[1].first.abs_diff(w[0].first)),
            second + u64::from(w[1].second.abs_diff(w[0].second)),
        )
    });

    match first.cmp(&second) {
        std::cmp::Ordering::Greater => DateOrder::DayFirst,
        std::cmp::Ordering::Less => DateOrder::MonthFirst,
        std::cmp::Ordering::Equal => DateOrder::Unknown,
    }
}

/// The checks, in order of how conclusive they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Above12,
    Decreasing,
    ChangeFrequency,
}

impl Check {
    pub const ALL: [Self; 3] = [Self::Above12, Self::Decreasing, Self::ChangeFrequency];

    pub fn run(self, dates: &[DateToken]) -> DateOrder {
        match self {
            Self::Above12 => check_above_12(dates),
            Self::Decreasing => check_decreasing(dates),
            Self::ChangeFrequency => change_frequency_analysis(dates),
        }
    }
}

/// Returns the first check that settles the order, with its outcome.
pub fn settled_by(dates: &[DateToken]) -> Option<(Check, DateOrder)> {
    Check::ALL
        .into_iter()
        .map(|check| (check, check.run(dates)))
        .find(|(_, order)| *order != DateOrder::Unknown)
}

/// Runs the checks in order and returns the first settled outcome.
pub fn days_before_months(dates: &[DateToken]) -> DateOrder {
    match settled_by(dates) {
        Some((check, order)) => {
            debug!(?check, ?order, dates = dates.len(), "date order settled");
            order
        }
        None => {
            debug!(dates = dates.len(), "no check settled the date order");
            DateOrder::Unknown
        }
    }
}
