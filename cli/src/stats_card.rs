// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Dashboard cards for statistics results.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use colored::{Color, Colorize};
use medbook_core::{PartialStatisticsResult, StatisticsResult, StatusPercentages};

/// How many specialties get a card of their own.
const TOP_SPECIALTIES: usize = 3;

/// Accent color of a card.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    #[default]
    Primary,
    Success,
    Warning,
    Error,
    Secondary,
}

impl CardColor {
    fn color(self) -> Color {
        match self {
            CardColor::Primary => Color::Blue,
            CardColor::Success => Color::Green,
            CardColor::Warning => Color::Yellow,
            CardColor::Error => Color::Red,
            CardColor::Secondary => Color::Cyan,
        }
    }
}

/// A titled value with an optional subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub color: CardColor,
}

impl StatisticsCard {
    pub fn new(title: impl Into<String>, value: impl ToString) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
            subtitle: None,
            color: CardColor::default(),
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: CardColor) -> Self {
        self.color = color;
        self
    }
}

impl Display for StatisticsCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = "▍".color(self.color.color());
        writeln!(f, "{bar} {}", self.title.dimmed())?;
        write!(f, "{bar} {}", self.value.color(self.color.color()).bold())?;
        if let Some(subtitle) = &self.subtitle {
            write!(f, "\n{bar} {}", subtitle.italic())?;
        }
        Ok(())
    }
}

/// Cards for the full dashboard.
pub fn general_cards(stats: &StatisticsResult) -> Vec<StatisticsCard> {
    let mut cards = vec![StatisticsCard::new("Appointments", stats.total_appointments)];
    cards.extend(status_cards(
        stats.confirmed_appointments,
        stats.pending_appointments,
        stats.cancelled_appointments,
        stats.unrecognized_appointments,
        &stats.status_percentages,
    ));

    cards.push(
        StatisticsCard::new("Patients", stats.total_patients)
            .with_subtitle(format!("{} registered", stats.registered_patients))
            .with_color(CardColor::Secondary),
    );
    cards.push(
        StatisticsCard::new("Doctors", stats.total_doctors)
            .with_subtitle(format!("{} registered", stats.registered_doctors))
            .with_color(CardColor::Secondary),
    );

    cards.extend(specialty_cards(&stats.specialties, stats.total_appointments));
    cards
}

/// Cards for a doctor's or a patient's dashboard.
pub fn partial_cards(stats: &PartialStatisticsResult) -> Vec<StatisticsCard> {
    let mut cards = vec![StatisticsCard::new("Appointments", stats.total_appointments)];
    cards.extend(status_cards(
        stats.confirmed_appointments,
        stats.pending_appointments,
        stats.cancelled_appointments,
        stats.unrecognized_appointments,
        &stats.status_percentages,
    ));

    if let Some(patients) = stats.total_patients {
        cards.push(StatisticsCard::new("Patients", patients).with_color(CardColor::Secondary));
    }
    if let Some(doctors) = stats.total_doctors {
        cards.push(StatisticsCard::new("Doctors", doctors).with_color(CardColor::Secondary));
    }

    cards.extend(specialty_cards(&stats.specialties, stats.total_appointments));
    cards
}

/// One card per month, oldest first.
pub fn month_cards(months: &BTreeMap<String, usize>) -> Vec<StatisticsCard> {
    let mut entries: Vec<_> = months.iter().collect();
    // keys are `MM/YYYY`
    entries.sort_by_key(|(key, _)| {
        let (month, year) = key.split_once('/').unwrap_or((key.as_str(), ""));
        (year.to_string(), month.to_string())
    });

    entries
        .into_iter()
        .map(|(month, count)| StatisticsCard::new(month.clone(), count))
        .collect()
}

/// Renders cards separated by blank lines.
pub fn render_cards(cards: &[StatisticsCard]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn status_cards(
    confirmed: usize,
    pending: usize,
    cancelled: usize,
    unrecognized: usize,
    percentages: &StatusPercentages,
) -> Vec<StatisticsCard> {
    let mut cards = vec![
        StatisticsCard::new("Confirmed", confirmed)
            .with_subtitle(percent_of_total(percentages.confirmed))
            .with_color(CardColor::Success),
        StatisticsCard::new("Pending", pending)
            .with_subtitle(percent_of_total(percentages.pending))
            .with_color(CardColor::Warning),
        StatisticsCard::new("Cancelled", cancelled)
            .with_subtitle(percent_of_total(percentages.cancelled))
            .with_color(CardColor::Error),
    ];
    if unrecognized > 0 {
        cards.push(
            StatisticsCard::new("Other status", unrecognized)
                .with_subtitle("counted in the total only"),
        );
    }
    cards
}

fn specialty_cards(specialties: &BTreeMap<String, usize>, total: usize) -> Vec<StatisticsCard> {
    let mut ranked: Vec<_> = specialties.iter().collect();
    // stable: ties keep alphabetical order
    ranked.sort_by(|a, b| b.1.cmp(a.1));

    ranked
        .into_iter()
        .take(TOP_SPECIALTIES)
        .map(|(name, count)| {
            #[allow(clippy::cast_precision_loss)]
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64 * 100.0
            };
            StatisticsCard::new(name.clone(), count)
                .with_subtitle(percent_of_total(share))
                .with_color(CardColor::Primary)
        })
        .collect()
}

fn percent_of_total(percent: f64) -> String {
    format!("{percent:.1}% of total")
}
