//! Spoken and card text for meal answers

use crate::meals::{DayMeals, MealName, MealRecord};
use crate::parser::{Classification, Direction};
use chrono::{DateTime, NaiveDate, Timelike};
use chrono_tz::Tz;

/// Text for one answer: what is said and what is shown on the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub speech: String,
    pub card: String,
}

impl Rendered {
    /// Same text spoken and shown
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { card: text.clone(), speech: text }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_unrecognized(phrase: &str) -> Rendered {
    Rendered::plain(format!("I could not understand {}.", phrase.trim()))
}

/// Answer for a description search. `found` carries the record and its day term.
pub fn render_description(
    classification: &Classification,
    found: Option<(&MealRecord, &str)>,
) -> Rendered {
    let Some((record, day)) = found else {
        return Rendered::plain(match classification.direction {
            Direction::Past => {
                format!("I could not find a time you had {}.", classification.description)
            }
            Direction::Future => {
                format!("I could not find {} planned in the future.", classification.description)
            }
        });
    };

    let sentence = |description: &str| match classification.direction {
        Direction::Past => format!("You last had {} {}.", description, day),
        Direction::Future => format!("You will have {} {}.", description, day),
    };
    Rendered {
        speech: sentence(record.spoken_description()),
        card: sentence(record.description.trim()),
    }
}

/// Whether a by-date answer should be phrased in the future tense.
///
/// Dates after today are future and dates before are past. For today, a meal
/// whose cutoff hour has passed is treated as already eaten.
pub fn is_future_date(now: &DateTime<Tz>, date: NaiveDate, meal: Option<MealName>) -> bool {
    let today = now.date_naive();
    if date != today {
        return date > today;
    }
    match meal.and_then(MealName::cutoff_hour) {
        Some(cutoff) => now.hour() <= cutoff,
        None => true,
    }
}

/// Answer for a by-date lookup of one meal, or of the whole day when `meal` is `None`
pub fn render_day_meals(
    meal: Option<MealName>,
    day: &str,
    is_future: bool,
    meals: &DayMeals,
) -> Rendered {
    let text = match meal {
        Some(meal) => match meals.get(meal) {
            Some(food) if is_future => format!("{} {} will include {}.", meal, day, food),
            Some(food) => format!("{} {} included {}.", meal, day, food),
            None if is_future => format!("{} {} is not planned.", meal, day),
            None => format!("{} {} was not planned.", meal, day),
        },
        None => {
            let planned: Vec<String> = meals
                .planned()
                .into_iter()
                .map(|(name, food)| format!("{}: {}.", name, food))
                .collect();
            let planned = planned.join("  ");
            match (planned.is_empty(), is_future) {
                (true, true) => format!("Meals {} are not planned.", day),
                (true, false) => format!("Meals {} were not planned.", day),
                (false, true) => format!("Meals {} will be as follows: {}", day, planned),
                (false, false) => format!("Meals {} were as follows: {}", day, planned),
            }
        }
    };
    Rendered::plain(capitalize(&text))
}
