use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Asia::Tokyo;
use mealsmenu::day_term::{day_term, day_term_for_date};
use mealsmenu::parser::{match_prefix, trim_suffixes, Grammar, MatchResult, Template};
use mealsmenu::{classify, Classification, Direction};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn past(description: &str) -> Option<Classification> {
    Some(Classification { description: description.to_string(), direction: Direction::Past })
}

fn future(description: &str) -> Option<Classification> {
    Some(Classification { description: description.to_string(), direction: Direction::Future })
}

#[test_case("what did we have for dinner last night", past("for dinner"); "dinner last night")]
#[test_case("When did I eat Chicken Curry", past("chicken curry"); "mixed case")]
#[test_case("what day was the last time we ate pot roast", past("pot roast"); "last time template")]
#[test_case("when are we having pancakes again", future("pancakes"); "future with filler")]
#[test_case("are you going to make soup tonight", future("soup"); "future tonight")]
#[test_case("did we have", past(""); "empty description")]
#[test_case("tell me a joke", None; "unrelated")]
#[test_case("", None; "empty phrase")]
fn test_end_to_end_classification(phrase: &str, expected: Option<Classification>) {
    assert_eq!(classify(phrase), expected);
}

#[test]
fn test_first_matching_grammar_wins() {
    // Both templates accept the phrase; the first one decides
    let first = Template::from_words("first", &[&["", "when"], &["we"]]).unwrap();
    let second = Template::from_words("second", &[&["when"], &["we"], &["", "have"]]).unwrap();
    let grammar = Grammar::new(vec![(first, Direction::Past), (second, Direction::Future)], &[]);
    assert_eq!(grammar.classify("when we have stew"), past("have stew"));
}

#[test]
fn test_custom_trim_order() {
    let grammar = Grammar::new(
        vec![(Template::from_words("any", &[&[""]]).unwrap(), Direction::Future)],
        &["again", "next"],
    );
    assert_eq!(grammar.classify("ramen next again"), future("ramen"));
    assert_eq!(trim_suffixes("ramen again next", &["again", "next"]), "ramen again");
}

#[test]
fn test_literal_prefix_matching() {
    let template = Template::from_words("when", &[&["when"]]).unwrap();
    // Matching is by characters, not words
    assert_eq!(match_prefix("whenever", &template), MatchResult::Matched("ever".into()));
}

#[test]
fn test_day_terms_follow_reference_zone() {
    let now = Los_Angeles.with_ymd_and_hms(2026, 10, 16, 22, 0, 0).unwrap();
    // 14:00 on the 17th in Tokyo is still the 16th in Los Angeles
    let target = Tokyo.with_ymd_and_hms(2026, 10, 17, 14, 0, 0).unwrap();
    assert_eq!(day_term(&now, &target), "today");

    let next_week =
        Utc.with_ymd_and_hms(2026, 10, 20, 19, 0, 0).unwrap().with_timezone(&Los_Angeles);
    assert_eq!(day_term(&now, &next_week), "in 4 days, on Tuesday, October 20th");

    let yesterday = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    assert_eq!(day_term_for_date(&now, yesterday), "yesterday");
}
