//! Aggregate figures over a set of survey responses.

use crate::dto::{LocationStats, SurveyResponseDto, SurveySummary};
use crate::service::validation::round_to_tenth;
use std::collections::BTreeMap;

/// Derived satisfaction for a whole response, from how many of its six
/// categorical ratings are positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SatisfactionLevel {
    HighlySatisfied,
    Satisfied,
    Neutral,
    Dissatisfied,
    HighlyDissatisfied,
}

impl SatisfactionLevel {
    pub const ALL: [SatisfactionLevel; 5] = [
        SatisfactionLevel::HighlySatisfied,
        SatisfactionLevel::Satisfied,
        SatisfactionLevel::Neutral,
        SatisfactionLevel::Dissatisfied,
        SatisfactionLevel::HighlyDissatisfied,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SatisfactionLevel::HighlySatisfied => "Highly Satisfied",
            SatisfactionLevel::Satisfied => "Satisfied",
            SatisfactionLevel::Neutral => "Neutral",
            SatisfactionLevel::Dissatisfied => "Dissatisfied",
            SatisfactionLevel::HighlyDissatisfied => "Highly Dissatisfied",
        }
    }

    pub fn from_positive_count(positive: usize) -> Self {
        match positive {
            n if n >= 4 => SatisfactionLevel::HighlySatisfied,
            3 => SatisfactionLevel::Satisfied,
            2 => SatisfactionLevel::Neutral,
            1 => SatisfactionLevel::Dissatisfied,
            _ => SatisfactionLevel::HighlyDissatisfied,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, SatisfactionLevel::HighlySatisfied | SatisfactionLevel::Satisfied)
    }
}

fn is_positive_answer(answer: &str) -> bool {
    answer == SatisfactionLevel::HighlySatisfied.label() || answer == SatisfactionLevel::Satisfied.label()
}

fn categories(r: &SurveyResponseDto) -> [(&'static str, &str); 6] {
    [
        ("foodQuality", r.food_quality.as_str()),
        ("serviceSpeed", r.service_speed.as_str()),
        ("staffFriendliness", r.staff_friendliness.as_str()),
        ("cleanliness", r.cleanliness.as_str()),
        ("valueForMoney", r.value_for_money.as_str()),
        ("ambiance", r.ambiance.as_str()),
    ]
}

pub fn satisfaction_level(r: &SurveyResponseDto) -> SatisfactionLevel {
    let positive = categories(r)
        .iter()
        .filter(|(_, answer)| is_positive_answer(answer))
        .count();
    SatisfactionLevel::from_positive_count(positive)
}

pub fn summarize(responses: &[SurveyResponseDto]) -> SurveySummary {
    let mut overall_satisfaction: BTreeMap<String, u64> = SatisfactionLevel::ALL
        .iter()
        .map(|l| (l.label().to_string(), 0))
        .collect();
    let mut attributes: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    let mut by_location: BTreeMap<String, (u64, f64)> = BTreeMap::new();
    let mut positive = 0u64;
    let mut rating_total = 0.0;

    for r in responses {
        let level = satisfaction_level(r);
        *overall_satisfaction.entry(level.label().to_string()).or_default() += 1;
        if level.is_positive() {
            positive += 1;
        }
        for (category, answer) in categories(r) {
            *attributes
                .entry(category.to_string())
                .or_default()
                .entry(answer.to_string())
                .or_default() += 1;
        }
        let entry = by_location.entry(r.location.clone()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.overall_rating;
        rating_total += r.overall_rating;
    }

    let total = responses.len() as u64;
    SurveySummary {
        total_responses: total,
        average_rating: mean(rating_total, total),
        satisfaction_rate: percentage(positive, total),
        overall_satisfaction,
        attributes,
        locations: by_location
            .into_iter()
            .map(|(location, (count, sum))| {
                (
                    location,
                    LocationStats {
                        responses: count,
                        average_rating: mean(sum, count),
                    },
                )
            })
            .collect(),
    }
}

fn mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        round_to_tenth(sum / count as f64)
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round_to_tenth(part as f64 * 100.0 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(location: &str, answers: [&str; 6], rating: f64) -> SurveyResponseDto {
        SurveyResponseDto {
            id: 1,
            customer_id: 1,
            customer_name: "Ada".into(),
            visit_date: "2024-05-01".into(),
            location: location.into(),
            food_quality: answers[0].into(),
            service_speed: answers[1].into(),
            staff_friendliness: answers[2].into(),
            cleanliness: answers[3].into(),
            value_for_money: answers[4].into(),
            ambiance: answers[5].into(),
            overall_rating: rating,
            comments: None,
            created_at: "2024-05-01T10:00:00".into(),
        }
    }

    const HS: &str = "Highly Satisfied";
    const S: &str = "Satisfied";
    const N: &str = "Neutral";
    const D: &str = "Dissatisfied";

    #[test]
    fn level_follows_positive_count() {
        assert_eq!(satisfaction_level(&response("x", [HS, S, S, S, N, D], 4.0)), SatisfactionLevel::HighlySatisfied);
        assert_eq!(satisfaction_level(&response("x", [HS, S, S, N, N, D], 4.0)), SatisfactionLevel::Satisfied);
        assert_eq!(satisfaction_level(&response("x", [HS, S, N, N, N, D], 4.0)), SatisfactionLevel::Neutral);
        assert_eq!(satisfaction_level(&response("x", [S, N, N, N, N, D], 4.0)), SatisfactionLevel::Dissatisfied);
        assert_eq!(satisfaction_level(&response("x", [N, N, N, D, D, D], 4.0)), SatisfactionLevel::HighlyDissatisfied);
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let s = summarize(&[]);
        assert_eq!(s.total_responses, 0);
        assert_eq!(s.average_rating, 0.0);
        assert_eq!(s.satisfaction_rate, 0.0);
        assert_eq!(s.overall_satisfaction.len(), 5);
        assert!(s.overall_satisfaction.values().all(|v| *v == 0));
        assert!(s.attributes.is_empty());
        assert!(s.locations.is_empty());
    }

    #[test]
    fn aggregates_ratings_levels_and_locations() {
        let rows = vec![
            response("Downtown", [HS, HS, S, S, N, N], 5.0),
            response("Downtown", [N, N, N, D, D, D], 2.0),
            response("Uptown", [S, S, S, N, N, N], 4.5),
        ];
        let s = summarize(&rows);

        assert_eq!(s.total_responses, 3);
        assert_eq!(s.average_rating, 3.8);
        assert_eq!(s.satisfaction_rate, 66.7);
        assert_eq!(s.overall_satisfaction["Highly Satisfied"], 1);
        assert_eq!(s.overall_satisfaction["Satisfied"], 1);
        assert_eq!(s.overall_satisfaction["Highly Dissatisfied"], 1);
        assert_eq!(s.overall_satisfaction["Neutral"], 0);

        assert_eq!(s.attributes["foodQuality"][HS], 1);
        assert_eq!(s.attributes["foodQuality"][N], 1);
        assert_eq!(s.attributes["foodQuality"][S], 1);
        assert_eq!(s.attributes["ambiance"][N], 2);

        assert_eq!(
            s.locations["Downtown"],
            LocationStats {
                responses: 2,
                average_rating: 3.5
            }
        );
        assert_eq!(s.locations["Uptown"].average_rating, 4.5);
    }
}
