//! Score presentation shared by the API response and every export format.

use serde::Serialize;

use crate::normalize::{ScoreBreakdown, SubScore};

/// Converts a `0.0..=1.0` score into an integer percentage, rounding half up.
///
/// The scaled value is snapped to six decimals first so binary noise such as
/// `0.595 * 100.0 == 59.49999999999999` still rounds to 60.
pub fn percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    let scaled = (score * 100.0 * 1e6).round() / 1e6;
    (scaled + 0.5).floor().clamp(0.0, 100.0) as u32
}

/// Overall verdict for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchLabel {
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Poor Match")]
    Poor,
}

impl MatchLabel {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            p if p >= 80 => MatchLabel::Excellent,
            p if p >= 60 => MatchLabel::Good,
            _ => MatchLabel::Poor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchLabel::Excellent => "Excellent Match",
            MatchLabel::Good => "Good Match",
            MatchLabel::Poor => "Poor Match",
        }
    }

    /// Badge variant the UI colors the verdict with.
    pub fn badge(self) -> &'static str {
        match self {
            MatchLabel::Excellent => "default",
            MatchLabel::Good => "secondary",
            MatchLabel::Poor => "destructive",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            MatchLabel::Excellent => {
                "This candidate is an excellent fit for the position and should be prioritized for interview."
            }
            MatchLabel::Good => {
                "This candidate shows good potential and may be worth considering with additional evaluation."
            }
            MatchLabel::Poor => {
                "This candidate may not be the best fit for this specific role, but could be suitable for other positions."
            }
        }
    }
}

/// Grade of a single sub-score card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            p if p >= 70 => Grade::Good,
            p if p >= 50 => Grade::Fair,
            _ => Grade::Poor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubScoreView {
    pub key: SubScore,
    pub name: &'static str,
    pub percent: u32,
    pub grade: Grade,
}

/// Display-ready scores: integer percentages plus the derived labels.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub overall_percent: u32,
    pub label: MatchLabel,
    pub badge: &'static str,
    pub recommendation: &'static str,
    pub sub_scores: Vec<SubScoreView>,
}

impl From<&ScoreBreakdown> for ScoreView {
    fn from(score: &ScoreBreakdown) -> Self {
        let overall_percent = percent(score.overall);
        let label = MatchLabel::from_percent(overall_percent);
        ScoreView {
            overall_percent,
            label,
            badge: label.badge(),
            recommendation: label.recommendation(),
            sub_scores: SubScore::ALL
                .iter()
                .map(|&key| {
                    let percent = percent(score.get(key));
                    SubScoreView {
                        key,
                        name: key.label(),
                        percent,
                        grade: Grade::from_percent(percent),
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(0.595), 60);
        assert_eq!(percent(0.005), 1);
        assert_eq!(percent(0.594), 59);
    }

    #[test]
    fn test_percent_common_values() {
        assert_eq!(percent(0.82), 82);
        assert_eq!(percent(0.9), 90);
        assert_eq!(percent(0.7), 70);
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn test_percent_clamps_out_of_range() {
        assert_eq!(percent(1.7), 100);
        assert_eq!(percent(-0.2), 0);
        assert_eq!(percent(f64::NAN), 0);
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(MatchLabel::from_percent(79), MatchLabel::Good);
        assert_eq!(MatchLabel::from_percent(80), MatchLabel::Excellent);
        assert_eq!(MatchLabel::from_percent(59), MatchLabel::Poor);
        assert_eq!(MatchLabel::from_percent(60), MatchLabel::Good);
        assert_eq!(MatchLabel::from_percent(79).as_str(), "Good Match");
        assert_eq!(MatchLabel::from_percent(80).as_str(), "Excellent Match");
    }

    #[test]
    fn test_label_from_score_uses_rounding() {
        assert_eq!(MatchLabel::from_percent(percent(0.795)), MatchLabel::Excellent);
        assert_eq!(MatchLabel::from_percent(percent(0.5949)), MatchLabel::Poor);
    }

    #[test]
    fn test_label_serializes_as_text() {
        assert_eq!(
            serde_json::to_string(&MatchLabel::Excellent).unwrap(),
            r#""Excellent Match""#
        );
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_percent(70), Grade::Good);
        assert_eq!(Grade::from_percent(69), Grade::Fair);
        assert_eq!(Grade::from_percent(50), Grade::Fair);
        assert_eq!(Grade::from_percent(49), Grade::Poor);
    }

    #[test]
    fn test_score_view() {
        let view = ScoreView::from(&ScoreBreakdown {
            overall: 0.82,
            skills: 0.9,
            experience: 0.7,
            ..Default::default()
        });
        assert_eq!(view.overall_percent, 82);
        assert_eq!(view.label, MatchLabel::Excellent);
        let percents: Vec<u32> = view.sub_scores.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![90, 70, 0, 0]);
        assert_eq!(view.sub_scores[0].grade, Grade::Good);
        assert_eq!(view.sub_scores[2].grade, Grade::Poor);
    }
}
