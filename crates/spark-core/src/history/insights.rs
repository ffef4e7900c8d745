//! Natural-language insights derived from window statistics. Deterministic; no I/O.

use super::{EmotionShare, Stability, TrendBucket};

pub const MAX_INSIGHTS: usize = 4;
/// Below this many entries only the onboarding hint is given.
const MIN_ENTRIES_FOR_INSIGHTS: usize = 3;
const TREND_DELTA_THRESHOLD: i64 = 15;
const PROMINENT_EMOTION_PERCENT: u32 = 25;

pub(crate) const EMPTY_WINDOW_INSIGHTS: &[&str] = &[
    "Start tracking your moods and journal entries to unlock personalized insights about your emotional patterns",
    "Your first few entries will help establish your baseline mood and sentiment trends",
];

const LOW_DATA: &str = "Start by adding more journal entries or chatting with Spark to get personalized insights about your emotional patterns.";
const VERY_POSITIVE: &str = "You've been maintaining a very positive outlook recently! This positive mindset can help you tackle challenges more effectively.";
const DIFFICULT: &str = "I notice you've been experiencing more difficult emotions lately. Remember that it's okay to not be okay, and seeking support is a sign of strength.";
const BALANCED: &str = "Your emotional balance shows a healthy mix of experiences. This adaptability is key to emotional resilience.";
const VERY_STABLE: &str = "Your emotional patterns show remarkable consistency, which can be a sign of good emotional regulation and self-awareness.";
const VARIABLE: &str = "Your emotions have been fluctuating recently. This might be a good time to practice grounding techniques and self-care.";
const IMPROVING: &str = "Your sentiment has shown significant improvement recently. Celebrate this positive trend!";
const SHIFTING: &str = "I notice a shift in your emotional patterns. Consider what might be influencing these changes.";
const CLOSING: &str = "Based on your tracking history, you're building valuable self-awareness about your emotional landscape.";

/// Inputs the insight rules look at.
pub struct InsightInputs<'a> {
    pub total_entries: usize,
    /// Rounded positivity rate (0–100).
    pub overall: u32,
    pub stability: Stability,
    pub emotions: &'a [EmotionShare],
    pub trends: &'a [TrendBucket],
}

pub fn generate(inputs: &InsightInputs<'_>) -> Vec<String> {
    if inputs.total_entries == 0 {
        return EMPTY_WINDOW_INSIGHTS.iter().map(|s| s.to_string()).collect();
    }
    if inputs.total_entries < MIN_ENTRIES_FOR_INSIGHTS {
        return vec![LOW_DATA.to_string()];
    }

    let mut insights = Vec::with_capacity(MAX_INSIGHTS + 1);

    if inputs.overall > 70 {
        insights.push(VERY_POSITIVE.to_string());
    } else if inputs.overall < 30 {
        insights.push(DIFFICULT.to_string());
    } else {
        insights.push(BALANCED.to_string());
    }

    match inputs.stability {
        Stability::VeryStable => insights.push(VERY_STABLE.to_string()),
        Stability::Variable => insights.push(VARIABLE.to_string()),
        _ => {}
    }

    if let Some(top) = inputs.emotions.first().filter(|e| e.observed) {
        if top.value > PROMINENT_EMOTION_PERCENT {
            insights.push(format!(
                "Your most prominent emotion is {}. Recognizing this pattern can help you understand what triggers these feelings.",
                top.name.to_lowercase()
            ));
        }
    }

    if let (Some(first), Some(last)) = (inputs.trends.first(), inputs.trends.last()) {
        let delta = last.sentiment as i64 - first.sentiment as i64;
        if delta.abs() > TREND_DELTA_THRESHOLD {
            let line = if delta > 0 { IMPROVING } else { SHIFTING };
            insights.push(line.to_string());
        }
    }

    insights.push(CLOSING.to_string());
    insights.truncate(MAX_INSIGHTS);
    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_trends() -> Vec<TrendBucket> {
        super::super::empty_trends()
    }

    fn inputs<'a>(
        total: usize,
        overall: u32,
        stability: Stability,
        emotions: &'a [EmotionShare],
        trends: &'a [TrendBucket],
    ) -> InsightInputs<'a> {
        InsightInputs {
            total_entries: total,
            overall,
            stability,
            emotions,
            trends,
        }
    }

    #[test]
    fn low_data_gives_single_hint() {
        let trends = flat_trends();
        let out = generate(&inputs(2, 100, Stability::VeryStable, &[], &trends));
        assert_eq!(out, vec![LOW_DATA.to_string()]);
    }

    #[test]
    fn balanced_moderate_window_gets_band_and_closing() {
        let trends = flat_trends();
        let out = generate(&inputs(5, 50, Stability::Moderate, &[], &trends));
        assert_eq!(out, vec![BALANCED.to_string(), CLOSING.to_string()]);
    }

    #[test]
    fn all_rules_fire_and_are_capped_at_four() {
        let emotions = vec![EmotionShare {
            label: "joy".to_string(),
            name: "Joy & Happiness".to_string(),
            value: 80,
            raw_count: 4,
            observed: true,
        }];
        let mut trends = flat_trends();
        trends[6].sentiment = 90;
        let out = generate(&inputs(5, 80, Stability::VeryStable, &emotions, &trends));
        assert_eq!(out.len(), MAX_INSIGHTS);
        assert_eq!(out[0], VERY_POSITIVE);
        assert_eq!(out[1], VERY_STABLE);
        assert!(out[2].contains("joy & happiness"));
        assert_eq!(out[3], IMPROVING);
    }

    #[test]
    fn falling_trend_and_variable_mood() {
        let mut trends = flat_trends();
        trends[0].sentiment = 80;
        trends[6].sentiment = 20;
        let out = generate(&inputs(4, 10, Stability::Variable, &[], &trends));
        assert_eq!(
            out,
            vec![
                DIFFICULT.to_string(),
                VARIABLE.to_string(),
                SHIFTING.to_string(),
                CLOSING.to_string()
            ]
        );
    }

    #[test]
    fn padded_rows_never_count_as_prominent() {
        let emotions = vec![EmotionShare {
            label: "joy".to_string(),
            name: "Joy & Happiness".to_string(),
            value: 30,
            raw_count: 0,
            observed: false,
        }];
        let trends = flat_trends();
        let out = generate(&inputs(3, 50, Stability::Stable, &emotions, &trends));
        assert!(!out.iter().any(|s| s.contains("most prominent")));
    }
}
