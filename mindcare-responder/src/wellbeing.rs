//! Wellbeing helpers
//!
//! Stress-level aggregation and coping strategies carried over from the
//! original backend services. The stress score is a confidence-weighted
//! average of per-message emotion observations; the weights and
//! thresholds come from the original emotion service.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Session stress level derived from observed emotions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Critical,
}

const THRESHOLD_MODERATE: f64 = 0.4;
const THRESHOLD_HIGH: f64 = 0.6;
const THRESHOLD_CRITICAL: f64 = 0.8;

impl StressLevel {
    /// Map a weighted stress score in [0, 1] to a level
    pub fn from_score(score: f64) -> Self {
        if score >= THRESHOLD_CRITICAL {
            StressLevel::Critical
        } else if score >= THRESHOLD_HIGH {
            StressLevel::High
        } else if score >= THRESHOLD_MODERATE {
            StressLevel::Moderate
        } else {
            StressLevel::Low
        }
    }

    /// Whether this level warrants escalated support
    pub fn is_elevated(&self) -> bool {
        matches!(self, StressLevel::High | StressLevel::Critical)
    }
}

/// One emotion observation for a user message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionObservation {
    pub emotion: String,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
}

impl EmotionObservation {
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Self {
        Self {
            emotion: emotion.into(),
            confidence,
        }
    }
}

/// Stress weight for an emotion label; unknown labels sit in the middle
pub fn stress_weight(emotion: &str) -> f64 {
    match emotion.to_lowercase().as_str() {
        "sadness" => 0.7,
        "anger" => 0.8,
        "fear" => 0.9,
        "disgust" => 0.6,
        "surprise" => 0.3,
        "joy" => 0.1,
        "love" => 0.1,
        "anxiety" => 0.8,
        "depression" => 0.9,
        "stress" => 0.8,
        _ => 0.5,
    }
}

/// Aggregate observed emotions into a session stress level.
///
/// Confidence-weighted average of the per-emotion stress weights; no
/// observations (or all-zero confidence) reads as low stress.
pub fn session_stress(observations: &[EmotionObservation]) -> StressLevel {
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for observation in observations {
        let confidence = observation.confidence.clamp(0.0, 1.0);
        total_score += stress_weight(&observation.emotion) * confidence;
        total_weight += confidence;
    }

    if total_weight == 0.0 {
        return StressLevel::Low;
    }
    StressLevel::from_score(total_score / total_weight)
}

const ANXIETY_STRATEGIES: &[&str] = &[
    "Try the 5-4-3-2-1 grounding technique: Name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
    "Practice box breathing: Breathe in for 4 counts, hold for 4, breathe out for 4, hold for 4. Repeat 5 times.",
    "Write down your worries, then ask yourself: 'Is this something I can control right now?' Focus only on what you can influence.",
];

const SADNESS_STRATEGIES: &[&str] = &[
    "It's okay to feel sad - emotions are temporary visitors. Try doing one small thing that usually brings you comfort.",
    "Consider reaching out to a friend or family member. Connection can help when we're feeling down.",
    "Gentle movement like a short walk or stretching can sometimes help shift our mood naturally.",
];

const ANGER_STRATEGIES: &[&str] = &[
    "When anger feels overwhelming, try counting to 10 slowly or taking 5 deep breaths before responding.",
    "Physical activity can help release angry energy - try doing jumping jacks or going for a quick walk.",
    "Write down what's making you angry without censoring yourself, then tear up the paper when you're done.",
];

const FEAR_STRATEGIES: &[&str] = &[
    "Fear often comes from uncertainty. Try writing down what specifically you're afraid of, then what you know to be true right now.",
    "Use progressive muscle relaxation: tense and then relax each muscle group from your toes to your head.",
    "Remind yourself of times you've overcome challenges before. You have more strength than you realize.",
];

/// Safe fallback responses for when a real backend misbehaves
pub const FALLBACK_RESPONSES: &[&str] = &[
    "I understand this is a difficult time for you. Sometimes it helps to take a few deep breaths and remember that you're not alone in this.",
    "It sounds like you're going through something challenging. Would you like to try a grounding exercise together?",
    "I hear that you're struggling right now. Remember that it's okay to feel this way, and there are people who want to help you.",
    "Thank you for sharing that with me. It takes courage to talk about difficult feelings. How are you taking care of yourself today?",
];

fn strategies_for(emotion: &str) -> &'static [&'static str] {
    match emotion.to_lowercase().as_str() {
        "sadness" => SADNESS_STRATEGIES,
        "anger" => ANGER_STRATEGIES,
        "fear" => FEAR_STRATEGIES,
        // Anxiety strategies double as the general-purpose pool
        _ => ANXIETY_STRATEGIES,
    }
}

/// Pick a coping strategy for an emotion at the given stress level.
///
/// Elevated stress pins the first (most concrete) strategy and appends
/// the escalation suffix; otherwise one is drawn at random.
pub fn coping_strategy<R: Rng>(emotion: &str, level: StressLevel, rng: &mut R) -> String {
    let strategies = strategies_for(emotion);

    if level.is_elevated() {
        format!(
            "Since you're feeling quite overwhelmed right now, let's try this: {} If this doesn't help, please consider reaching out to a counselor or trusted friend.",
            strategies[0]
        )
    } else {
        strategies[rng.gen_range(0..strategies.len())].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_score_thresholds() {
        assert_eq!(StressLevel::from_score(0.0), StressLevel::Low);
        assert_eq!(StressLevel::from_score(0.39), StressLevel::Low);
        assert_eq!(StressLevel::from_score(0.4), StressLevel::Moderate);
        assert_eq!(StressLevel::from_score(0.6), StressLevel::High);
        assert_eq!(StressLevel::from_score(0.8), StressLevel::Critical);
        assert_eq!(StressLevel::from_score(1.0), StressLevel::Critical);
    }

    #[test]
    fn test_no_observations_reads_low() {
        assert_eq!(session_stress(&[]), StressLevel::Low);
        assert_eq!(
            session_stress(&[EmotionObservation::new("fear", 0.0)]),
            StressLevel::Low
        );
    }

    #[test]
    fn test_weighted_aggregation() {
        // fear (0.9) at high confidence dominates joy (0.1) at low
        let observations = vec![
            EmotionObservation::new("fear", 0.9),
            EmotionObservation::new("joy", 0.1),
        ];
        assert_eq!(session_stress(&observations), StressLevel::Critical);

        let calm = vec![
            EmotionObservation::new("joy", 0.9),
            EmotionObservation::new("love", 0.8),
        ];
        assert_eq!(session_stress(&calm), StressLevel::Low);
    }

    #[test]
    fn test_unknown_emotion_uses_middle_weight() {
        let observations = vec![EmotionObservation::new("confusion", 1.0)];
        assert_eq!(session_stress(&observations), StressLevel::Moderate);
    }

    #[test]
    fn test_elevated_stress_pins_first_strategy() {
        let mut rng = StdRng::seed_from_u64(1);
        let strategy = coping_strategy("anxiety", StressLevel::High, &mut rng);
        assert!(strategy.contains(ANXIETY_STRATEGIES[0]));
        assert!(strategy.contains("counselor or trusted friend"));
    }

    #[test]
    fn test_low_stress_draws_from_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let strategy = coping_strategy("sadness", StressLevel::Low, &mut rng);
            assert!(SADNESS_STRATEGIES.contains(&strategy.as_str()));
        }
    }
}
