//! Scripted keyword responder
//!
//! Replies are selected by an ordered, first-match-wins substring scan
//! over the lowercased message. The crisis scan runs before every
//! topical category so a self-harm indicator is never masked by a more
//! specific topical match. Matching is plain substring search with no
//! word-boundary checks; "test" inside "testimony" matches the exam
//! category. That behavior is preserved from the original script and is
//! a known limitation.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use crate::base::{Reply, Responder, ResponderResult};

/// Self-harm indicators, checked before any topical category.
///
/// The first four come from the reviewed chat screen; the rest from the
/// original backend's crisis detector.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "hurt myself",
    "self harm",
    "better off dead",
    "no point living",
    "end my life",
];

pub const CRISIS_RESPONSE: &str = "I'm very concerned about what you've shared, and I want you to know that your life has immense value. You're not alone in this pain, and there are people trained to help you through this difficult time. Please reach out to the crisis hotline at 988 immediately, or go to your nearest emergency room. Would you like me to help you find local crisis resources?";

/// Which category produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Crisis,
    ExamStress,
    Loneliness,
    Anxiety,
    Sleep,
    Depression,
    Family,
    Social,
    Default,
}

struct Topic {
    category: Category,
    keywords: &'static [&'static str],
    response: &'static str,
}

/// Topical categories in fixed priority order; the first whose keyword
/// set matches wins.
const TOPICS: &[Topic] = &[
    Topic {
        category: Category::ExamStress,
        keywords: &["exam", "test", "study"],
        response: "Exam stress is incredibly common - you're definitely not alone in feeling this way. It sounds overwhelming right now. Let's try a quick grounding technique: take a deep breath in for 4 counts, hold for 4, then slowly out for 6. This activates your body's relaxation response. Would you like some specific study strategies that can help reduce anxiety, or would you prefer to talk about what's making the exams feel so stressful?",
    },
    Topic {
        category: Category::Loneliness,
        keywords: &["lonely", "alone", "isolated"],
        response: "Loneliness can feel so heavy, especially when it seems like everyone else is connected. What you're feeling is valid and more common than you might think. Many students experience this, particularly during stressful times. Have you considered joining our peer support groups? Sometimes just knowing others understand can make a real difference. What kind of connection feels most missing for you right now?",
    },
    Topic {
        category: Category::Anxiety,
        keywords: &["anxious", "anxiety", "worried"],
        response: "Anxiety can feel overwhelming, like your mind is racing and you can't catch your breath. Right now, let's try the 5-4-3-2-1 grounding technique: name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste. This helps anchor you in the present moment. What tends to trigger your anxiety the most?",
    },
    Topic {
        category: Category::Sleep,
        keywords: &["sleep", "tired", "insomnia"],
        response: "Sleep struggles often go hand-in-hand with stress and mental health challenges - it's like a cycle that feeds itself. Good sleep hygiene can be a game-changer. Try keeping consistent sleep/wake times, creating a wind-down routine 30 minutes before bed, and avoiding screens during that time. Are you having trouble falling asleep, staying asleep, or both? Understanding the pattern can help us find the right strategies.",
    },
    Topic {
        category: Category::Depression,
        keywords: &["depressed", "sad", "hopeless"],
        response: "I hear the pain in what you're sharing, and I want you to know that these feelings, while incredibly difficult, are temporary. Depression can make everything feel gray and hopeless, but you've taken a brave step by reaching out. Small steps can make a difference - even just talking about it here shows strength. What has been the hardest part of your day today?",
    },
    Topic {
        category: Category::Family,
        keywords: &["family", "parents", "home"],
        response: "Family relationships can be complex and emotionally charged, especially when you're dealing with your own stress. It's normal for family dynamics to feel more challenging during difficult times. Sometimes families want to help but don't know how, or their way of helping doesn't match what you need. What's been the most difficult part of your family situation lately?",
    },
    Topic {
        category: Category::Social,
        keywords: &["friend", "relationship", "social"],
        response: "Relationships with friends can be both a source of support and stress, especially when you're already struggling. It's okay if social situations feel harder right now - that's actually pretty common when we're dealing with mental health challenges. What's been weighing on you most about your friendships or social connections?",
    },
];

/// Generic supportive responses used when no category matches
pub const DEFAULT_RESPONSES: &[&str] = &[
    "Thank you for trusting me with what you're going through. It takes real courage to open up about difficult feelings. I'm here to listen and support you. Can you tell me more about what's been weighing on your mind lately?",
    "I can hear that you're dealing with something challenging right now, and I want you to know that your feelings are completely valid. Sometimes just having a safe space to express what we're going through can help. What's been the most difficult part of your day?",
    "It sounds like you're carrying a lot right now, and that takes strength even when it doesn't feel like it. Everyone faces struggles, and reaching out for support - like you're doing right now - shows real wisdom. What kind of support feels most helpful to you in this moment?",
    "I appreciate you sharing with me, and I want you to know that whatever you're feeling is okay. Mental health challenges are real, and you deserve support and understanding. Would you like to explore some coping strategies together, or would you prefer to talk more about what's been troubling you?",
    "Thank you for being open with me about what you're experiencing. It's completely normal to have difficult days, and you're not alone in this. Sometimes talking through our thoughts and feelings can help us process them better. What's been on your mind the most lately?",
];

/// A classified reply together with the category that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub reply: Reply,
    pub category: Category,
}

/// Simulated reply latency: a fixed base plus bounded random jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    pub base: Duration,
    pub jitter: Duration,
}

impl DelayPolicy {
    pub fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self {
            base: Duration::from_millis(base_ms),
            jitter: Duration::from_millis(jitter_ms),
        }
    }

    /// No delay at all, for tests and one-shot classification
    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rng.gen_range(0..jitter_ms))
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::new(1500, 1000)
    }
}

/// Keyword-driven responder with canned supportive replies
pub struct ScriptedResponder {
    rng: Mutex<StdRng>,
    delay: DelayPolicy,
}

impl ScriptedResponder {
    /// Create a responder seeded from system entropy
    pub fn new(delay: DelayPolicy) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            delay,
        }
    }

    /// Create a responder with a fixed seed for deterministic runs
    pub fn with_seed(delay: DelayPolicy, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay,
        }
    }

    /// Classify a message into a reply.
    ///
    /// Total over all input: crisis scan first, then the topical
    /// categories in priority order, then a random pick from the
    /// default pool (which is where the empty string lands).
    pub fn classify(&self, message: &str) -> Classification {
        let lower = message.to_lowercase();

        if CRISIS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Classification {
                reply: Reply::crisis(CRISIS_RESPONSE),
                category: Category::Crisis,
            };
        }

        for topic in TOPICS {
            if topic.keywords.iter().any(|k| lower.contains(k)) {
                return Classification {
                    reply: Reply::supportive(topic.response),
                    category: topic.category,
                };
            }
        }

        let index = {
            let mut rng = self.rng.lock().expect("rng lock poisoned");
            rng.gen_range(0..DEFAULT_RESPONSES.len())
        };
        Classification {
            reply: Reply::supportive(DEFAULT_RESPONSES[index]),
            category: Category::Default,
        }
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&self, message: &str) -> ResponderResult<Reply> {
        let delay = {
            let mut rng = self.rng.lock().expect("rng lock poisoned");
            self.delay.sample(&mut *rng)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let classification = self.classify(message);
        debug!(category = ?classification.category, "message classified");
        Ok(classification.reply)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
