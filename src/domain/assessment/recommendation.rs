//! Stream definitions, recommendation types, and the rule-based scorer

use serde::{Deserialize, Serialize};

use super::answer::Answer;

/// All CSE streams, in recommendation-preference order for ties
pub const ALL_STREAMS: &[StreamId] = &[
    StreamId::CyberSecurity,
    StreamId::AiMl,
    StreamId::FullStack,
    StreamId::DataScience,
    StreamId::CloudComputing,
    StreamId::DevOps,
    StreamId::GameDev,
    StreamId::Iot,
    StreamId::Blockchain,
    StreamId::MobileDev,
    StreamId::Networks,
];

/// CSE specialization streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    CyberSecurity,
    AiMl,
    FullStack,
    DataScience,
    CloudComputing,
    DevOps,
    GameDev,
    Iot,
    Blockchain,
    MobileDev,
    Networks,
}

impl StreamId {
    /// Get the display name for this stream
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CyberSecurity => "Cyber Security",
            Self::AiMl => "Artificial Intelligence & Machine Learning",
            Self::FullStack => "Full Stack Development",
            Self::DataScience => "Data Science",
            Self::CloudComputing => "Cloud Computing",
            Self::DevOps => "DevOps",
            Self::GameDev => "Game Development",
            Self::Iot => "Internet of Things (IoT)",
            Self::Blockchain => "Blockchain",
            Self::MobileDev => "Mobile App Development",
            Self::Networks => "Computer Networks",
        }
    }

    /// Personality traits associated with this stream
    pub const fn traits(&self) -> &'static [&'static str] {
        match self {
            Self::CyberSecurity => &[
                "analytical",
                "detail-oriented",
                "problem-solver",
                "security-conscious",
                "ethical",
            ],
            Self::AiMl => &[
                "mathematical",
                "innovative",
                "research-oriented",
                "data-driven",
                "curious",
            ],
            Self::FullStack => &[
                "versatile",
                "creative",
                "user-focused",
                "problem-solver",
                "collaborative",
            ],
            Self::DataScience => &[
                "analytical",
                "mathematical",
                "curious",
                "detail-oriented",
                "research-oriented",
            ],
            Self::CloudComputing => &[
                "systematic",
                "scalability-focused",
                "infrastructure-minded",
                "efficient",
                "organized",
            ],
            Self::DevOps => &[
                "systematic",
                "automation-focused",
                "collaborative",
                "efficient",
                "process-oriented",
            ],
            Self::GameDev => &[
                "creative",
                "innovative",
                "user-focused",
                "detail-oriented",
                "passionate",
            ],
            Self::Iot => &[
                "innovative",
                "hardware-interested",
                "problem-solver",
                "practical",
                "curious",
            ],
            Self::Blockchain => &[
                "security-conscious",
                "innovative",
                "mathematical",
                "detail-oriented",
                "ethical",
            ],
            Self::MobileDev => &[
                "creative",
                "user-focused",
                "detail-oriented",
                "versatile",
                "design-conscious",
            ],
            Self::Networks => &[
                "systematic",
                "problem-solver",
                "detail-oriented",
                "infrastructure-minded",
                "analytical",
            ],
        }
    }

    /// Short description of what the stream is about
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CyberSecurity => "Protecting systems, networks, and data from cyber threats",
            Self::AiMl => "Building intelligent systems that can learn and make decisions",
            Self::FullStack => "Building complete web applications from frontend to backend",
            Self::DataScience => "Extracting insights and knowledge from data",
            Self::CloudComputing => "Managing and deploying applications on cloud platforms",
            Self::DevOps => "Streamlining software development and deployment processes",
            Self::GameDev => "Creating interactive gaming experiences",
            Self::Iot => "Connecting physical devices to the internet",
            Self::Blockchain => "Building decentralized and secure applications",
            Self::MobileDev => "Creating applications for mobile devices",
            Self::Networks => "Designing and managing network infrastructure",
        }
    }
}

/// Cache key for a spoken result summary, derived from the stream name
pub fn result_cache_key(stream_name: &str) -> String {
    let slug = stream_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("result-{}", slug)
}

/// One ranked stream suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamMatch {
    pub stream: String,
    pub match_percentage: u8,
    pub reasons: Vec<String>,
}

/// Ranked recommendation: best, second, and third stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub primary: StreamMatch,
    pub secondary: StreamMatch,
    pub tertiary: StreamMatch,
}

/// Keyword buckets: answers containing any keyword add the paired weight
/// to the stream's score
const KEYWORD_RULES: &[(&[&str], &[(StreamId, u32)])] = &[
    (
        &["security", "protect", "ethical"],
        &[(StreamId::CyberSecurity, 10), (StreamId::Blockchain, 5)],
    ),
    (
        &["ai", "machine learning", "intelligence"],
        &[(StreamId::AiMl, 10), (StreamId::DataScience, 5)],
    ),
    (
        &["website", "web", "frontend", "backend"],
        &[(StreamId::FullStack, 10)],
    ),
    (
        &["data", "analysis", "statistics"],
        &[(StreamId::DataScience, 10), (StreamId::AiMl, 5)],
    ),
    (&["game", "graphics", "3d"], &[(StreamId::GameDev, 10)]),
    (
        &["mobile", "app", "android", "ios"],
        &[(StreamId::MobileDev, 10)],
    ),
    (
        &["cloud", "aws", "azure"],
        &[(StreamId::CloudComputing, 10), (StreamId::DevOps, 5)],
    ),
    (&["hardware", "sensor", "device"], &[(StreamId::Iot, 10)]),
    (&["network", "router", "protocol"], &[(StreamId::Networks, 10)]),
    (
        &["automation", "deploy", "ci/cd"],
        &[(StreamId::DevOps, 10)],
    ),
];

/// Score answers against the keyword rules and return the top three
/// streams. Keyword hits are substring matches on the lower-cased answer
/// text; percentages are twice the score capped at 85/70/60 by rank, and
/// reasons come from the stream trait lists.
pub fn rule_based_recommendation(answers: &[Answer]) -> Recommendation {
    let mut scores: Vec<(StreamId, u32)> = ALL_STREAMS.iter().map(|&s| (s, 0)).collect();

    for answer in answers {
        let text = answer.answer.to_lowercase();
        for (keywords, bumps) in KEYWORD_RULES {
            if keywords.iter().any(|kw| text.contains(kw)) {
                for &(stream, weight) in *bumps {
                    if let Some(entry) = scores.iter_mut().find(|(s, _)| *s == stream) {
                        entry.1 += weight;
                    }
                }
            }
        }
    }

    // Stable sort keeps the definition order for equal scores
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let ranked = |rank: usize, cap: u32, reason_count: usize| {
        let (stream, score) = scores[rank];
        StreamMatch {
            stream: stream.name().to_string(),
            match_percentage: (score * 2).min(cap) as u8,
            reasons: stream.traits()[..reason_count]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    };

    Recommendation {
        primary: ranked(0, 85, 3),
        secondary: ranked(1, 70, 2),
        tertiary: ranked(2, 60, 2),
    }
}
