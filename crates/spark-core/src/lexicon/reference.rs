//! Reference lexicon shipped with the engine.
//!
//! Golden outputs are pinned to these tables; bump [`REFERENCE_LEXICON_VERSION`] whenever a word
//! list changes so persisted analyses can be traced back to the tables that produced them.

pub const REFERENCE_LEXICON_VERSION: &str = "spark-reference-1";

pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "love", "excited", "great", "good", "amazing", "wonderful",
    "fantastic", "excellent", "positive", "awesome", "brilliant", "fabulous",
    "perfect", "outstanding", "superb", "terrific", "marvelous", "delighted",
    "pleased", "content", "satisfied", "thrilled", "ecstatic", "blissful",
    "cheerful", "jubilant", "elated", "grateful", "thankful", "blessed",
    "optimistic", "hopeful", "confident", "proud", "accomplished", "successful",
    "achieved", "progress", "improved", "better", "best", "win", "victory",
    "peace", "calm", "relaxed", "serene", "tranquil", "comfortable",
    "motivated", "inspired", "energized", "refreshed", "renewed",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "unhappy", "angry", "mad", "frustrated", "annoyed", "irritated",
    "disappointed", "depressed", "miserable", "terrible", "awful", "horrible",
    "bad", "worse", "worst", "hate", "dislike", "detest", "despise",
    "anxious", "nervous", "worried", "stressed", "overwhelmed", "burned out",
    "tired", "exhausted", "fatigued", "drained", "weary", "sleepy",
    "pain", "hurt", "suffering", "agony", "distress", "anguish",
    "fear", "scared", "afraid", "terrified", "frightened", "panicked",
    "lonely", "alone", "isolated", "abandoned", "rejected", "excluded",
    "failure", "failed", "mistake", "error", "wrong", "incorrect",
    "stupid", "dumb", "idiot", "foolish", "silly", "ridiculous", "hopeless",
];

/// Scaling modifiers. Phrase entries never match a single token and are kept for table parity.
pub const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("really", 1.2),
    ("so", 1.2),
    ("too", 1.1),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("fairly", 1.05),
    ("somewhat", 0.9),
    ("slightly", 0.8),
    ("a bit", 0.8),
    ("a little", 0.8),
    ("always", 1.1),
    ("constantly", 1.1),
];

pub const NEGATORS: &[&str] = &["not", "never"];

pub const EMOTION_PATTERNS: &[(&str, &[&str])] = &[
    ("joy", &["happy", "joy", "excited", "thrilled", "delighted", "ecstatic"]),
    ("gratitude", &["grateful", "thankful", "appreciate", "blessed", "fortunate"]),
    ("anxiety", &["anxious", "nervous", "worried", "stressed", "overwhelmed"]),
    ("sadness", &["sad", "depressed", "miserable", "heartbroken", "down"]),
    ("anger", &["angry", "mad", "frustrated", "irritated", "annoyed"]),
    ("fear", &["scared", "afraid", "terrified", "frightened", "panicked"]),
    ("contentment", &["content", "satisfied", "peaceful", "calm", "relaxed"]),
];

pub const TOPIC_PATTERNS: &[(&str, &[&str])] = &[
    ("career", &[
        "job", "work", "career", "profession", "occupation", "employment", "boss", "colleague",
        "office", "meeting", "project", "deadline", "promotion", "salary", "interview",
    ]),
    ("learning", &[
        "learn", "study", "education", "knowledge", "course", "skill", "training", "lesson",
        "school", "college", "university", "homework", "assignment", "exam",
    ]),
    ("design", &[
        "design", "creative", "art", "ux", "ui", "graphic", "visual", "layout", "typography",
        "color", "illustration", "sketch", "prototype", "portfolio",
    ]),
    ("technology", &[
        "tech", "technology", "code", "programming", "software", "digital", "computer", "app",
        "application", "website", "web", "mobile", "ai", "ml", "data",
    ]),
    ("goals", &[
        "goal", "future", "plan", "aspiration", "dream", "ambition", "target", "objective",
        "purpose", "mission", "vision", "achievement", "success",
    ]),
    ("relationships", &[
        "friend", "family", "relationship", "social", "connection", "love", "partner", "parent",
        "child", "sibling", "community", "network", "dating",
    ]),
    ("health", &[
        "health", "exercise", "fitness", "wellness", "mental", "physical", "therapy", "doctor",
        "hospital", "medicine", "treatment", "recovery", "diet",
    ]),
    ("finance", &[
        "money", "finance", "financial", "budget", "save", "spend", "investment", "debt", "loan",
        "income", "salary", "wealth", "rich", "poor", "payment",
    ]),
    ("hobbies", &[
        "hobby", "interest", "game", "sport", "music", "movie", "book", "travel", "food",
        "cooking", "photography", "gardening", "craft",
    ]),
    ("personal growth", &[
        "grow", "development", "improve", "progress", "change", "transform", "evolve", "mature",
        "learn", "reflect", "meditate", "mindfulness",
    ]),
];

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "was", "were",
];
