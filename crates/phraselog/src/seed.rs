//! Stock seed phrases.

/// The default set of day phrases used to seed a fresh store.
pub const DAY_PHRASES: [&str; 17] = [
    "Nice day",
    "Wonderful day",
    "Joyful day",
    "Good day",
    "Splendid day",
    "Lovely day",
    "Great day",
    "Perfect day",
    "Excellent day",
    "Gorgeous day",
    "Beautiful day",
    "Fabulous day",
    "Awesome day",
    "Happy day",
    "Fun day",
    "Blessed day",
    "Peaceful day",
];
