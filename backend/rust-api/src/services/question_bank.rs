//! Pre-authored questions served whenever the AI provider is unavailable,
//! unconfigured or returns something unusable.

use crate::models::{Question, OPTION_COUNT};

/// Topic used for names the bank does not know.
pub const DEFAULT_TOPIC: &str = "Tech Trends";

struct BankQuestion {
    question: &'static str,
    options: [&'static str; OPTION_COUNT],
    correct_answer: u8,
}

const fn q(
    question: &'static str,
    options: [&'static str; OPTION_COUNT],
    correct_answer: u8,
) -> BankQuestion {
    BankQuestion {
        question,
        options,
        correct_answer,
    }
}

const WELLNESS: &[BankQuestion] = &[
    q(
        "How many hours of sleep do adults typically need per night for optimal health?",
        ["5-6 hours", "7-9 hours", "10-12 hours", "4-5 hours"],
        1,
    ),
    q(
        "Which nutrient is essential for building and repairing body tissues?",
        ["Carbohydrates", "Fats", "Proteins", "Vitamins"],
        2,
    ),
    q(
        "What is the recommended amount of moderate exercise per week for adults?",
        ["75 minutes", "150 minutes", "300 minutes", "30 minutes"],
        1,
    ),
    q(
        "Which practice is most effective for reducing stress and anxiety?",
        ["Watching TV", "Meditation and mindfulness", "Social media browsing", "Caffeine consumption"],
        1,
    ),
    q(
        "What percentage of the human body is made up of water?",
        ["45%", "60%", "75%", "90%"],
        1,
    ),
];

const TECH_TRENDS: &[BankQuestion] = &[
    q(
        "What does AI stand for in technology?",
        ["Automated Intelligence", "Artificial Intelligence", "Advanced Integration", "Algorithmic Interface"],
        1,
    ),
    q(
        "Which technology enables secure, decentralized digital transactions?",
        ["Cloud Computing", "Blockchain", "Internet of Things", "Virtual Reality"],
        1,
    ),
    q(
        "What is the primary benefit of edge computing?",
        ["Reduced latency", "Higher costs", "More complexity", "Less security"],
        0,
    ),
    q(
        "Which programming paradigm is React based on?",
        ["Object-oriented", "Functional", "Component-based", "Procedural"],
        2,
    ),
    q(
        "What does IoT stand for?",
        ["Internet of Things", "Integration of Technology", "Interface of Tools", "Intelligence over Time"],
        0,
    ),
];

const SCIENCE: &[BankQuestion] = &[
    q("What is the chemical symbol for gold?", ["Go", "Gd", "Au", "Ag"], 2),
    q("How many bones are in an adult human body?", ["206", "256", "186", "216"], 0),
    q(
        "What is the speed of light in a vacuum?",
        ["300,000 km/s", "299,792,458 m/s", "186,000 miles/s", "All of the above"],
        3,
    ),
    q("Which planet is known as the Red Planet?", ["Venus", "Jupiter", "Mars", "Saturn"], 2),
    q(
        "What is the powerhouse of the cell?",
        ["Nucleus", "Ribosome", "Mitochondria", "Endoplasmic reticulum"],
        2,
    ),
];

const HISTORY: &[BankQuestion] = &[
    q("In which year did World War II end?", ["1944", "1945", "1946", "1947"], 1),
    q(
        "Who was the first person to walk on the moon?",
        ["Buzz Aldrin", "Neil Armstrong", "John Glenn", "Alan Shepard"],
        1,
    ),
    q(
        "Which ancient wonder of the world was located in Alexandria?",
        ["Hanging Gardens", "Colossus of Rhodes", "Lighthouse of Alexandria", "Temple of Artemis"],
        2,
    ),
    q("The Renaissance began in which country?", ["France", "Germany", "Italy", "Spain"], 2),
    q(
        "Who wrote \"The Communist Manifesto\"?",
        ["Vladimir Lenin", "Karl Marx and Friedrich Engels", "Joseph Stalin", "Leon Trotsky"],
        1,
    ),
];

/// Topics the bank carries questions for.
pub const BANK_TOPICS: [&str; 4] = ["Wellness", "Tech Trends", "Science", "History"];

fn entries_for(topic: &str) -> Option<&'static [BankQuestion]> {
    match topic {
        "Wellness" => Some(WELLNESS),
        "Tech Trends" => Some(TECH_TRENDS),
        "Science" => Some(SCIENCE),
        "History" => Some(HISTORY),
        _ => None,
    }
}

pub fn has_topic(topic: &str) -> bool {
    entries_for(topic).is_some()
}

/// First `count` bank questions for `topic`, or for [`DEFAULT_TOPIC`] when the
/// topic is unknown. `None` when the entry holds fewer than `count` questions.
pub fn draw(topic: &str, count: usize) -> Option<Vec<Question>> {
    let entries = entries_for(topic).unwrap_or(TECH_TRENDS);
    if entries.len() < count {
        return None;
    }

    Some(
        entries[..count]
            .iter()
            .map(|e| Question::new(e.question, e.options, e.correct_answer))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_yields_five_valid_questions() {
        for topic in BANK_TOPICS {
            let questions = draw(topic, 5).unwrap();
            assert_eq!(questions.len(), 5, "topic {}", topic);
            for q in &questions {
                assert!(q.is_well_formed(), "{:?}", q);
                assert_eq!(q.options.len(), 4);
                assert!(q.correct_answer <= 3);
            }
        }
    }

    #[test]
    fn test_unknown_topic_uses_default() {
        let unknown = draw("Underwater Basket Weaving", 5).unwrap();
        let default = draw(DEFAULT_TOPIC, 5).unwrap();
        assert_eq!(unknown, default);
        assert!(!has_topic("Underwater Basket Weaving"));
    }

    #[test]
    fn test_truncates_to_count() {
        let questions = draw("Science", 2).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "What is the chemical symbol for gold?");
    }

    #[test]
    fn test_count_beyond_bank_is_none() {
        assert!(draw("History", 6).is_none());
        assert_eq!(draw("History", 0).unwrap().len(), 0);
    }
}
