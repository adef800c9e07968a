//! Example questions offered to the user.
//!
//! A mix of questions the service can verify and ones designed to provoke a
//! hallucination. Picking one only fills in the query; it never submits.

/// A canned question with an optional category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleQuestion {
    pub question: &'static str,
    pub category: Option<&'static str>,
}

const fn sample(question: &'static str, category: Option<&'static str>) -> SampleQuestion {
    SampleQuestion { question, category }
}

/// Fixed, ordered list of example questions
pub const SAMPLE_QUESTIONS: &[SampleQuestion] = &[
    sample("Who invented the Python programming language?", None),
    sample("What is the capital of France?", None),
    sample("Who invented the steam-powered flying carriage in 1803?", None),
    sample("Who wrote the 1872 pamphlet A Guide to Lunar Farming?", None),
    sample("Who invented the modern bicycle?", None),
    sample("Which country first used the solar rail in 1890?", None),
    sample("How many people lived in Mumbai in 2001 (exact number)?", None),
    sample(
        "What is the atomic weight of darmstadtium to five decimal places?",
        Some("Precise"),
    ),
    sample(
        "Name the mayor of the city where the inventor of the zipper was born.",
        Some("Multi-hop"),
    ),
];

/// Look up an example by its 1-based position, as shown to the user
pub fn pick(number: usize) -> Option<&'static SampleQuestion> {
    number.checked_sub(1).and_then(|idx| SAMPLE_QUESTIONS.get(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::is_submittable;

    #[test]
    fn test_pick_is_one_based() {
        assert_eq!(pick(1).unwrap().question, SAMPLE_QUESTIONS[0].question);
        assert_eq!(pick(2).unwrap().question, "What is the capital of France?");
        assert!(pick(0).is_none());
        assert!(pick(SAMPLE_QUESTIONS.len() + 1).is_none());
    }

    #[test]
    fn test_all_samples_are_submittable() {
        assert!(SAMPLE_QUESTIONS.iter().all(|s| is_submittable(s.question)));
    }

    #[test]
    fn test_categories() {
        let tagged: Vec<_> = SAMPLE_QUESTIONS
            .iter()
            .filter_map(|s| s.category)
            .collect();
        assert_eq!(tagged, vec!["Precise", "Multi-hop"]);
    }
}
