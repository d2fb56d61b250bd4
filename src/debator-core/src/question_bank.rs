//! Canned debate prompts and cross-examination questions.
//!
//! Every topic in the selector maps to one debate prompt and exactly five
//! follow-up questions. The bank is static and never mutated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DebatorError;

/// Number of questions in a cross-examination round.
pub const CROSS_EX_LENGTH: usize = 5;

/// One of the fixed topic categories offered by the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Topic {
    #[default]
    Science,
    History,
    CurrentTrends,
    GlobalIssues,
    Ethics,
    Technology,
    Economics,
    Environment,
}

impl Topic {
    /// All topics, in selector order.
    pub const ALL: [Topic; 8] = [
        Topic::Science,
        Topic::History,
        Topic::CurrentTrends,
        Topic::GlobalIssues,
        Topic::Ethics,
        Topic::Technology,
        Topic::Economics,
        Topic::Environment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Topic::Science => "Science",
            Topic::History => "History",
            Topic::CurrentTrends => "Current Trends",
            Topic::GlobalIssues => "Global Issues",
            Topic::Ethics => "Ethics",
            Topic::Technology => "Technology",
            Topic::Economics => "Economics",
            Topic::Environment => "Environment",
        }
    }

    /// The debate prompt for a timed free response.
    pub fn prompt(&self) -> &'static str {
        match self {
            Topic::Science => "Should gene editing in humans be universally banned?",
            Topic::History => "Was the Industrial Revolution more harmful than beneficial?",
            Topic::CurrentTrends => "Is remote work damaging urban economies long-term?",
            Topic::GlobalIssues => {
                "Should wealthy nations fund climate adaptation in poorer countries?"
            }
            Topic::Ethics => "Is it ever justifiable to use AI for lethal autonomous weapons?",
            Topic::Technology => "Do social media algorithms harm democracy more than they help?",
            Topic::Economics => "Should governments cap personal wealth to reduce inequality?",
            Topic::Environment => "Is nuclear energy the best replacement for fossil fuels?",
        }
    }

    /// The ordered cross-examination questions.
    pub fn cross_ex_questions(&self) -> [&'static str; CROSS_EX_LENGTH] {
        match self {
            Topic::Science => [
                "What empirical evidence supports your claim?",
                "How would you respond to critics who say this technology is too risky?",
                "Can you explain the ethical implications of your position?",
                "What are the long-term societal impacts of your proposal?",
                "Who benefits most from your solution, and who might be harmed?",
            ],
            Topic::History => [
                "Which historical precedent supports your argument?",
                "How does your view differ from mainstream historiography?",
                "What primary sources back your interpretation?",
                "How would your policy have changed the outcome of [event]?",
                "What unintended consequences might arise from applying this lesson today?",
            ],
            Topic::CurrentTrends => [
                "What recent data supports your stance?",
                "How does your argument address the counter-trend of [opposing force]?",
                "Who are the key stakeholders affected by this trend?",
                "What regulatory or market forces could disrupt your prediction?",
                "How scalable is your proposed solution in the next 5 years?",
            ],
            Topic::GlobalIssues => [
                "Which international treaties or organizations are relevant here?",
                "How would your solution be enforced across borders?",
                "What role should non-state actors play?",
                "How do you balance sovereignty with global responsibility?",
                "What metrics would measure success of your proposal?",
            ],
            Topic::Ethics => [
                "Which ethical framework guides your view?",
                "How do you weigh individual rights against collective good?",
                "What moral dilemma does your position create?",
                "Can you justify your stance in a worst-case scenario?",
                "How does your argument hold under scrutiny from opposing ethical views?",
            ],
            Topic::Technology => [
                "What technical limitations affect your proposal?",
                "How does your solution handle privacy or security concerns?",
                "What is the innovation-to-risk ratio of your approach?",
                "How would you regulate this technology without stifling progress?",
                "What user behavior patterns must change for your solution to succeed?",
            ],
            Topic::Economics => [
                "What fiscal or monetary policies support your claim?",
                "How would your proposal affect GDP, inflation, or unemployment?",
                "Who bears the cost of implementation?",
                "What market distortions might arise?",
                "How does your solution compare to existing economic models?",
            ],
            Topic::Environment => [
                "Which ecosystems or species are most impacted by your proposal?",
                "How do you quantify environmental risk vs. economic benefit?",
                "What scientific models support your intervention?",
                "How would climate change alter the effectiveness of your plan?",
                "What funding mechanisms ensure long-term sustainability?",
            ],
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topic {
    type Err = DebatorError;

    /// Case-insensitive; inner whitespace, dashes and underscores are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Topic::ALL
            .into_iter()
            .find(|topic| normalize(topic.name()) == wanted)
            .ok_or_else(|| DebatorError::UnknownTopic(s.trim().to_string()))
    }
}

impl TryFrom<String> for Topic {
    type Error = DebatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.name().to_string()
    }
}

fn normalize(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Get the debate prompt for a topic name.
///
/// Unrecognized names get a generic templated prompt instead of an error.
pub fn prompt(topic: &str) -> String {
    match topic.parse::<Topic>() {
        Ok(known) => known.prompt().to_string(),
        Err(_) => format!("Debate a key issue in {}.", topic),
    }
}

/// Get the five cross-examination questions for a topic name.
pub fn cross_ex_questions(topic: &str) -> Result<[&'static str; CROSS_EX_LENGTH], DebatorError> {
    topic.parse::<Topic>().map(|known| known.cross_ex_questions())
}

/// List all topic names, in selector order.
pub fn available_topics() -> Vec<&'static str> {
    Topic::ALL.iter().map(Topic::name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_prompt_and_five_questions() {
        for name in available_topics() {
            assert!(!prompt(name).is_empty());
            let questions = cross_ex_questions(name).unwrap();
            assert_eq!(questions.len(), CROSS_EX_LENGTH);
            assert!(questions.iter().all(|q| !q.trim().is_empty()));
        }
    }

    #[test]
    fn test_lookups_are_deterministic() {
        for name in available_topics() {
            assert_eq!(prompt(name), prompt(name));
            assert_eq!(cross_ex_questions(name).unwrap(), cross_ex_questions(name).unwrap());
        }
    }

    #[test]
    fn test_technology_prompt() {
        assert_eq!(
            prompt("Technology"),
            "Do social media algorithms harm democracy more than they help?"
        );
    }

    #[test]
    fn test_unknown_topic_prompt_is_templated() {
        assert_eq!(prompt("Sports"), "Debate a key issue in Sports.");
    }

    #[test]
    fn test_unknown_topic_questions_fail_with_topic_name() {
        let err = cross_ex_questions("Sports").unwrap_err();
        assert!(matches!(err, DebatorError::UnknownTopic(ref name) if name == "Sports"));
        assert_eq!(err.to_string(), "Unknown topic: 'Sports'");
    }

    #[test]
    fn test_topic_parsing_is_lenient() {
        assert_eq!("current trends".parse::<Topic>().unwrap(), Topic::CurrentTrends);
        assert_eq!("GLOBAL-ISSUES".parse::<Topic>().unwrap(), Topic::GlobalIssues);
        assert_eq!("  ethics ".parse::<Topic>().unwrap(), Topic::Ethics);
        assert!("Current".parse::<Topic>().is_err());
    }

    #[test]
    fn test_available_topics_order() {
        assert_eq!(
            available_topics(),
            vec![
                "Science",
                "History",
                "Current Trends",
                "Global Issues",
                "Ethics",
                "Technology",
                "Economics",
                "Environment"
            ]
        );
    }

    #[test]
    fn test_topic_round_trips_through_its_name() {
        for topic in Topic::ALL {
            assert_eq!(topic.to_string().parse::<Topic>().unwrap(), topic);
        }
    }
}
