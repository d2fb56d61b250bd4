//! Scored feedback from a language model.
//!
//! [`FeedbackClient::evaluate`] never fails: any transport, parsing or
//! validation problem is logged and replaced by the fixed fallback payload.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{FeedbackConfig, PromptsConfig};
use crate::error::DebatorError;
use crate::settings::Difficulty;

/// Warning shown to the user whenever the fallback payload is used.
pub const FALLBACK_WARNING: &str = "AI feedback failed. Using sample data.";

/// Rubric scores, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub structure: u8,
    pub clarity: u8,
    pub evidence: u8,
    pub rhetoric: u8,
}

impl Scores {
    /// Dimension name and score, in rubric order.
    pub fn entries(&self) -> [(&'static str, u8); 4] {
        [
            ("structure", self.structure),
            ("clarity", self.clarity),
            ("evidence", self.evidence),
            ("rhetoric", self.rhetoric),
        ]
    }
}

/// Structured feedback for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub scores: Scores,
    pub summary: String,
    pub improvements: [String; 3],
    pub suggested_practice: [String; 3],
}

impl FeedbackResult {
    /// The static payload used whenever grading cannot be completed.
    pub fn fallback() -> Self {
        Self {
            scores: Scores {
                structure: 70,
                clarity: 75,
                evidence: 60,
                rhetoric: 65,
            },
            summary: "Solid start! Add more evidence and tighten your structure.".to_string(),
            improvements: [
                "Back claims with real-world examples or data".to_string(),
                "Use clear transitions between points".to_string(),
                "Vary sentence length for impact".to_string(),
            ],
            suggested_practice: [
                "Practice 2-minute impromptu speeches daily".to_string(),
                "Watch and analyze Oxford-style debates".to_string(),
                "Record yourself and review pacing/clarity".to_string(),
            ],
        }
    }

    /// Parse a model reply, rejecting anything outside the schema.
    pub fn from_model_reply(reply: &str) -> Result<Self, DebatorError> {
        let feedback: FeedbackResult = serde_json::from_str(&strip_code_fences(reply))?;

        if let Some((name, score)) = feedback
            .scores
            .entries()
            .into_iter()
            .find(|(_, score)| *score > 100)
        {
            return Err(DebatorError::MalformedFeedback(format!(
                "{} score {} is outside 0-100",
                name, score
            )));
        }
        if feedback.summary.trim().is_empty() {
            return Err(DebatorError::MalformedFeedback("empty summary".to_string()));
        }

        Ok(feedback)
    }
}

/// Outcome of an evaluation: either a fresh grade or the fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Graded(FeedbackResult),
    Fallback {
        feedback: FeedbackResult,
        /// Why grading failed; logged, never propagated.
        reason: String,
    },
}

impl Evaluation {
    pub fn feedback(&self) -> &FeedbackResult {
        match self {
            Evaluation::Graded(feedback) => feedback,
            Evaluation::Fallback { feedback, .. } => feedback,
        }
    }

    pub fn into_feedback(self) -> FeedbackResult {
        match self {
            Evaluation::Graded(feedback) => feedback,
            Evaluation::Fallback { feedback, .. } => feedback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Evaluation::Fallback { .. })
    }

    /// The non-blocking warning to surface, if any.
    pub fn warning(&self) -> Option<&'static str> {
        self.is_fallback().then_some(FALLBACK_WARNING)
    }
}

/// One grading request as sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub temperature: f32,
}

/// Transport to a text-generation service that answers in JSON.
#[async_trait]
pub trait GradingBackend: Send + Sync {
    /// Send the request once and return the raw reply content.
    async fn complete(&self, request: &GradingRequest) -> Result<String, DebatorError>;
}

/// OpenAI-compatible chat completions backend.
pub struct OpenAiGrader {
    client: Client<OpenAIConfig>,
    model: String,
    has_key: bool,
}

impl OpenAiGrader {
    pub fn new(config: &FeedbackConfig, api_key: &str) -> Result<Self, DebatorError> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| {
                DebatorError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.api_base);

        Ok(Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            model: config.model.clone(),
            has_key: !api_key.trim().is_empty(),
        })
    }
}

#[async_trait]
impl GradingBackend for OpenAiGrader {
    async fn complete(&self, request: &GradingRequest) -> Result<String, DebatorError> {
        if !self.has_key {
            return Err(DebatorError::MissingApiKey);
        }

        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: request.system_prompt.clone().into(),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: request.user_message.clone().into(),
                name: None,
            }),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .temperature(request.temperature)
            .build()?;

        let response = self.client.chat().create(chat_request).await?;
        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| DebatorError::MalformedFeedback("reply has no content".to_string()))
    }
}

/// Grades submissions, falling back to a fixed payload on any failure.
pub struct FeedbackClient {
    backend: Box<dyn GradingBackend>,
    prompts: PromptsConfig,
    temperature: f32,
}

impl FeedbackClient {
    pub fn new(backend: Box<dyn GradingBackend>, prompts: PromptsConfig) -> Self {
        Self {
            backend,
            prompts,
            temperature: 0.3,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the request for a submission.
    pub fn request(&self, text: &str, topic: &str, difficulty: Difficulty) -> GradingRequest {
        GradingRequest {
            system_prompt: self.prompts.grader_prompt.clone(),
            user_message: self.prompts.submission(topic, difficulty, text),
            temperature: self.temperature,
        }
    }

    /// Grade `text`. A single attempt; never returns an error.
    pub async fn evaluate(&self, text: &str, topic: &str, difficulty: Difficulty) -> Evaluation {
        let request = self.request(text, topic, difficulty);

        let outcome = match self.backend.complete(&request).await {
            Ok(reply) => FeedbackResult::from_model_reply(&reply),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(feedback) => {
                tracing::info!(topic, difficulty = difficulty.level(), "feedback received");
                Evaluation::Graded(feedback)
            }
            Err(e) => {
                tracing::warn!(topic, error = %e, "feedback failed, using fallback payload");
                Evaluation::Fallback {
                    feedback: FeedbackResult::fallback(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Strip a markdown code fence around a JSON reply, if present.
fn strip_code_fences(reply: &str) -> String {
    let trimmed = reply.trim();
    match regex::Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$") {
        Ok(fence) => fence
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|inner| inner.as_str().to_string())
            .unwrap_or_else(|| trimmed.to_string()),
        Err(_) => trimmed.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn client(backend: ScriptedBackend) -> FeedbackClient {
        FeedbackClient::new(Box::new(backend), PromptsConfig::default())
    }

    #[tokio::test]
    async fn test_graded_reply_is_parsed() {
        let evaluation = client(ScriptedBackend::replying(GOOD_REPLY))
            .evaluate("text", "Science", Difficulty::default())
            .await;

        assert!(!evaluation.is_fallback());
        assert_eq!(evaluation.warning(), None);
        let feedback = evaluation.feedback();
        assert_eq!(feedback.scores.clarity, 90);
        assert_eq!(feedback.summary, "Clear thesis, thin support.");
        assert_eq!(feedback.improvements[0], "Cite a study");
    }

    #[tokio::test]
    async fn test_backend_failure_yields_fallback() {
        let evaluation = client(ScriptedBackend::failing("connection refused"))
            .evaluate("AI is risky.", "Ethics", Difficulty::new(3).unwrap())
            .await;

        assert_eq!(evaluation.warning(), Some(FALLBACK_WARNING));
        match &evaluation {
            Evaluation::Fallback { reason, .. } => assert!(reason.contains("connection refused")),
            other => panic!("expected fallback, got {:?}", other),
        }
        assert_eq!(evaluation.into_feedback(), FeedbackResult::fallback());
    }

    #[tokio::test]
    async fn test_non_json_reply_yields_fallback() {
        let evaluation = client(ScriptedBackend::replying("Great speech, 8/10!"))
            .evaluate("text", "Ethics", Difficulty::default())
            .await;
        assert!(evaluation.is_fallback());
        assert_eq!(evaluation.feedback(), &FeedbackResult::fallback());
    }

    #[tokio::test]
    async fn test_schema_violations_yield_fallback() {
        let wrong_length = GOOD_REPLY.replace(r#""Cite a study", "#, "");
        let out_of_range = GOOD_REPLY.replace("82", "182");
        let missing_field = GOOD_REPLY.replace(r#""rhetoric": 71"#, r#""style": 71"#);

        for reply in [wrong_length, out_of_range, missing_field] {
            let evaluation = client(ScriptedBackend::replying(&reply))
                .evaluate("text", "Ethics", Difficulty::default())
                .await;
            assert!(evaluation.is_fallback(), "accepted: {}", reply);
        }
    }

    #[test]
    fn test_score_above_100_is_named() {
        let reply = GOOD_REPLY.replace("55", "101");
        let err = FeedbackResult::from_model_reply(&reply).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed feedback payload: evidence score 101 is outside 0-100"
        );
    }

    #[test]
    fn test_fenced_reply_is_accepted() {
        let fenced = format!("```json\n{}\n```", GOOD_REPLY);
        let feedback = FeedbackResult::from_model_reply(&fenced).unwrap();
        assert_eq!(feedback.scores.structure, 82);
    }

    #[test]
    fn test_fallback_payload() {
        let fallback = FeedbackResult::fallback();
        assert_eq!(
            fallback.scores.entries(),
            [("structure", 70), ("clarity", 75), ("evidence", 60), ("rhetoric", 65)]
        );
        assert_eq!(
            fallback.summary,
            "Solid start! Add more evidence and tighten your structure."
        );
    }

    #[tokio::test]
    async fn test_request_embeds_context_verbatim() {
        let backend = ScriptedBackend::replying(GOOD_REPLY);
        client(backend.clone())
            .evaluate("  keep   my spacing ", "Technology", Difficulty::new(4).unwrap())
            .await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.system_prompt.starts_with("You are a debate coach."));
        assert!(request.user_message.contains("Topic: Technology"));
        assert!(request.user_message.contains("Difficulty: 4/5"));
        assert!(request.user_message.contains("  keep   my spacing "));
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let grader = OpenAiGrader::new(&FeedbackConfig::default(), "").unwrap();
        let request = GradingRequest {
            system_prompt: String::new(),
            user_message: String::new(),
            temperature: 0.3,
        };
        let err = grader.complete(&request).await.unwrap_err();
        assert!(matches!(err, DebatorError::MissingApiKey));
    }
}
