//! Scripted gateway shared by the use case tests

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use council_domain::{AgentRoster, Model, PromptTemplate, RoleTag};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Gateway answering by prompt kind:
///
/// - critique prompts (critic persona prefix): `"<role> critique #<n>"`,
///   where `n` counts that role's calls
/// - synthesis prompts (synthesizer persona prefix): a JSON concept
///   `"concept v<n>"`, or the scripted raw synthesis reply
/// - evaluation prompts: the next scripted evaluation, or score 0
/// - anything else: `"echo: <prompt>"`
pub(crate) struct ScriptedGateway {
    evaluations: Mutex<VecDeque<String>>,
    synthesis_reply: Option<String>,
    failing_role: Option<RoleTag>,
    rate_limited: Vec<Model>,
    failing_models: Vec<Model>,
    delay: Option<Duration>,
    role_counts: Mutex<HashMap<RoleTag, usize>>,
    synth_count: Mutex<usize>,
    calls: Mutex<Vec<(Model, String)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            evaluations: Mutex::new(VecDeque::new()),
            synthesis_reply: None,
            failing_role: None,
            rate_limited: Vec::new(),
            failing_models: Vec::new(),
            delay: None,
            role_counts: Mutex::new(HashMap::new()),
            synth_count: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_scores(self, scores: &[f64]) -> Self {
        let raw = scores
            .iter()
            .map(|s| format!(r#"{{"score": {}, "feedback": "feedback for {}"}}"#, s, s))
            .collect();
        self.with_raw_evaluations(raw)
    }

    pub fn with_raw_evaluations(self, raw: Vec<String>) -> Self {
        *self.evaluations.lock().unwrap() = raw.into();
        self
    }

    pub fn with_synthesis_reply(mut self, reply: impl Into<String>) -> Self {
        self.synthesis_reply = Some(reply.into());
        self
    }

    pub fn fail_role(mut self, role: RoleTag) -> Self {
        self.failing_role = Some(role);
        self
    }

    pub fn rate_limit(mut self, model: Model) -> Self {
        self.rate_limited.push(model);
        self
    }

    pub fn fail_model(mut self, model: Model) -> Self {
        self.failing_models.push(model);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(Model, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, model: &Model) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == model)
            .count()
    }

    /// Prompts sent to the synthesizer, in call order
    pub fn synthesis_prompts(&self) -> Vec<String> {
        self.prompts_where(|p| Self::is_synthesis(p))
    }

    /// Prompts sent to the scorer, in call order
    pub fn evaluation_prompts(&self) -> Vec<String> {
        self.prompts_where(|p| Self::is_evaluation(p))
    }

    /// Critique prompts, in call order
    pub fn critique_prompts(&self) -> Vec<String> {
        self.prompts_where(|p| Self::critic_role(p).is_some())
    }

    fn prompts_where(&self, keep: impl Fn(&str) -> bool) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, p)| keep(p))
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn is_synthesis(prompt: &str) -> bool {
        prompt.starts_with(PromptTemplate::persona(RoleTag::Synthesizer))
    }

    fn is_evaluation(prompt: &str) -> bool {
        prompt.contains("Candidate concept:")
    }

    fn critic_role(prompt: &str) -> Option<RoleTag> {
        AgentRoster::critics()
            .map(|agent| agent.role)
            .find(|role| prompt.starts_with(PromptTemplate::persona(*role)))
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        model: &Model,
        request: &CompletionRequest,
    ) -> Result<String, GatewayError> {
        let prompt = request.prompt.clone();
        self.calls
            .lock()
            .unwrap()
            .push((model.clone(), prompt.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.rate_limited.contains(model) {
            return Err(GatewayError::RateLimited(format!("{} quota exhausted", model)));
        }
        if self.failing_models.contains(model) {
            return Err(GatewayError::NetworkFailure(format!("{} unreachable", model)));
        }

        if Self::is_synthesis(&prompt) {
            let mut count = self.synth_count.lock().unwrap();
            *count += 1;
            return Ok(match &self.synthesis_reply {
                Some(reply) => reply.clone(),
                None => format!(
                    r#"{{"concept": "concept v{n}", "risks": ["risk {n}"], "opportunities": ["opportunity {n}"]}}"#,
                    n = *count
                ),
            });
        }

        if let Some(role) = Self::critic_role(&prompt) {
            if self.failing_role == Some(role) {
                return Err(GatewayError::NetworkFailure(format!("{} connection reset", role)));
            }
            let mut counts = self.role_counts.lock().unwrap();
            let n = counts.entry(role).or_insert(0);
            *n += 1;
            return Ok(format!("{} critique #{}", role, n));
        }

        if Self::is_evaluation(&prompt) {
            return Ok(self
                .evaluations
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| r#"{"score": 0, "feedback": "unscripted"}"#.to_string()));
        }

        Ok(format!("echo: {}", prompt))
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}
