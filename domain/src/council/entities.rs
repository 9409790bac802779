//! Council round value objects.
//!
//! These types represent the outputs of one deliberation round:
//! - [`CritiqueMessage`] - one critic's output for one round
//! - [`HardenedConcept`] - the Synthesizer's merge of a full critique set
//! - [`DebateResult`] - a complete round: critiques plus their synthesis

use crate::council::roster::{AgentDefinition, AgentRoster, RoleTag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One agent's output for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritiqueMessage {
    pub agent_id: String,
    pub role: RoleTag,
    pub content: String,
    pub produced_at: DateTime<Utc>,
}

impl CritiqueMessage {
    /// Creates a critique stamped with the current time.
    pub fn new(agent: &AgentDefinition, content: impl Into<String>) -> Self {
        Self {
            agent_id: agent.id.to_string(),
            role: agent.role,
            content: content.into(),
            produced_at: Utc::now(),
        }
    }

    /// Label used when embedding the critique in a prompt
    pub fn label(&self) -> String {
        match AgentRoster::get(&self.agent_id) {
            Some(agent) => format!("{} ({})", agent.display_name, self.role),
            None => self.role.to_string(),
        }
    }
}

/// Synthesized result of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardenedConcept {
    pub concept: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
}

impl HardenedConcept {
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            risks: Vec::new(),
            opportunities: Vec::new(),
        }
    }

    /// Default substituted when the synthesis response cannot be decoded:
    /// the topic itself, with nothing learned.
    pub fn fallback(topic: &str) -> Self {
        Self::new(topic)
    }

    pub fn with_risks(mut self, risks: Vec<String>) -> Self {
        self.risks = risks;
        self
    }

    pub fn with_opportunities(mut self, opportunities: Vec<String>) -> Self {
        self.opportunities = opportunities;
        self
    }
}

/// Outcome of one fan-out/fan-in round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateResult {
    /// Critiques in completion order
    pub critiques: Vec<CritiqueMessage>,
    pub synthesized_concept: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

impl DebateResult {
    pub fn new(critiques: Vec<CritiqueMessage>, hardened: HardenedConcept) -> Self {
        Self {
            critiques,
            synthesized_concept: hardened.concept,
            risks: hardened.risks,
            opportunities: hardened.opportunities,
        }
    }

    /// Critiques re-sorted into roster order
    pub fn sorted_by_roster(&self) -> Vec<&CritiqueMessage> {
        let mut sorted: Vec<_> = self.critiques.iter().collect();
        sorted.sort_by_key(|c| AgentRoster::position(&c.agent_id).unwrap_or(usize::MAX));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critique_carries_agent_identity() {
        let agent = AgentRoster::by_role(RoleTag::Realist);
        let critique = CritiqueMessage::new(agent, "Needs a hook");
        assert_eq!(critique.agent_id, "realist");
        assert_eq!(critique.role, RoleTag::Realist);
        assert_eq!(critique.label(), "The Realist (realist)");
    }

    #[test]
    fn test_fallback_concept_is_topic() {
        let hardened = HardenedConcept::fallback("Original idea");
        assert_eq!(hardened.concept, "Original idea");
        assert!(hardened.risks.is_empty());
        assert!(hardened.opportunities.is_empty());
    }

    #[test]
    fn test_sorted_by_roster() {
        let critiques = vec![
            CritiqueMessage::new(AgentRoster::by_role(RoleTag::Contrarian), "c"),
            CritiqueMessage::new(AgentRoster::by_role(RoleTag::Skeptic), "s"),
            CritiqueMessage::new(AgentRoster::by_role(RoleTag::Realist), "r"),
        ];
        let result = DebateResult::new(critiques, HardenedConcept::new("x"));
        let order: Vec<_> = result
            .sorted_by_roster()
            .iter()
            .map(|c| c.agent_id.as_str())
            .collect();
        assert_eq!(order, vec!["skeptic", "realist", "contrarian"]);
        // completion order is untouched
        assert_eq!(result.critiques[0].agent_id, "contrarian");
    }
}
