//! The Council roster: a fixed table of deliberation roles.
//!
//! Membership is decided at compile time. Adding a role means adding a
//! [`RoleTag`] variant, which the exhaustive matches in
//! [`PromptTemplate`](crate::prompt::PromptTemplate) then force to be handled.

use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};

/// Perspective an agent brings to the Council
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleTag {
    /// Adversarial reviewer hunting for legal and reputational risk
    Skeptic,
    /// Long-horizon reviewer looking for where the idea could lead
    Futurist,
    /// Execution-focused reviewer checking that the idea can ship
    Realist,
    /// Market contrarian arguing against the consensus take
    Contrarian,
    /// Merges critiques into a hardened concept; never fanned out
    Synthesizer,
}

impl RoleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::Skeptic => "skeptic",
            RoleTag::Futurist => "futurist",
            RoleTag::Realist => "realist",
            RoleTag::Contrarian => "contrarian",
            RoleTag::Synthesizer => "synthesizer",
        }
    }

    /// Whether this role takes part in the concurrent critique fan-out
    pub fn is_critic(&self) -> bool {
        !matches!(self, RoleTag::Synthesizer)
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fixed deliberation role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub role: RoleTag,
}

impl AgentDefinition {
    /// Build this agent's prompt for a `(topic, context)` pair
    pub fn prompt(&self, topic: &str, context: &str) -> String {
        PromptTemplate::critique(self.role, topic, context)
    }
}

const CATALOG: [AgentDefinition; 5] = [
    AgentDefinition {
        id: "skeptic",
        display_name: "The Skeptic",
        role: RoleTag::Skeptic,
    },
    AgentDefinition {
        id: "futurist",
        display_name: "The Futurist",
        role: RoleTag::Futurist,
    },
    AgentDefinition {
        id: "realist",
        display_name: "The Realist",
        role: RoleTag::Realist,
    },
    AgentDefinition {
        id: "contrarian",
        display_name: "The Contrarian",
        role: RoleTag::Contrarian,
    },
    AgentDefinition {
        id: "synthesizer",
        display_name: "The Synthesizer",
        role: RoleTag::Synthesizer,
    },
];

/// Static, stateless lookup over the Council's role table
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentRoster;

impl AgentRoster {
    /// Every agent, in roster order
    pub fn role_catalog() -> &'static [AgentDefinition] {
        &CATALOG
    }

    /// Agents that critique concurrently in a round (excludes the synthesizer)
    pub fn critics() -> impl Iterator<Item = &'static AgentDefinition> {
        CATALOG.iter().filter(|a| a.role.is_critic())
    }

    /// Number of critics fanned out per round
    pub fn critic_count() -> usize {
        Self::critics().count()
    }

    /// The agent playing the synthesizer role
    pub fn synthesizer() -> &'static AgentDefinition {
        Self::by_role(RoleTag::Synthesizer)
    }

    pub fn by_role(role: RoleTag) -> &'static AgentDefinition {
        match role {
            RoleTag::Skeptic => &CATALOG[0],
            RoleTag::Futurist => &CATALOG[1],
            RoleTag::Realist => &CATALOG[2],
            RoleTag::Contrarian => &CATALOG[3],
            RoleTag::Synthesizer => &CATALOG[4],
        }
    }

    pub fn get(agent_id: &str) -> Option<&'static AgentDefinition> {
        CATALOG.iter().find(|a| a.id == agent_id)
    }

    /// Position of an agent in roster order, used for deterministic re-sorting
    pub fn position(agent_id: &str) -> Option<usize> {
        CATALOG.iter().position(|a| a.id == agent_id)
    }

    /// Prompt for `agent_id` over a shared `(topic, context)` pair
    pub fn prompt_for(agent_id: &str, topic: &str, context: &str) -> Result<String, DomainError> {
        Self::get(agent_id)
            .map(|agent| agent.prompt(topic, context))
            .ok_or_else(|| DomainError::UnknownAgent(agent_id.to_string()))
    }
}
