//! Prompt templates for the Council flow

use crate::council::roster::RoleTag;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Persona preamble for a role
    pub fn persona(role: RoleTag) -> &'static str {
        match role {
            RoleTag::Skeptic => {
                r#"You are The Skeptic on a content council. You read every draft as opposing counsel would.
Hunt for legal exposure, unverifiable claims, reputational landmines and anything a hostile reader could screenshot."#
            }
            RoleTag::Futurist => {
                r#"You are The Futurist on a content council. You judge a draft by where it leads in two years.
Look for the bigger narrative the post could anchor and the trends it is early or late to."#
            }
            RoleTag::Realist => {
                r#"You are The Realist on a content council. You care about execution.
Check that the post is specific, fits the platform, has a clear call to action and can be shipped today."#
            }
            RoleTag::Contrarian => {
                r#"You are The Contrarian on a content council. You argue against the obvious take.
Identify where the draft blends into the market consensus and what angle would make it stand out."#
            }
            RoleTag::Synthesizer => {
                r#"You are The Synthesizer on a content council. You do not add opinions of your own.
You merge the council's critiques into one hardened concept that absorbs every valid concern."#
            }
        }
    }

    /// Critique prompt for one council member
    pub fn critique(role: RoleTag, topic: &str, context: &str) -> String {
        format!(
            r#"{persona}

Topic:
{topic}

Current draft:
{context}

Give a focused critique from your perspective in at most five bullet points.
End with the single change you consider most important."#,
            persona = Self::persona(role),
            topic = topic,
            context = context,
        )
    }

    /// Synthesis prompt embedding every critique with its role label
    pub fn synthesis(topic: &str, critiques: &[(String, String)]) -> String {
        let mut prompt = format!(
            r#"{persona}

Topic:
{topic}

Council critiques:
"#,
            persona = Self::persona(RoleTag::Synthesizer),
            topic = topic,
        );

        for (label, content) in critiques {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", label, content));
        }

        prompt.push_str(
            r#"
Respond with JSON only, in exactly this shape:
{"concept": "<the hardened post concept>", "risks": ["<risk>", ...], "opportunities": ["<opportunity>", ...]}"#,
        );

        prompt
    }

    /// Scoring prompt for a candidate concept
    pub fn evaluation(topic: &str, candidate: &str) -> String {
        format!(
            r#"You are a strict editor scoring social post concepts.

Original topic:
{topic}

Candidate concept:
{candidate}

Score the candidate from 0 to 100 for clarity, originality, audience fit and risk.
Respond with JSON only, in exactly this shape:
{{"score": <integer 0-100>, "feedback": "<one paragraph of feedback>"}}"#,
            topic = topic,
            candidate = candidate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_a_persona() {
        for role in [
            RoleTag::Skeptic,
            RoleTag::Futurist,
            RoleTag::Realist,
            RoleTag::Contrarian,
            RoleTag::Synthesizer,
        ] {
            assert!(!PromptTemplate::persona(role).is_empty());
        }
    }

    #[test]
    fn test_synthesis_prompt_labels_each_critique() {
        let critiques = vec![
            ("skeptic".to_string(), "Too many claims".to_string()),
            ("realist".to_string(), "No call to action".to_string()),
        ];
        let prompt = PromptTemplate::synthesis("Product launch", &critiques);
        assert!(prompt.contains("--- skeptic ---\nToo many claims"));
        assert!(prompt.contains("--- realist ---\nNo call to action"));
        assert!(prompt.contains("\"concept\""));
    }

    #[test]
    fn test_evaluation_prompt_contains_candidate() {
        let prompt = PromptTemplate::evaluation("Product launch", "Ship it in public");
        assert!(prompt.contains("Ship it in public"));
        assert!(prompt.contains("\"score\""));
    }
}
