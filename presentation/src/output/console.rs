//! Console output formatter for Council results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{DebateResult, LoopResult};

/// Formats Council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full report of a single debate round
    pub fn format_debate(topic: &str, result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Content Council: Debate"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), topic));

        output.push_str(&Self::section_header("Critiques"));
        for critique in result.sorted_by_roster() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", critique.label()).yellow().bold(),
                critique.content
            ));
        }

        output.push_str(&Self::section_header("Hardened Concept"));
        output.push_str(&format!("\n{}\n", result.synthesized_concept));
        output.push_str(&Self::bullets("Risks:", &result.risks));
        output.push_str(&Self::bullets("Opportunities:", &result.opportunities));

        output.push_str(&Self::footer());
        output
    }

    /// Full report of a refinement run
    pub fn format_loop(topic: &str, result: &LoopResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Content Council: Refinement"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), topic));
        output.push_str(&format!(
            "{} {} after {} iteration(s)\n",
            "Status:".cyan().bold(),
            Self::status(result),
            result.iteration_count
        ));

        output.push_str(&Self::section_header("Score History"));
        for record in &result.history {
            output.push_str(&format!(
                "\n{} {:>5.1}\n{}\n",
                format!("Iteration {}:", record.iteration).bold(),
                record.score,
                Self::indent(&record.feedback, "    ")
            ));
        }
        if let Some(best) = result.best_iteration()
            && best.iteration != result.iteration_count
        {
            output.push_str(&format!(
                "\n{}\n",
                format!(
                    "Note: iteration {} scored highest ({:.1}); the final concept is from iteration {}.",
                    best.iteration, best.score, result.iteration_count
                )
                .dimmed()
            ));
        }

        output.push_str(&Self::section_header("Final Concept"));
        output.push_str(&format!("\n{}\n", result.final_concept));

        output.push_str(&Self::footer());
        output
    }

    /// Final concept of a refinement run, with its score
    pub fn format_loop_concept(result: &LoopResult) -> String {
        format!(
            "{} {} ({:.0}/100, {})\n\n{}\n",
            "===".cyan(),
            "Final Concept".cyan().bold(),
            result.final_score,
            Self::status(result),
            result.final_concept
        )
    }

    pub fn format_debate_concept(result: &DebateResult) -> String {
        format!(
            "{} {}\n\n{}\n",
            "===".cyan(),
            "Hardened Concept".cyan().bold(),
            result.synthesized_concept
        )
    }

    /// JSON document wrapping `result` together with its topic
    pub fn to_json<T: serde::Serialize>(topic: &str, result: &T) -> String {
        let doc = serde_json::json!({
            "topic": topic,
            "result": result,
        });
        serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
    }

    fn status(result: &LoopResult) -> String {
        if result.is_converged() {
            result.status.to_string().green().bold().to_string()
        } else {
            result.status.to_string().yellow().to_string()
        }
    }

    fn bullets(title: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        let mut out = format!("\n{}\n", title.cyan().bold());
        for item in items {
            out.push_str(&format!("  * {}\n", item));
        }
        out
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter<LoopResult> for ConsoleFormatter {
    fn format(&self, topic: &str, result: &LoopResult) -> String {
        Self::format_loop(topic, result)
    }

    fn format_json(&self, topic: &str, result: &LoopResult) -> String {
        Self::to_json(topic, result)
    }

    fn format_concept_only(&self, _topic: &str, result: &LoopResult) -> String {
        Self::format_loop_concept(result)
    }
}

impl OutputFormatter<DebateResult> for ConsoleFormatter {
    fn format(&self, topic: &str, result: &DebateResult) -> String {
        Self::format_debate(topic, result)
    }

    fn format_json(&self, topic: &str, result: &DebateResult) -> String {
        Self::to_json(topic, result)
    }

    fn format_concept_only(&self, _topic: &str, result: &DebateResult) -> String {
        Self::format_debate_concept(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AgentRoster, CritiqueMessage, HardenedConcept, IterationRecord, LoopStatus, OutputFormat,
        RoleTag,
    };

    fn loop_result() -> LoopResult {
        LoopResult {
            final_concept: "Ship notes as a thread".to_string(),
            final_score: 72.0,
            iteration_count: 2,
            status: LoopStatus::Exhausted,
            history: vec![
                IterationRecord {
                    iteration: 1,
                    score: 80.0,
                    feedback: "strong hook".to_string(),
                },
                IterationRecord {
                    iteration: 2,
                    score: 72.0,
                    feedback: "lost focus".to_string(),
                },
            ],
        }
    }

    fn debate_result() -> DebateResult {
        let critiques = vec![
            CritiqueMessage::new(AgentRoster::by_role(RoleTag::Realist), "too long"),
            CritiqueMessage::new(AgentRoster::by_role(RoleTag::Skeptic), "legal risk"),
        ];
        DebateResult::new(
            critiques,
            HardenedConcept::new("Short, vetted post").with_risks(vec!["tone".to_string()]),
        )
    }

    #[test]
    fn test_full_loop_report() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(OutputFormat::Full, "Release post", &loop_result());

        assert!(text.contains("Release post"));
        assert!(text.contains("strong hook"));
        assert!(text.contains("Ship notes as a thread"));
        assert!(text.contains("iteration 1 scored highest"));
    }

    #[test]
    fn test_concept_only_loop() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(OutputFormat::Concept, "Release post", &loop_result());
        assert!(text.contains("Ship notes as a thread"));
        assert!(text.contains("72/100"));
        assert!(!text.contains("strong hook"));
    }

    #[test]
    fn test_json_is_parseable() {
        let text = ConsoleFormatter.render(OutputFormat::Json, "Release post", &loop_result());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["topic"], "Release post");
        assert_eq!(value["result"]["iteration_count"], 2);
        assert_eq!(value["result"]["history"][1]["score"], 72.0);
    }

    #[test]
    fn test_debate_report_lists_critiques_in_roster_order() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(OutputFormat::Full, "Teaser", &debate_result());

        let skeptic = text.find("legal risk").unwrap();
        let realist = text.find("too long").unwrap();
        assert!(skeptic < realist);
        assert!(text.contains("Short, vetted post"));
        assert!(text.contains("* tone"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
