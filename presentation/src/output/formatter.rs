//! Output formatter trait

use council_domain::OutputFormat;

/// Trait for formatting a Council result for a given topic
pub trait OutputFormatter<R> {
    /// Everything: critiques, synthesis, scores
    fn format(&self, topic: &str, result: &R) -> String;

    /// Format as JSON
    fn format_json(&self, topic: &str, result: &R) -> String;

    /// The final concept only (concise output)
    fn format_concept_only(&self, topic: &str, result: &R) -> String;

    fn render(&self, format: OutputFormat, topic: &str, result: &R) -> String {
        match format {
            OutputFormat::Full => self.format(topic, result),
            OutputFormat::Concept => self.format_concept_only(topic, result),
            OutputFormat::Json => self.format_json(topic, result),
        }
    }
}
