//! Console output formatter

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use mixalture_domain::{ConversationRecord, OrchestrationOutcome, truncate};

/// Longest prompt shown per line in the history listing
const HISTORY_PROMPT_WIDTH: usize = 70;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_answer(outcome: &OrchestrationOutcome) -> String {
        let mut output = outcome.text().to_string();
        output.push('\n');
        output
    }

    pub fn format_full(question: &str, outcome: &OrchestrationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("mixalture"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));
        let contributors = if outcome.contributors().is_empty() {
            "none".dimmed().to_string()
        } else {
            outcome.contributors().joined()
        };
        output.push_str(&format!("{} {}\n", "Contributors:".cyan().bold(), contributors));
        output.push_str(&format!(
            "{} {}\n",
            "Resolution:".cyan().bold(),
            outcome.resolution()
        ));

        output.push_str(&Self::section_header("Provider Calls"));
        for (i, step) in outcome.steps().iter().enumerate() {
            let mark = if step.succeeded {
                "v".green()
            } else {
                "x".red()
            };
            output.push_str(&format!(
                "  {} {}. {} ({})\n",
                mark,
                i + 1,
                step.stage.display_name(),
                step.provider
            ));
        }

        output.push_str(&Self::section_header("Answer"));
        let answer = if outcome.succeeded() {
            outcome.text().normal()
        } else {
            outcome.text().red()
        };
        output.push_str(&format!("\n{}\n", answer));

        output.push_str(&Self::footer());
        output
    }

    pub fn format_json(question: &str, outcome: &OrchestrationOutcome) -> String {
        let value = serde_json::json!({
            "question": question,
            "response": outcome.text(),
            "success": outcome.succeeded(),
            "models_used": outcome.contributors(),
            "resolution": outcome.resolution(),
            "steps": outcome.steps(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_history(records: &[ConversationRecord]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No conversations recorded.".dimmed());
        }

        let mut output = String::new();
        for record in records {
            let status = if record.succeeded {
                record.contributors.joined().green()
            } else {
                "failed".red()
            };
            output.push_str(&format!(
                "{} {} {} [{}]\n",
                record.id.to_string().dimmed(),
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
                record.user.as_str().cyan().bold(),
                status
            ));
            output.push_str(&format!(
                "    {} {}\n",
                "Q:".bold(),
                truncate(&single_line(&record.prompt), HISTORY_PROMPT_WIDTH)
            ));
            output.push_str(&format!(
                "    {} {}\n",
                "A:".bold(),
                truncate(&single_line(&record.response), HISTORY_PROMPT_WIDTH)
            ));
        }
        output
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
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl OutputFormatter for ConsoleFormatter {
    fn format_answer(&self, outcome: &OrchestrationOutcome) -> String {
        Self::format_answer(outcome)
    }

    fn format_full(&self, question: &str, outcome: &OrchestrationOutcome) -> String {
        Self::format_full(question, outcome)
    }

    fn format_json(&self, question: &str, outcome: &OrchestrationOutcome) -> String {
        Self::format_json(question, outcome)
    }

    fn format_history(&self, records: &[ConversationRecord]) -> String {
        Self::format_history(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mixalture_domain::{
        Contributors, NewConversation, OutputFormat, ProviderId, RecordId, Resolution,
        SAFE_FALLBACK_MESSAGE, Stage, StageStep, UserName,
    };

    fn synthesized() -> OrchestrationOutcome {
        OrchestrationOutcome::resolve(
            Resolution::Synthesized,
            "Final answer",
            vec![
                StageStep::new(Stage::Drafting, ProviderId::Primary, true),
                StageStep::new(Stage::Critiquing, ProviderId::Secondary, true),
                StageStep::new(Stage::Synthesizing, ProviderId::Primary, true),
            ],
        )
    }

    #[test]
    fn test_answer_is_just_the_text() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::format_answer(&synthesized()), "Final answer\n");
    }

    #[test]
    fn test_full_lists_every_call() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_full("What is Rust?", &synthesized());
        assert!(output.contains("What is Rust?"));
        assert!(output.contains("primary,secondary"));
        assert!(output.contains("1. "));
        assert!(output.contains("3. "));
        assert!(output.contains("Final answer"));
    }

    #[test]
    fn test_json_shape() {
        let exhausted = OrchestrationOutcome::exhausted(vec![
            StageStep::new(Stage::Drafting, ProviderId::Primary, false),
            StageStep::new(Stage::Drafting, ProviderId::Secondary, false),
        ]);
        let output = ConsoleFormatter.format(OutputFormat::Json, "hi", &exhausted);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["question"], "hi");
        assert_eq!(value["response"], SAFE_FALLBACK_MESSAGE);
        assert_eq!(value["success"], false);
        assert_eq!(value["models_used"], serde_json::json!([]));
        assert_eq!(value["steps"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_history_listing() {
        colored::control::set_override(false);
        let record = ConversationRecord::new(
            RecordId(7),
            NewConversation {
                user: UserName::try_new("alice").unwrap(),
                prompt: "What\nis Rust?".to_string(),
                response: "A language.".to_string(),
                contributors: Contributors::both(),
                succeeded: true,
            },
            Utc::now(),
        );

        let output = ConsoleFormatter::format_history(&[record]);
        assert!(output.contains("#7"));
        assert!(output.contains("alice"));
        assert!(output.contains("What is Rust?"));
        assert!(ConsoleFormatter::format_history(&[]).contains("No conversations"));
    }
}
