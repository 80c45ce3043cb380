//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use glossa_domain::{ProcessingResult, VocabularyItem};
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format vocabulary items.
    pub fn format_vocabulary(&self, items: &[VocabularyItem]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
            OutputFormat::Table => Ok(self.format_vocabulary_table(items)),
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|item| item.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single vocabulary item.
    pub fn format_item(&self, item: &VocabularyItem) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
            _ => self.format_vocabulary(std::slice::from_ref(item)),
        }
    }

    fn format_vocabulary_table(&self, items: &[VocabularyItem]) -> String {
        if items.is_empty() {
            return self.colorize("No vocabulary found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Text", "Language"]);
        for item in items {
            builder.push_record([item.id.to_string(), item.text.clone(), item.language.clone()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the summary of a processing run.
    pub fn format_result(&self, result: &ProcessingResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(result.new_vocabulary().to_string()),
            OutputFormat::Table => {
                let headline = self.success(&format!("Processed {}", result.file_path()));
                Ok(format!(
                    "{}\n  Language:           {}\n  New vocabulary:     {}\n  Skipped duplicates: {}\n  Total processed:    {}",
                    headline,
                    result.language(),
                    result.new_vocabulary(),
                    result.skipped_duplicates(),
                    result.total_processed()
                ))
            }
        }
    }

    /// Format vocabulary counts, overall and per language.
    pub fn format_stats(&self, items: &[VocabularyItem]) -> Result<String> {
        let mut by_language: BTreeMap<&str, usize> = BTreeMap::new();
        for item in items {
            *by_language.entry(item.language.as_str()).or_default() += 1;
        }

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "total_vocabulary": items.len(),
                "by_language": by_language,
            }))?),
            OutputFormat::Quiet => Ok(items.len().to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Language", "Items"]);
                for (language, count) in &by_language {
                    builder.push_record([language.to_string(), count.to_string()]);
                }
                builder.push_record(["Total".to_string(), items.len().to_string()]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_domain::VocabularyId;

    fn item(id: i64, text: &str, language: &str) -> VocabularyItem {
        VocabularyItem {
            id: VocabularyId::from_value(id),
            text: text.to_string(),
            language: language.to_string(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_vocabulary(&[item(1, "hola", "Spanish")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["text"], "hola");
        assert_eq!(parsed[0]["id"], 1);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_vocabulary(&[item(3, "ciao", "Italian"), item(2, "grazie", "Italian")])
            .unwrap();
        assert_eq!(output, "3\n2");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_vocabulary(&[item(1, "merci", "French")]).unwrap();
        assert!(output.contains("Text"));
        assert!(output.contains("merci"));
    }

    #[test]
    fn test_empty_vocabulary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_vocabulary(&[]).unwrap();
        assert!(output.contains("No vocabulary found"));
    }

    #[test]
    fn test_result_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = ProcessingResult::new(3, 1, "Spanish", "lesson1.pdf");
        let output = formatter.format_result(&result).unwrap();
        assert!(output.starts_with("✓ Processed lesson1.pdf"));
        assert!(output.contains("Total processed:    4"));

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_result(&result).unwrap(), "3");
    }

    #[test]
    fn test_stats_json_counts_languages() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let items = [
            item(1, "hola", "Spanish"),
            item(2, "ciao", "Italian"),
            item(3, "adiós", "Spanish"),
        ];
        let parsed: serde_json::Value =
            serde_json::from_str(&formatter.format_stats(&items).unwrap()).unwrap();
        assert_eq!(parsed["total_vocabulary"], 3);
        assert_eq!(parsed["by_language"]["Spanish"], 2);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
