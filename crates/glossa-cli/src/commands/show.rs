//! Show command implementation.

use super::VocabularyCatalog;
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the show command.
pub fn execute_show(
    args: ShowArgs,
    catalog: &VocabularyCatalog,
    formatter: &Formatter,
) -> Result<()> {
    let item = catalog.vocabulary(args.id)?;
    println!("{}", formatter.format_item(&item)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use glossa_domain::VocabularyId;
    use glossa_store::SqliteStore;
    use std::sync::Arc;

    #[test]
    fn test_show_missing_item() {
        let catalog = VocabularyCatalog::new(Arc::new(SqliteStore::new(":memory:").unwrap()));
        let result = execute_show(
            ShowArgs {
                id: VocabularyId::from_value(42),
            },
            &catalog,
            &Formatter::new(OutputFormat::Json, false),
        );

        match result {
            Err(CliError::Vocabulary(e)) => assert!(e.to_string().contains("42")),
            other => panic!("Expected not-found error, got {:?}", other),
        }
    }
}
