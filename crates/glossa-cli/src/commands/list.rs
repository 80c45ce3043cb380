//! List command implementation.

use super::VocabularyCatalog;
use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the list command.
pub fn execute_list(
    args: ListArgs,
    catalog: &VocabularyCatalog,
    formatter: &Formatter,
) -> Result<()> {
    let items = match args.language.as_deref() {
        Some(language) => catalog.vocabulary_by_language(language)?,
        None => catalog.vocabulary_list()?,
    };

    println!("{}", formatter.format_vocabulary(&items)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use glossa_domain::traits::VocabularyStore;
    use glossa_store::SqliteStore;
    use std::sync::Arc;

    #[test]
    fn test_list_with_and_without_filter() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        store.insert("hola", "Spanish").unwrap();
        let catalog = VocabularyCatalog::new(store);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_list(ListArgs { language: None }, &catalog, &formatter).unwrap();
        execute_list(
            ListArgs {
                language: Some("Italian".to_string()),
            },
            &catalog,
            &formatter,
        )
        .unwrap();
    }
}
