//! Export command implementation.

use super::VocabularyCatalog;
use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the export command.
pub fn execute_export(
    args: ExportArgs,
    catalog: &VocabularyCatalog,
    formatter: &Formatter,
) -> Result<()> {
    let count = catalog.export_vocabulary(&args.path)?;
    println!(
        "{}",
        formatter.success(&format!("Exported {} item(s) to {}", count, args.path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use glossa_domain::traits::VocabularyStore;
    use glossa_store::SqliteStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_file() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        store.insert("obrigado", "Portuguese").unwrap();
        let catalog = VocabularyCatalog::new(store);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vocab.json");

        execute_export(
            ExportArgs { path: path.clone() },
            &catalog,
            &Formatter::new(OutputFormat::Quiet, false),
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("obrigado"));
    }
}
