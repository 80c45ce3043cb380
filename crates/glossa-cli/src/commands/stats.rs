//! Stats command implementation.

use super::VocabularyCatalog;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the stats command.
pub fn execute_stats(catalog: &VocabularyCatalog, formatter: &Formatter) -> Result<()> {
    let items = catalog.vocabulary_list()?;
    println!("{}", formatter.format_stats(&items)?);
    Ok(())
}
