//! Delete command implementation.

use super::VocabularyCatalog;
use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::io::{self, Write};

/// Execute the delete command.
pub fn execute_delete(
    args: DeleteArgs,
    catalog: &VocabularyCatalog,
    formatter: &Formatter,
) -> Result<()> {
    // Fails with not-found before prompting
    let item = catalog.vocabulary(args.id)?;

    if !args.yes {
        print!("Delete '{}' ({})? [y/N] ", item.text, item.id);
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    catalog.delete_vocabulary(args.id)?;
    println!("{}", formatter.success(&format!("Deleted '{}'", item.text)));
    Ok(())
}
