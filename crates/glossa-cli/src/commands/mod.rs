//! Command implementations.

pub mod delete;
pub mod export;
pub mod list;
pub mod process;
pub mod show;
pub mod stats;

pub use self::delete::execute_delete;
pub use self::export::execute_export;
pub use self::list::execute_list;
pub use self::process::execute_process;
pub use self::show::execute_show;
pub use self::stats::execute_stats;

use glossa_extractor::Catalog;
use glossa_store::SqliteStore;

/// Vocabulary access used by the read, delete, and export commands.
pub type VocabularyCatalog = Catalog<SqliteStore>;
