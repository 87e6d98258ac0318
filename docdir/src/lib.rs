//! # docdir
//!
//! Resolves the current documents of a collection stored on disk as
//!
//! ```text
//! {root}/{upper}/{lower}/{family}[.{version}].{html|pdf|xls}
//! ```
//!
//! For each accepted type the collection directory is listed, the files are
//! grouped by document family, only the latest version of each family is
//! kept, and the survivors are read into memory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docdir::{DirectoryConfig, DocumentDirectoryService};
//!
//! # async fn run() -> docdir::Result<()> {
//! let service = DocumentDirectoryService::new(DirectoryConfig::new("/srv/documents"));
//!
//! if service.exists("clients", Some("1234")) {
//!     for doc in service.fetch_documents("clients", Some("1234")).await? {
//!         println!("{} ({}) from {}", doc.logical_name, doc.doc_type, doc.path.display());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod document;
mod error;
mod loader;
mod path;
mod scanner;
mod service;
mod version;

pub use config::{DirectoryConfig, ROOT_ENV_VARS};
pub use document::{DocumentRecord, DocumentType};
pub use error::{DirectoryError, Result};
pub use loader::{LoadLimits, load};
pub use path::DocumentLocation;
pub use scanner::scan;
pub use service::DocumentDirectoryService;
pub use version::{VersionOrdering, resolve};
