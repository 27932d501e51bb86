//! # Reencoder Module
//!
//! Separa le responsabilità in sottomoduli:
//! - `batch`: Orchestratore della run
//! - `task`: Pipeline per singolo file
//! - `path_resolver`: Calcolo del path finale

pub mod batch;
pub mod path_resolver;
pub mod task;

pub use batch::BatchReencoder;
pub use path_resolver::PathResolver;
pub use task::TaskReencoder;
