// Core library for the SCAR charger log analyzer

pub mod analyzer;
pub mod cli;
pub mod codes;
pub mod config;
pub mod config_file;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod stats;
pub mod store;

pub use analyzer::{AnalysisContext, Analyzer, ProgressCallback};
pub use cli::Cli;
pub use config::AnalyzerConfig;
pub use config_file::ConfigFile;
pub use error::{AnalyzeError, ClassifyError};
pub use event::{Action, Connection, ConnectorState, LogEvent, ProtocolMessage};
pub use stats::ProcessingStats;
pub use store::{EventStore, SourceLog};
