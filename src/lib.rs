pub mod config;
pub mod discover;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod resolve;
pub mod user_agent;

// re-export the pieces a caller needs to run a discovery
pub use crate::config::RunConfig;
pub use crate::discover::{CertificateSource, CrtShClient};
pub use crate::error::{FetchError, PipelineError, ResolveError, StartupError};
pub use crate::pipeline::{Pipeline, RunSummary};
pub use crate::resolve::{DnsResolver, HostResolver};
