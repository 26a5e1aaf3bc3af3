use thiserror::Error;

/// Failure of a single certificate query. Never fatal to the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("got status {status} from certificate endpoint while requesting {domain}")]
    BadStatus { status: u16, domain: String },

    #[error("request to certificate endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode certificate response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The resolver could not decide whether a host exists.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("dns lookup for {host} failed: {reason}")]
    Lookup { host: String, reason: String },
}

/// Conditions detected before any work is started.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("stdin is an interactive terminal; pipe a list of domains into this tool")]
    InteractiveStdin,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("error while reading stdin: {0}")]
    Input(#[source] std::io::Error),

    #[error("error while writing results: {0}")]
    Output(#[source] std::io::Error),

    #[error("pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
