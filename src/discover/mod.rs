pub mod crtsh;

pub use crtsh::{CertificateSource, CrtShClient};
