pub mod dns_name;

pub use dns_name::{is_dns_name, normalize_line};
