use once_cell::sync::Lazy;
use regex::Regex;
use std::net::IpAddr;

static DNS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})(\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*[._]?$")
        .expect("static dns name pattern")
});

/// Returns true if `s` is a syntactically valid DNS name (not an IP literal).
pub fn is_dns_name(s: &str) -> bool {
    if s.is_empty() || s.replace('.', "").len() > 255 {
        return false;
    }
    if s.parse::<IpAddr>().is_ok() {
        return false;
    }
    DNS_NAME.is_match(s)
}

/// Trims an input line and returns it if it names a domain worth querying.
pub fn normalize_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    is_dns_name(trimmed).then_some(trimmed)
}
