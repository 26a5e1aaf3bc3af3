use rand::seq::SliceRandom;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    Windows,
    Mac,
    Linux,
}

/// Which slice of the signature table to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserAgentProfile {
    /// Any desktop platform
    #[default]
    Desktop,
    Windows,
    Mac,
    Linux,
}

impl UserAgentProfile {
    fn includes(self, platform: Platform) -> bool {
        match self {
            UserAgentProfile::Desktop => true,
            UserAgentProfile::Windows => platform == Platform::Windows,
            UserAgentProfile::Mac => platform == Platform::Mac,
            UserAgentProfile::Linux => platform == Platform::Linux,
        }
    }
}

const USER_AGENTS: &[(Platform, &str)] = &[
    // Chrome
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"),
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"),
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"),
    // Firefox
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:107.0) Gecko/20100101 Firefox/107.0"),
    // Edge
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 Edg/107.0.1418.62"),
    // Opera
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 OPR/93.0.4585.21"),
    (Platform::Windows, "Mozilla/5.0 (Windows NT 10.0; WOW64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 OPR/93.0.4585.21"),
    // macOS
    (Platform::Mac, "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_0_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"),
    (Platform::Mac, "Mozilla/5.0 (Macintosh; Intel Mac OS X 13.0; rv:107.0) Gecko/20100101 Firefox/107.0"),
    (Platform::Mac, "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_0_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15"),
    (Platform::Mac, "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_0_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 Edg/107.0.1418.62"),
    (Platform::Mac, "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_0_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 OPR/93.0.4585.21"),
    // Linux
    (Platform::Linux, "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36"),
    (Platform::Linux, "Mozilla/5.0 (X11; Linux i686; rv:107.0) Gecko/20100101 Firefox/107.0"),
    (Platform::Linux, "Mozilla/5.0 (X11; Linux x86_64; rv:107.0) Gecko/20100101 Firefox/107.0"),
    (Platform::Linux, "Mozilla/5.0 (X11; Ubuntu; Linux i686; rv:107.0) Gecko/20100101 Firefox/107.0"),
    (Platform::Linux, "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:107.0) Gecko/20100101 Firefox/107.0"),
    (Platform::Linux, "Mozilla/5.0 (X11; Fedora; Linux x86_64; rv:107.0) Gecko/20100101 Firefox/107.0"),
    (Platform::Linux, "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36 OPR/93.0.4585.21"),
];

/// All signatures belonging to `profile`, in table order.
pub fn candidates(profile: UserAgentProfile) -> Vec<&'static str> {
    USER_AGENTS
        .iter()
        .filter(|(platform, _)| profile.includes(*platform))
        .map(|(_, ua)| *ua)
        .collect()
}

/// Uniformly random browser signature for `profile`.
pub fn random(profile: UserAgentProfile) -> &'static str {
    let pool = candidates(profile);
    let mut rng = rand::thread_rng();
    // every profile has at least one entry in the table
    pool.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0].1)
}

pub fn random_desktop() -> &'static str {
    random(UserAgentProfile::Desktop)
}
