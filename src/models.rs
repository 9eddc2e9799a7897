use std::fmt::Display;

/// Proxy protocol filter accepted by the API's `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Socks4,
    Socks5,
}

impl Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Socks4 => write!(f, "socks4"),
            Self::Socks5 => write!(f, "socks5"),
        }
    }
}

/// Anonymity level filter accepted by the API's `level` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Anonymous,
    Elite,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Elite => write!(f, "elite"),
        }
    }
}

/// Output format the API should render the proxy list in.
///
/// The encoding of the saved file is decided by the API, not by this tool;
/// this value is passed through as the `format` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Json,
    #[default]
    Txt,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Txt => write!(f, "txt"),
        }
    }
}
