use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::models::{Format, Level, Protocol};

/// Characters that cannot appear raw inside a query value.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'%')
    .add(b'\'');

/// Options for a single request against the pubproxy.com API.
///
/// Created once from command-line input and never mutated afterwards. Every
/// field except `savepath` is optional on the wire; unset fields are simply
/// left out of the query string.
#[derive(Debug, Clone)]
pub struct Config {
    /// File to write the raw API response to.
    pub savepath: PathBuf,
    /// Number of proxies to request (max-free: 2, max-premium: 30).
    pub limit: u32,
    /// How the API should format the proxy list.
    pub format: Format,
    /// Proxy protocol filter.
    pub protocol: Option<Protocol>,
    /// Anonymity level filter.
    pub level: Option<Level>,
    /// The apikey of pubproxy.com.
    pub api_key: Option<String>,
    /// Only proxies that do (`true`) or do not (`false`) support HTTPS
    /// requests; `None` leaves the capability unfiltered.
    pub https: Option<bool>,
    /// Same tri-state filter for POST support.
    pub post: Option<bool>,
    /// Same tri-state filter for User-Agent support.
    pub user_agent: Option<bool>,
}

impl Config {
    /// Creates a configuration with the given output path and every filter
    /// left unset.
    pub fn new(savepath: impl Into<PathBuf>) -> Self {
        Self {
            savepath: savepath.into(),
            limit: 1,
            format: Format::default(),
            protocol: None,
            level: None,
            api_key: None,
            https: None,
            post: None,
            user_agent: None,
        }
    }

    /// Derives the wire query parameters from this configuration.
    ///
    /// Unset fields and the output path are dropped, booleans render as the
    /// literal strings `true`/`false`, integers as decimal strings, and every
    /// value is percent-encoded.
    ///
    /// # Returns
    ///
    /// The `(name, value)` pairs in their wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("format", self.format.to_string()),
        ];
        if let Some(protocol) = &self.protocol {
            pairs.push(("type", protocol.to_string()));
        }
        if let Some(level) = &self.level {
            pairs.push(("level", level.to_string()));
        }
        if let Some(api_key) = &self.api_key {
            pairs.push(("api", api_key.clone()));
        }
        for (name, flag) in [
            ("https", self.https),
            ("post", self.post),
            ("user_agent", self.user_agent),
        ] {
            if let Some(value) = flag {
                pairs.push((name, value.to_string()));
            }
        }

        pairs
            .into_iter()
            .map(|(name, value)| (name, utf8_percent_encode(&value, QUERY_VALUE).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_has_only_limit_and_format() {
        let config = Config::new("proxies.txt");
        let pairs = config.query_pairs();
        assert_eq!(
            pairs,
            vec![("limit", "1".to_string()), ("format", "txt".to_string())]
        );
    }

    #[test]
    fn booleans_render_as_literal_words() {
        let mut config = Config::new("proxies.txt");
        config.https = Some(true);
        config.post = Some(false);
        let pairs = config.query_pairs();
        assert!(pairs.contains(&("https", "true".to_string())));
        assert!(pairs.contains(&("post", "false".to_string())));
        assert!(!pairs.iter().any(|(name, _)| *name == "user_agent"));
    }

    #[test]
    fn full_configuration_keeps_wire_order() {
        let config = Config {
            savepath: "out.json".into(),
            limit: 5,
            format: Format::Json,
            protocol: Some(Protocol::Socks5),
            level: Some(Level::Elite),
            api_key: Some("secret".to_string()),
            https: Some(true),
            post: Some(true),
            user_agent: Some(false),
        };
        let names: Vec<_> = config.query_pairs().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["limit", "format", "type", "level", "api", "https", "post", "user_agent"]
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let mut config = Config::new("out.txt");
        config.api_key = Some("key with spaces&chars".to_string());
        let pairs = config.query_pairs();
        let api = pairs.iter().find(|(name, _)| *name == "api").unwrap();
        assert_eq!(api.1, "key%20with%20spaces%26chars");
    }
}
