use clap::builder::styling::AnsiColor;
use clap::builder::{PossibleValue, Styles};
use clap::{ArgAction, Parser};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::Cyan.on_default())
}

/// Command-line interface definition for the pubproxy fetch tool.
#[derive(Parser, Debug, Clone)]
#[command(styles=get_styles())]
pub struct Cli {
    /// File to write the result.
    #[arg(long)]
    pub savepath: std::path::PathBuf,

    /// The number of proxies to save (max-free: 2, max-premium: 30).
    #[arg(long, default_value = "1")]
    pub amount: u32,

    /// How to format the proxy output.
    #[arg(
        long,
        default_value = "txt",
        value_parser([PossibleValue::new("json"), PossibleValue::new("txt")])
    )]
    pub format: String,

    /// Proxy protocol.
    #[arg(
        long = "type",
        value_parser([
            PossibleValue::new("http"),
            PossibleValue::new("socks4"),
            PossibleValue::new("socks5"),
        ])
    )]
    pub proxy_type: Option<String>,

    /// The proxy anonymity level.
    #[arg(
        long,
        value_parser([PossibleValue::new("anonymous"), PossibleValue::new("elite")])
    )]
    pub level: Option<String>,

    /// The apikey of pubproxy.com.
    #[arg(long)]
    pub apikey: Option<String>,

    /// Only keep proxies that support HTTPS requests.
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_https", help_heading = "Filters")]
    https: bool,

    /// Only keep proxies that do not support HTTPS requests.
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "https", help_heading = "Filters")]
    no_https: bool,

    /// Only keep proxies that support POST requests.
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_post", help_heading = "Filters")]
    post: bool,

    /// Only keep proxies that do not support POST requests.
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "post", help_heading = "Filters")]
    no_post: bool,

    /// Only keep proxies that support the User-Agent header.
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_user_agent", help_heading = "Filters")]
    user_agent: bool,

    /// Only keep proxies that do not support the User-Agent header.
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "user_agent", help_heading = "Filters")]
    no_user_agent: bool,

    /// Log level for application output.
    #[arg(
        long = "log",
        default_value = "off",
        value_parser([
            PossibleValue::new("debug"),
            PossibleValue::new("info"),
            PossibleValue::new("warn"),
            PossibleValue::new("error"),
            PossibleValue::new("trace"),
            PossibleValue::new("off"),
        ])
    )]
    pub log_level: String,
}

impl Cli {
    /// Folds a `--flag`/`--no-flag` pair into one tri-state value, keeping
    /// "omitted" distinct from an explicit `false`.
    fn tri_state(set: bool, unset: bool) -> Option<bool> {
        match (set, unset) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn https_filter(&self) -> Option<bool> {
        Self::tri_state(self.https, self.no_https)
    }

    pub fn post_filter(&self) -> Option<bool> {
        Self::tri_state(self.post, self.no_post)
    }

    pub fn user_agent_filter(&self) -> Option<bool> {
        Self::tri_state(self.user_agent, self.no_user_agent)
    }
}
