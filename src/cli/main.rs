use argument::Cli;
use clap::Parser;
#[cfg(feature = "log")]
use pubfetch::initialize_logging;
use pubfetch::{
    models::{Format, Level, Protocol},
    Config, ProxyFetcher,
};
use tokio::runtime;

mod argument;

fn main() {
    if let Err(e) = run_application() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run_application() -> anyhow::Result<()> {
    let options = Cli::parse();

    #[cfg(feature = "log")]
    {
        let log_level = match options.log_level.as_str() {
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Off,
        };
        initialize_logging(log_level)?;
    }

    let format = match options.format.as_str() {
        "json" => Format::Json,
        _ => Format::Txt,
    };
    let protocol = options.proxy_type.as_deref().map(|value| match value {
        "socks4" => Protocol::Socks4,
        "socks5" => Protocol::Socks5,
        _ => Protocol::Http,
    });
    let level = options.level.as_deref().map(|value| match value {
        "elite" => Level::Elite,
        _ => Level::Anonymous,
    });

    let https = options.https_filter();
    let post = options.post_filter();
    let user_agent = options.user_agent_filter();

    let config = Config {
        savepath: options.savepath,
        limit: options.amount,
        format,
        protocol,
        level,
        api_key: options.apikey,
        https,
        post,
        user_agent,
    };

    let runtime = runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async {
        let fetcher = ProxyFetcher::new(config);
        fetcher.run().await?;
        Ok(())
    })
}
