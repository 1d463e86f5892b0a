//! Web 服务器主程序入口

#[cfg(feature = "web")]
use clap::Parser;
#[cfg(feature = "web")]
use renoun::env::EnvConfig;
#[cfg(feature = "web")]
use renoun::substitution::RewritePolicy;
#[cfg(feature = "web")]
use renoun::web::{relay_options_from_env, WebConfig, WebServer};

/// 命令行参数，优先级高于环境变量
#[cfg(feature = "web")]
#[derive(Parser, Debug)]
#[command(name = "renoun-web", version)]
#[command(about = "Fetch web pages and rewrite a proper noun in their visible text", long_about = None)]
struct Args {
    /// Bind address [env: RENOUN_WEB_BIND_ADDRESS, default: 127.0.0.1]
    #[arg(short, long, value_name = "ADDRESS")]
    bind: Option<String>,

    /// Port number [env: RENOUN_WEB_PORT, default: 3001]
    #[arg(short, long)]
    port: Option<u16>,

    /// Upstream timeout in seconds [env: RENOUN_FETCH_TIMEOUT, default: 10]
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..=300))]
    timeout: Option<u64>,

    /// Rewrite policy: broad or phrase [env: RENOUN_REWRITE_POLICY]
    #[arg(long)]
    policy: Option<RewritePolicy>,

    /// TOML rules file, overrides the policy [env: RENOUN_REWRITE_RULES_FILE]
    #[arg(short, long, value_name = "FILE")]
    rules: Option<String>,
}

#[cfg(feature = "web")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 文件可选
    dotenv::dotenv().ok();

    let args = Args::parse();
    let mut env_config = EnvConfig::from_env()?;

    init_logging(&env_config);

    // 命令行参数覆盖环境变量
    if let Some(bind) = args.bind {
        env_config.web_bind_address = bind;
    }
    if let Some(port) = args.port {
        env_config.web_port = port;
    }
    if let Some(timeout) = args.timeout {
        env_config.fetch_timeout = std::time::Duration::from_secs(timeout);
    }
    if let Some(policy) = args.policy {
        env_config.rewrite_policy = policy;
    }
    if let Some(rules) = args.rules {
        env_config.rewrite_rules_file = Some(rules);
    }

    env_config.log_summary();

    let web_config = WebConfig::from_env_config(&env_config);
    web_config.validate()?;

    let relay_options = relay_options_from_env(&env_config)?;
    tracing::info!("已加载 {} 条替换规则", relay_options.rules.len());

    // 启动 Web 服务器
    let server = WebServer::new(web_config, relay_options);
    server.start().await?;

    Ok(())
}

#[cfg(feature = "web")]
fn init_logging(env_config: &EnvConfig) {
    let level = env_config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(!env_config.no_color)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "web"))]
fn main() {
    eprintln!("Error: Web feature not enabled. Please compile with --features web");
    std::process::exit(1);
}
