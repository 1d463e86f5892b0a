//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。所有配置在启动时读取一次，之后只读。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "RENOUN_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "RENOUN_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "RENOUN_WEB_PORT";
        const DEFAULT: Option<u16> = Some(3001);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (0-65535)".to_string(),
            })
        }
    }
}

/// 抓取相关环境变量
pub mod fetch {
    use super::*;

    /// 上游请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "RENOUN_FETCH_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(10));
        const DESCRIPTION: &'static str = "Upstream fetch timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_timeout(value, Self::NAME)
        }
    }

    /// User-Agent 请求头
    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "RENOUN_FETCH_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent sent to target sites";

        fn parse(value: &str) -> EnvResult<String> {
            let agent = value.trim();
            if agent.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "User agent cannot be empty".to_string(),
                });
            }
            Ok(agent.to_string())
        }
    }

    /// 接受无效证书
    pub struct Insecure;
    impl EnvVar<bool> for Insecure {
        const NAME: &'static str = "RENOUN_FETCH_INSECURE";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Accept invalid TLS certificates from target sites";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }
}

/// 改写规则相关环境变量
pub mod rewrite {
    use super::*;
    use crate::substitution::RewritePolicy;

    /// 规则策略
    pub struct Policy;
    impl EnvVar<RewritePolicy> for Policy {
        const NAME: &'static str = "RENOUN_REWRITE_POLICY";
        const DEFAULT: Option<RewritePolicy> = Some(RewritePolicy::Broad);
        const DESCRIPTION: &'static str = "Rewrite policy: broad, phrase";

        fn parse(value: &str) -> EnvResult<RewritePolicy> {
            value.parse().map_err(|e: crate::core::RelayError| EnvError {
                variable: Self::NAME.to_string(),
                message: e.to_string(),
            })
        }
    }

    /// 被替换的专有名词
    pub struct FromWord;
    impl EnvVar<String> for FromWord {
        const NAME: &'static str = "RENOUN_REWRITE_FROM";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::substitution::DEFAULT_FROM.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Word replaced by the broad policy";

        fn parse(value: &str) -> EnvResult<String> {
            parse_word(value, Self::NAME)
        }
    }

    /// 替换词
    pub struct ToWord;
    impl EnvVar<String> for ToWord {
        const NAME: &'static str = "RENOUN_REWRITE_TO";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::substitution::DEFAULT_TO.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Replacement used by the broad policy";

        fn parse(value: &str) -> EnvResult<String> {
            parse_word(value, Self::NAME)
        }
    }

    /// 规则文件路径
    pub struct RulesFile;
    impl EnvVar<String> for RulesFile {
        const NAME: &'static str = "RENOUN_REWRITE_RULES_FILE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "TOML file with substitution rules (overrides the policy)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_timeout(value: &str, var_name: &str) -> EnvResult<Duration> {
    let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of seconds".to_string(),
    })?;

    if seconds == 0 {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Timeout must be greater than 0".to_string(),
        });
    }

    if seconds > 300 {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Timeout too long (max 300 seconds)".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn parse_word(value: &str, var_name: &str) -> EnvResult<String> {
    let word = value.trim();
    if word.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Value cannot be empty".to_string(),
        });
    }
    Ok(word.to_string())
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    // 核心配置
    pub log_level: String,
    pub no_color: bool,

    // Web配置
    pub web_bind_address: String,
    pub web_port: u16,

    // 抓取配置
    pub fetch_timeout: Duration,
    pub fetch_user_agent: Option<String>,
    pub fetch_insecure: bool,

    // 改写配置
    pub rewrite_policy: crate::substitution::RewritePolicy,
    pub rewrite_from: String,
    pub rewrite_to: String,
    pub rewrite_rules_file: Option<String>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,

            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,

            fetch_timeout: fetch::Timeout::get()?,
            fetch_user_agent: fetch::UserAgent::get().ok(),
            fetch_insecure: fetch::Insecure::get()?,

            rewrite_policy: rewrite::Policy::get()?,
            rewrite_from: rewrite::FromWord::get()?,
            rewrite_to: rewrite::ToWord::get()?,
            rewrite_rules_file: rewrite::RulesFile::get()
                .ok()
                .filter(|path| !path.is_empty()),
        })
    }

    /// 记录配置摘要
    pub fn log_summary(&self) {
        tracing::info!("Environment Configuration Summary:");
        tracing::info!("  Log Level: {}", self.log_level);
        tracing::info!("  Web Server: {}:{}", self.web_bind_address, self.web_port);
        tracing::info!("  Fetch Timeout: {}s", self.fetch_timeout.as_secs());
        match self.rewrite_rules_file {
            Some(ref path) => tracing::info!("  Rewrite Rules: {}", path),
            None => tracing::info!(
                "  Rewrite Policy: {} ({} -> {})",
                self.rewrite_policy,
                self.rewrite_from,
                self.rewrite_to
            ),
        }
    }
}
