//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use crate::core::{RelayError, RelayOptions, DEFAULT_USER_AGENT};
use crate::env::{EnvConfig, EnvError, EnvResult};
use crate::substitution::RuleSet;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口，0 表示由系统分配
    pub port: u16,
}

impl WebConfig {
    /// 从已加载的环境配置创建
    pub fn from_env_config(env_config: &EnvConfig) -> Self {
        Self {
            bind_addr: env_config.web_bind_address.clone(),
            port: env_config.web_port,
        }
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.trim().is_empty() {
            return Err(EnvError {
                variable: "RENOUN_WEB_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// 监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// 根据环境配置构建改写选项
///
/// 配置了规则文件时忽略策略与替换词。
pub fn relay_options_from_env(env_config: &EnvConfig) -> Result<RelayOptions, RelayError> {
    let rules = match env_config.rewrite_rules_file {
        Some(ref path) => RuleSet::from_file(path)?,
        None => RuleSet::from_policy(
            env_config.rewrite_policy,
            &env_config.rewrite_from,
            &env_config.rewrite_to,
        )?,
    };

    Ok(RelayOptions {
        insecure: env_config.fetch_insecure,
        rules,
        timeout: env_config.fetch_timeout.as_secs(),
        user_agent: Some(
            env_config
                .fetch_user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        ),
    })
}
