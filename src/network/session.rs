use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::core::{parse_content_type, RelayError, RelayOptions};
use crate::utils::url::{parse_target_url, Url};

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub data: Vec<u8>,
    /// Charset named by the `Content-Type` header, if any
    pub charset: Option<String>,
    pub media_type: String,
}

/// HTTP会话
///
/// 每个请求创建一个会话；会话之间不共享任何状态。
/// 使用阻塞客户端，在异步上下文中需放入 `spawn_blocking`。
pub struct Session {
    client: Client,
    pub options: RelayOptions,
}

impl Session {
    pub fn new(options: RelayOptions) -> Result<Self, RelayError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(options.timeout))
            .danger_accept_invalid_certs(options.insecure);

        if let Some(ref user_agent) = options.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, options })
    }

    /// 抓取目标页面
    ///
    /// 单次尝试，不重试。网络错误、超时和非 2xx 状态都会返回 `UpstreamFetch`。
    pub fn fetch_document(&self, target: &str) -> Result<FetchedDocument, RelayError> {
        let url = parse_target_url(target)?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| self.upstream_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} 返回状态码 {}", url, status);
            return Err(RelayError::UpstreamFetch(format!(
                "{} responded with status {}",
                url, status
            )));
        }

        if response.url() != &url {
            tracing::debug!("重定向至 {}", response.url());
        }

        let (media_type, charset) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(parse_content_type)
            .unwrap_or_default();

        let data = response
            .bytes()
            .map_err(|e| self.upstream_error(&url, e))?
            .to_vec();

        Ok(FetchedDocument {
            data,
            charset: Some(charset).filter(|c| !c.is_empty()),
            media_type,
        })
    }

    fn upstream_error(&self, url: &Url, error: reqwest::Error) -> RelayError {
        if error.is_timeout() {
            tracing::warn!("请求超时: {}", url);
            RelayError::UpstreamFetch(format!(
                "request to {} timed out after {}s",
                url, self.options.timeout
            ))
        } else {
            tracing::warn!("请求失败: {}: {}", url, error);
            RelayError::UpstreamFetch(format!("request to {} failed: {}", url, error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_rejects_invalid_url_without_network() {
        let session = Session::new(RelayOptions::default()).unwrap();
        let result = session.fetch_document("not-a-valid-url");
        assert!(matches!(result, Err(RelayError::InvalidUrl(_))));
    }

    #[test]
    fn test_session_reports_connection_failure() {
        let session = Session::new(RelayOptions {
            timeout: 2,
            ..RelayOptions::default()
        })
        .unwrap();
        // 端口 9 (discard) 在本机上通常没有监听
        let result = session.fetch_document("http://127.0.0.1:9/");
        assert!(matches!(result, Err(RelayError::UpstreamFetch(_))));
    }
}
