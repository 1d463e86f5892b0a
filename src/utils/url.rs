pub use url::Url;

use crate::core::RelayError;

/// 校验并解析要抓取的目标
///
/// 只接受语法正确的绝对 http(s) URL。
pub fn parse_target_url(target: &str) -> Result<Url, RelayError> {
    let target = target.trim();

    let parsed_url =
        Url::parse(target).map_err(|e| RelayError::InvalidUrl(format!("{}: {}", target, e)))?;

    match parsed_url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(RelayError::InvalidUrl(format!(
                "{}: unsupported scheme \"{}\"",
                target, scheme
            )))
        }
    }

    if parsed_url.host_str().map_or(true, str::is_empty) {
        return Err(RelayError::InvalidUrl(format!("{}: missing host", target)));
    }

    Ok(parsed_url)
}
