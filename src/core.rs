use encoding_rs::{Encoding, UTF_8};
use markup5ever_rcdom::RcDom;
use thiserror::Error;

use crate::network::session::Session;
use crate::parsers::html::{get_charset, get_title, html_to_dom, rewrite_text_nodes, serialize_document};
use crate::substitution::RuleSet;

/// Errors that can occur while relaying and rewriting a document
///
/// Every variant is terminal for the request it belongs to; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// A required request field is absent or empty
    #[error("{0} is required")]
    MissingParameter(String),

    /// The request body could not be understood
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The target is not a well-formed absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network failure, timeout or non-2xx answer from the target site
    #[error("{0}")]
    UpstreamFetch(String),

    /// The document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Startup configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal failure (e.g. a worker task died)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status code reported to the caller for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::MissingParameter(_) | RelayError::InvalidBody(_) => 400,
            RelayError::InvalidUrl(_)
            | RelayError::UpstreamFetch(_)
            | RelayError::Parse(_)
            | RelayError::Config(_)
            | RelayError::Internal(_) => 500,
        }
    }

    /// Whether the caller is to blame
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Configuration options for fetching and rewriting
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct RelayOptions {
    /// Accept invalid TLS certificates from the target site
    pub insecure: bool,
    /// Ordered substitution rules applied to every text node
    pub rules: RuleSet,
    /// Upstream timeout in seconds
    pub timeout: u64,
    pub user_agent: Option<String>,
}

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("renoun/", env!("CARGO_PKG_VERSION"));

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            insecure: false,
            rules: RuleSet::default(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

/// Rewrites a document held in memory
///
/// # Arguments
///
/// * `rules` - Substitution rules to apply
/// * `input_data` - Raw HTML data as bytes
/// * `input_encoding` - Transport-level charset; when absent the document's own
///   `<meta>` declaration is used, then UTF-8
///
/// # Returns
///
/// The rewritten HTML together with the (rewritten) document title, if any.
///
/// # Examples
///
/// ```
/// use renoun::core::rewrite_document_from_data;
/// use renoun::substitution::RuleSet;
///
/// let html = b"<html><head><title>Yale</title></head><body>Hi</body></html>";
/// let (output, title) = rewrite_document_from_data(&RuleSet::default(), html, None).unwrap();
/// assert!(output.contains("<title>Fale</title>"));
/// assert_eq!(title.as_deref(), Some("Fale"));
/// ```
pub fn rewrite_document_from_data(
    rules: &RuleSet,
    input_data: &[u8],
    input_encoding: Option<String>,
) -> Result<(String, Option<String>), RelayError> {
    let processor = DocumentProcessor::new(rules);
    processor.process_document(input_data, input_encoding)
}

/// Rewrites an HTML string and returns only the resulting markup
pub fn rewrite_html(rules: &RuleSet, html: &str) -> Result<String, RelayError> {
    rewrite_document_from_data(rules, html.as_bytes(), Some("utf-8".to_string()))
        .map(|(output, _)| output)
}

/// Fetches the target page and rewrites it
///
/// One outbound request is made; a failed fetch never produces partial output.
pub fn fetch_and_rewrite(
    session: &Session,
    target: &str,
) -> Result<(String, Option<String>), RelayError> {
    let document = session.fetch_document(target)?;
    tracing::debug!(
        "获取到 {} 字节, 类型: {}, 编码: {}",
        document.data.len(),
        document.media_type,
        document.charset.as_deref().unwrap_or("-")
    );

    rewrite_document_from_data(
        &session.options.rules,
        &document.data,
        document.charset,
    )
}

/// Parses Content-Type header value into media type and charset
///
/// Parameter names are matched case-insensitively.
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut parts = content_type.split(';');
    let media_type = parts.next().unwrap_or_default().trim().to_lowercase();
    let mut charset = String::new();

    for part in parts {
        if let Some((name, value)) = part.split_once('=') {
            if name.trim().eq_ignore_ascii_case("charset") {
                charset = value.trim().trim_matches('"').to_string();
            }
        }
    }

    (media_type, charset)
}

/// 文档处理器，负责协调解析、改写和序列化
pub struct DocumentProcessor<'a> {
    rules: &'a RuleSet,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// 处理文档数据并返回最终结果
    pub fn process_document(
        &self,
        input_data: &[u8],
        input_encoding: Option<String>,
    ) -> Result<(String, Option<String>), RelayError> {
        // 1. 确定编码并解析
        let encoding_processor = EncodingProcessor::new();
        let dom = encoding_processor.process_encoding(input_data, input_encoding)?;

        // 2. 改写文本节点
        let report = rewrite_text_nodes(&dom.document, self.rules);
        tracing::debug!(
            "文本节点: {}, 已改写: {}, 替换次数: {}",
            report.text_nodes,
            report.rewritten_nodes,
            report.replacements
        );

        // 3. 序列化
        let document_title = get_title(&dom.document);
        let output = self.format_output(dom)?;

        Ok((output, document_title))
    }

    fn format_output(&self, dom: RcDom) -> Result<String, RelayError> {
        serialize_document(dom)
    }
}

/// 编码处理器
pub struct EncodingProcessor;

impl EncodingProcessor {
    pub fn new() -> Self {
        Self
    }

    /// 解析文档
    ///
    /// 传输层声明的字符集优先；未声明时才采用文档内 `<meta>` 声明的字符集。
    pub fn process_encoding(
        &self,
        input_data: &[u8],
        input_encoding: Option<String>,
    ) -> Result<RcDom, RelayError> {
        let declared = input_encoding
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .and_then(|label| Encoding::for_label(label.as_bytes()));

        if let Some(encoding) = declared {
            return html_to_dom(input_data, encoding.name());
        }

        // 初始解析
        let dom = html_to_dom(input_data, UTF_8.name())?;

        // UTF-16 声明出现在 ASCII 兼容的字节中时按 UTF-8 处理
        if let Some(html_charset) = get_charset(&dom.document) {
            if let Some(document_charset) =
                Encoding::for_label_no_replacement(html_charset.trim().as_bytes())
            {
                let document_charset = document_charset.output_encoding();
                if document_charset != UTF_8 {
                    tracing::debug!("按文档声明的字符集重新解析: {}", document_charset.name());
                    return html_to_dom(input_data, document_charset.name());
                }
            }
        }

        Ok(dom)
    }
}

impl Default for EncodingProcessor {
    fn default() -> Self {
        Self::new()
    }
}
