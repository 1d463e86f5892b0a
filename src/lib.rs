//! # Renoun Library
//!
//! 抓取网页并替换其可见文本中的专有名词，页面结构与属性保持不变。
//!
//! ## 模块组织
//!
//! - `core` - 错误类型、选项与改写流水线
//! - `substitution` - 替换规则与大小写处理
//! - `parsers` - HTML 解析、文本节点改写与序列化
//! - `network` - 上游页面抓取
//! - `utils` - URL 校验等工具函数
//! - `env` - 环境变量配置
//! - `web` - Web服务器功能（可选）

pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod substitution;
pub mod utils;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use crate::core::{
    fetch_and_rewrite, rewrite_document_from_data, rewrite_html, RelayError, RelayOptions,
};
pub use crate::network::session::{FetchedDocument, Session};
pub use crate::parsers::RewriteReport;
pub use crate::substitution::{CaseMode, RewritePolicy, RuleSet, SubstitutionRule};
