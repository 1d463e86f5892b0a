//! # 解析器模块
//!
//! HTML解析、文本节点改写与序列化。
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、DOM操作、元数据处理、文本改写

pub mod html;

// Re-export commonly used items for convenience
pub use html::{
    get_charset, get_title, html_to_dom, rewrite_text_nodes, serialize_document, RewriteReport,
};
