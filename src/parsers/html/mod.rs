//! HTML解析和处理模块
//!
//! - `utils`: 基础常量与元素分类
//! - `dom`: 解析与基础DOM操作
//! - `metadata`: 文档元数据（标题、字符集）
//! - `serializer`: 序列化功能
//! - `walker`: 文本节点改写遍历

pub mod dom;
pub mod metadata;
pub mod serializer;
pub mod utils;
pub mod walker;

pub use dom::{find_nodes, get_node_attr, html_to_dom, text_content};
pub use metadata::{get_charset, get_title};
pub use serializer::serialize_document;
pub use utils::{is_opaque_element, OPAQUE_ELEMENTS};
pub use walker::{rewrite_text_nodes, visit_text_nodes, RewriteReport};
