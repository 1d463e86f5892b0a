//! # 网络模块
//!
//! 负责对目标网页的单次抓取。
//!
//! # 模块组织
//!
//! - `session` - HTTP会话：URL校验、带超时的GET请求、字符集识别

pub mod session;

// Re-export commonly used items for convenience
pub use session::{FetchedDocument, Session};
