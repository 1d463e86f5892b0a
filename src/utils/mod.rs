//! # 工具模块
//!
//! # 模块组织
//!
//! - `url` - 目标URL校验

pub mod url;

// Re-export commonly used items for convenience
pub use self::url::{parse_target_url, Url};
