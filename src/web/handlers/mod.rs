//! Web 路由处理器

pub mod fetch;

pub use fetch::*;
