/// 内容不可改写的元素：原始文本（脚本、样式等）或不可见内容
pub const OPAQUE_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "noembed", "noframes", "xmp",
];

/// 检查元素内容是否应被视为不透明
pub fn is_opaque_element(tag_name: &str) -> bool {
    OPAQUE_ELEMENTS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(tag_name))
}
