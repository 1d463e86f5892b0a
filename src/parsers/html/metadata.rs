//! HTML 文档元数据处理模块
//!
//! 提取文档标题和字符编码声明。

use markup5ever_rcdom::Handle;

use crate::core::parse_content_type;

use super::dom::{find_nodes, get_node_attr, text_content};

/// 获取文档声明的字符集
///
/// 支持 `<meta charset="...">` 和
/// `<meta http-equiv="content-type" content="text/html; charset=...">` 两种格式。
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, &["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset) =
                    parse_content_type(&meta_content_type_node_attr_value);
                if !charset.is_empty() {
                    return Some(charset);
                }
            }
        }
    }

    None
}

/// 获取文档标题
pub fn get_title(node: &Handle) -> Option<String> {
    find_nodes(node, &["html", "head", "title"])
        .first()
        .map(text_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::html_to_dom;

    #[test]
    fn test_get_charset_meta_charset() {
        let dom = html_to_dom(b"<head><meta charset=\"iso-8859-2\"></head>", "utf-8").unwrap();
        assert_eq!(get_charset(&dom.document).as_deref(), Some("iso-8859-2"));
    }

    #[test]
    fn test_get_charset_http_equiv() {
        let dom = html_to_dom(
            b"<head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=koi8-r\"></head>",
            "utf-8",
        )
        .unwrap();
        assert_eq!(get_charset(&dom.document).as_deref(), Some("koi8-r"));
    }

    #[test]
    fn test_get_charset_missing() {
        let dom = html_to_dom(b"<p>no meta</p>", "utf-8").unwrap();
        assert_eq!(get_charset(&dom.document), None);
    }

    #[test]
    fn test_get_title() {
        let dom = html_to_dom(b"<title>Yale University Test Page</title>", "utf-8").unwrap();
        assert_eq!(
            get_title(&dom.document).as_deref(),
            Some("Yale University Test Page")
        );

        let dom = html_to_dom(b"<p>untitled</p>", "utf-8").unwrap();
        assert_eq!(get_title(&dom.document), None);
    }
}
