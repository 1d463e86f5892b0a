use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::RelayError;

/// 将 HTML 字节转换为 DOM
///
/// 未知的编码标签按 UTF-8 处理；解析器对畸形标记是容错的。
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> Result<RcDom, RelayError> {
    let s: String = match Encoding::for_label(document_encoding.trim().as_bytes()) {
        Some(encoding) => {
            let (string, _, _) = encoding.decode(data);
            string.into_owned()
        }
        None => String::from_utf8_lossy(data).into_owned(),
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .map_err(|e| RelayError::Parse(e.to_string()))
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    let (node_name, remaining) = match node_names.split_first() {
        Some(split) => split,
        None => return found_nodes,
    };

    match node.data {
        NodeData::Element { ref name, .. } if &*name.local == *node_name => {
            if remaining.is_empty() {
                found_nodes.push(node.clone());
                for child_node in node.children.borrow().iter() {
                    found_nodes.append(&mut find_nodes(child_node, node_names));
                }
            } else {
                for child_node in node.children.borrow().iter() {
                    found_nodes.append(&mut find_nodes(child_node, remaining));
                }
            }
        }
        _ => {
            for child_node in node.children.borrow().iter() {
                found_nodes.append(&mut find_nodes(child_node, node_names));
            }
        }
    }

    found_nodes
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 收集节点下所有文本（按文档顺序拼接）
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, text: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        text.push_str(&contents.borrow());
    }
    for child_node in node.children.borrow().iter() {
        collect_text(child_node, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_dom_tolerates_malformed_markup() {
        let dom = html_to_dom(b"<div><p>Unclosed <b>tags", "utf-8").unwrap();
        let paragraphs = find_nodes(&dom.document, &["html", "body", "p"]);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(text_content(&paragraphs[0]), "Unclosed tags");
    }

    #[test]
    fn test_html_to_dom_unknown_encoding_falls_back_to_utf8() {
        let dom = html_to_dom("<p>héllo</p>".as_bytes(), "no-such-charset").unwrap();
        let paragraphs = find_nodes(&dom.document, &["p"]);
        assert_eq!(text_content(&paragraphs[0]), "héllo");
    }

    #[test]
    fn test_get_node_attr() {
        let dom = html_to_dom(b"<img alt=\"Yale Logo\" src=\"logo.png\">", "utf-8").unwrap();
        let images = find_nodes(&dom.document, &["img"]);
        assert_eq!(images.len(), 1);
        assert_eq!(get_node_attr(&images[0], "alt").as_deref(), Some("Yale Logo"));
        assert_eq!(get_node_attr(&images[0], "title"), None);
    }

    #[test]
    fn test_find_nodes_follows_path() {
        let dom = html_to_dom(
            b"<html><head><title>T</title></head><body><title>not head</title></body></html>",
            "utf-8",
        )
        .unwrap();
        assert_eq!(find_nodes(&dom.document, &["html", "head", "title"]).len(), 1);
        assert!(find_nodes(&dom.document, &[]).is_empty());
    }
}
