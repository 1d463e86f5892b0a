//! DOM遍历器模块
//!
//! 以文档顺序（先序、深度优先）遍历 DOM 树，只改写文本节点的字符数据。
//!
//! # 不会被触及的内容
//!
//! - 元素的标签名和属性（`href`、`src`、`alt` 等保持字节级一致）
//! - 注释、DOCTYPE 和处理指令
//! - 不透明元素（`script`、`style` 等）内部的原始文本
//!
//! 被内联标记分割到多个文本节点中的单词不会被识别。

use std::borrow::Cow;

use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData};

use crate::substitution::RuleSet;

use super::utils::is_opaque_element;

/// Statistics of one rewrite pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Text nodes inspected
    pub text_nodes: usize,
    /// Text nodes whose data changed
    pub rewritten_nodes: usize,
    pub replacements: usize,
}

/// 改写 `node` 之下所有可见文本节点
pub fn rewrite_text_nodes(node: &Handle, rules: &RuleSet) -> RewriteReport {
    let mut report = RewriteReport::default();

    visit_text_nodes(node, |contents| {
        report.text_nodes += 1;

        let replaced = match rules.apply_counted(&**contents) {
            (Cow::Owned(text), count) => Some((text, count)),
            (Cow::Borrowed(_), _) => None,
        };

        // 未变化的节点保持原样
        if let Some((text, count)) = replaced {
            contents.clear();
            contents.push_slice(&text);
            report.rewritten_nodes += 1;
            report.replacements += count;
        }
    });

    report
}

/// 按文档顺序访问 `node` 之下所有可见文本节点
///
/// 不进入不透明元素，跳过注释、DOCTYPE 和处理指令。
pub fn visit_text_nodes<F>(node: &Handle, mut visit: F)
where
    F: FnMut(&mut StrTendril),
{
    let mut stack: Vec<Handle> = vec![node.clone()];

    while let Some(current) = stack.pop() {
        match current.data {
            NodeData::Text { ref contents } => visit(&mut contents.borrow_mut()),
            NodeData::Element { ref name, .. } if is_opaque_element(&name.local) => {}
            NodeData::Document | NodeData::Element { .. } => {
                // 逆序入栈以保持文档顺序
                for child in current.children.borrow().iter().rev() {
                    stack.push(child.clone());
                }
            }
            NodeData::Comment { .. }
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => {}
        }
    }
}
