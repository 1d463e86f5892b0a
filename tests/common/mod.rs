// 集成测试公共模块
//
// 提供测试页面和 DOM 比较辅助函数

#![allow(dead_code)]

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 测试页面
pub const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Yale University Test Page</title>
</head>
<body>
  <header>
    <h1>Welcome to Yale University</h1>
    <nav>
      <ul>
        <li><a href="https://www.yale.edu/about">About Yale</a></li>
        <li><a href="https://www.yale.edu/admissions">Yale Admissions</a></li>
      </ul>
    </nav>
  </header>
  <main>
    <p>Yale University is a private Ivy League research university in New Haven, Connecticut.</p>
    <p>Yale was founded in 1701 as the Collegiate School.</p>
    <img src="https://www.yale.edu/images/logo.png" alt="Yale Logo">
    <script>var site = "Yale";</script>
  </main>
  <footer>
    <p>Contact us at <a href="mailto:info@yale.edu">info@yale.edu</a></p>
    <!-- Yale footer -->
  </footer>
</body>
</html>
"#;

/// 不含替换词的页面
pub const NEUTRAL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Harvard Test Page</title></head>
<body>
  <h1 class="hero" data-id="1">Welcome to Harvard</h1>
  <p>Harvard was founded in 1636.</p>
  <a href="https://www.harvard.edu/about" title="About">About Harvard</a>
</body>
</html>
"#;

pub fn parse(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .unwrap()
}

/// 按文档顺序收集所有元素的标签名与属性
pub fn collect_elements(html: &str) -> Vec<(String, Vec<(String, String)>)> {
    let dom = parse(html);
    let mut elements = Vec::new();
    walk(&dom.document, &mut |node| {
        if let NodeData::Element { name, attrs, .. } = &node.data {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            elements.push((name.local.to_string(), attrs));
        }
    });
    elements
}

/// 按文档顺序收集所有文本节点
pub fn collect_text(html: &str) -> Vec<String> {
    let dom = parse(html);
    let mut texts = Vec::new();
    walk(&dom.document, &mut |node| {
        if let NodeData::Text { contents } = &node.data {
            texts.push(contents.borrow().to_string());
        }
    });
    texts
}

/// 按文档顺序收集所有注释
pub fn collect_comments(html: &str) -> Vec<String> {
    let dom = parse(html);
    let mut comments = Vec::new();
    walk(&dom.document, &mut |node| {
        if let NodeData::Comment { contents } = &node.data {
            comments.push(contents.to_string());
        }
    });
    comments
}

fn walk(node: &Handle, visit: &mut dyn FnMut(&Handle)) {
    visit(node);
    for child in node.children.borrow().iter() {
        walk(child, visit);
    }
}
