//! 大小写模式识别与映射

/// Casing class of a matched token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseClass {
    /// `YALE`
    Upper,
    /// `Yale`
    Title,
    /// `yale`
    Lower,
    /// `yAlE`, or a token without letters
    Mixed,
}

/// 识别匹配文本的大小写类别
pub fn classify(token: &str) -> CaseClass {
    let mut letters = token.chars().filter(|c| c.is_alphabetic());

    let first = match letters.next() {
        Some(c) => c,
        None => return CaseClass::Mixed,
    };
    let rest: Vec<char> = letters.collect();

    if first.is_lowercase() {
        if rest.iter().all(|c| c.is_lowercase()) {
            CaseClass::Lower
        } else {
            CaseClass::Mixed
        }
    } else if rest.is_empty() || rest.iter().all(|c| c.is_lowercase()) {
        // 单个大写字母视为首字母大写
        CaseClass::Title
    } else if rest.iter().all(|c| c.is_uppercase()) {
        CaseClass::Upper
    } else {
        CaseClass::Mixed
    }
}

/// 按照大小写类别渲染替换文本
pub fn render(replacement: &str, class: CaseClass) -> String {
    match class {
        CaseClass::Upper => replacement.to_uppercase(),
        CaseClass::Lower => replacement.to_lowercase(),
        CaseClass::Title => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        }
        CaseClass::Mixed => replacement.to_string(),
    }
}
