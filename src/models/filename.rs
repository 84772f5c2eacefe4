//! 文件名解析
//!
//! 文件名约定为 `序号 + 描述 + .扩展名`，例如 `3今日份的猫.jpg`。
//! 序号决定插入顺序，同时作为正文中的编号展示。

use regex::Regex;
use std::sync::LazyLock;

// 只认 ASCII 数字，全角数字不算序号
static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+").unwrap());

// `.*` 贪婪匹配，描述截止到最后一个 `.`
static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)(.*)\.").unwrap());

/// 从文件名解析出的展示标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    /// 序号（文件名开头的数字串，缺省为 "0"）
    pub serial_number: String,
    /// 描述（序号与扩展名之间的文字，不匹配时为完整文件名）
    pub descriptor: String,
}

impl ParsedLabel {
    /// 是否为本批次的第一项（需要加标题栏）
    pub fn is_first(&self) -> bool {
        self.serial_number == "1"
    }
}

/// 排序键：文件名开头数字串的数值，没有数字时为 0
///
/// 超出 u64 范围的数字串按 `u64::MAX` 处理。
pub fn ordering_key(name: &str) -> u64 {
    match LEADING_DIGITS.find(name) {
        Some(m) => m.as_str().parse().unwrap_or(u64::MAX),
        None => 0,
    }
}

/// 解析文件名为序号和描述，永不失败
pub fn parse_label(name: &str) -> ParsedLabel {
    match LABEL_PATTERN.captures(name) {
        Some(caps) => ParsedLabel {
            serial_number: caps[1].to_string(),
            descriptor: caps[2].to_string(),
        },
        None => ParsedLabel {
            serial_number: "0".to_string(),
            descriptor: name.to_string(),
        },
    }
}
