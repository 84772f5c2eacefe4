//! 文件处理上下文
//!
//! 封装"我正在处理本批第几个文件"这一信息

use std::fmt::Display;

/// 文件处理上下文
#[derive(Debug, Clone)]
pub struct ItemCtx {
    /// 排序后的位置（从1开始）
    pub index: usize,

    /// 本批文件总数
    pub total: usize,

    /// 文件名
    pub name: String,
}

impl ItemCtx {
    pub fn new(index: usize, total: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            total,
            name: name.into(),
        }
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}]", self.index, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shows_position() {
        let ctx = ItemCtx::new(2, 5, "2猫.jpg");
        assert_eq!(ctx.to_string(), "[2/5]");
        assert_eq!(ctx.name, "2猫.jpg");
    }
}
