//! 处理结果

use std::fmt;

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// 已插入编辑器
    Success,
    /// 处理失败，批次继续
    Failure { reason: String },
    /// 批次被取消，未处理
    Cancelled,
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success)
    }
}

/// 一条结果记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// 在排序后批次中的位置（从 1 开始）
    pub index: usize,
    pub name: String,
    pub outcome: ProcessingOutcome,
}

impl fmt::Display for ItemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProcessingOutcome::Success => write!(f, "✅ [{}] {}", self.index, self.name),
            ProcessingOutcome::Failure { reason } => {
                write!(f, "⚠️ [{}] {}: {}", self.index, self.name, reason)
            }
            ProcessingOutcome::Cancelled => write!(f, "⏹ [{}] {}: 已取消", self.index, self.name),
        }
    }
}

/// 整个批次的结果清单，顺序与处理顺序一致
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn push(&mut self, name: impl Into<String>, outcome: ProcessingOutcome) {
        let index = self.items.len() + 1;
        self.items.push(ItemReport {
            index,
            name: name.into(),
            outcome,
        });
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|r| matches!(r.outcome, ProcessingOutcome::Failure { .. }))
            .count()
    }

    pub fn cancelled(&self) -> usize {
        self.items
            .iter()
            .filter(|r| matches!(r.outcome, ProcessingOutcome::Cancelled))
            .count()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ProcessingOutcome> {
        self.items.iter().map(|r| &r.outcome)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        write!(
            f,
            "成功 {}/{}，失败 {}，取消 {}",
            self.succeeded(),
            self.total(),
            self.failed(),
            self.cancelled()
        )
    }
}
