//! 建筑定义
//!
//! 建筑是楼层的有序集合，工程通过楼层下标寻址其中的楼层。

use crate::level::Level;
use serde::{Deserialize, Serialize};

/// 建筑
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Building {
    /// 建筑名称
    #[serde(default)]
    pub name: String,

    /// 楼层，按标高顺序排列
    #[serde(default)]
    pub levels: Vec<Level>,
}

impl Building {
    /// 创建空建筑
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: Vec::new(),
        }
    }

    /// 添加楼层，返回其下标
    pub fn add_level(&mut self, level: Level) -> usize {
        self.levels.push(level);
        self.levels.len() - 1
    }

    /// 楼层数量
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
