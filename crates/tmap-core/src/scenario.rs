//! 场景定义
//!
//! 场景是叠加在建筑基础图之上的命名覆盖层，按楼层保存场景专属
//! 状态（如仿真用的临时顶点）。工程跟踪当前激活的场景。

use crate::math::Point2;
use crate::vertex::Vertex;
use serde::{Deserialize, Serialize};

/// 单个楼层的场景覆盖层
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioLevel {
    /// 场景专属顶点
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl ScenarioLevel {
    /// 添加场景顶点，返回其下标
    pub fn add_vertex(&mut self, x: f64, y: f64) -> usize {
        self.vertices.push(Vertex::new(x, y));
        self.vertices.len() - 1
    }

    /// 清除覆盖层内全部选中标记
    pub fn clear_selection(&mut self) {
        for v in &mut self.vertices {
            v.selected = false;
        }
    }

    /// 查询距指定点最近的场景顶点，返回 (距离, 下标)
    pub fn nearest_vertex(&self, point: &Point2) -> (f64, Option<usize>) {
        let mut dist = f64::INFINITY;
        let mut idx = None;
        for (i, v) in self.vertices.iter().enumerate() {
            let d = v.distance_to(point);
            if d < dist {
                dist = d;
                idx = Some(i);
            }
        }
        (dist, idx)
    }
}

/// 场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// 场景名称
    pub name: String,

    /// 按建筑楼层下标对应的覆盖层
    #[serde(default)]
    pub scenario_levels: Vec<ScenarioLevel>,
}

impl Scenario {
    /// 创建空场景
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenario_levels: Vec::new(),
        }
    }

    /// 获取指定楼层的覆盖层，不存在时返回 None
    pub fn level_overlay(&self, level_idx: usize) -> Option<&ScenarioLevel> {
        self.scenario_levels.get(level_idx)
    }

    /// 获取指定楼层的覆盖层（可变），必要时扩充到该楼层
    pub fn level_overlay_mut(&mut self, level_idx: usize) -> &mut ScenarioLevel {
        if level_idx >= self.scenario_levels.len() {
            self.scenario_levels
                .resize_with(level_idx + 1, ScenarioLevel::default);
        }
        &mut self.scenario_levels[level_idx]
    }
}
