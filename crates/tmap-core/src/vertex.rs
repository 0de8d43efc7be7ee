//! 顶点定义
//!
//! 顶点是楼层图的基本节点：车道、墙体、门、测量边以及多边形
//! 均通过顶点在所属楼层顶点序列中的下标相互引用。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 顶点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// 位置（底图像素坐标）
    pub position: Point2,

    /// 名称（可为空）
    #[serde(default)]
    pub name: String,

    /// 是否为充电点
    #[serde(default)]
    pub is_charger: bool,

    /// 是否为泊车点
    #[serde(default)]
    pub is_parking_spot: bool,

    /// 是否为等待点
    #[serde(default)]
    pub is_holding_point: bool,

    /// 是否被选中（瞬态，不持久化）
    #[serde(skip)]
    pub selected: bool,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            name: String::new(),
            is_charger: false,
            is_parking_spot: false,
            is_holding_point: false,
            selected: false,
        }
    }

    /// 设置名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 计算到指定点的欧氏距离
    pub fn distance_to(&self, point: &Point2) -> f64 {
        (self.position - point).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_vertex_distance() {
        let v = Vertex::new(0.0, 0.0);
        assert!(approx_eq(v.distance_to(&Point2::new(3.0, 4.0)), 5.0));
    }
}
