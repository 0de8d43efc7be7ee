//! 数学基础类型
//!
//! 基于 nalgebra 提供的向量和点类型的别名，以及若干2D几何工具函数。
//! 除非显式换算，所有坐标均以底图像素为单位。

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 2D点类型
pub type Point2 = na::Point2<f64>;

/// 2D向量类型
pub type Vector2 = na::Vector2<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 计算点到线段 [a, b] 的最近点（垂足，必要时收缩到端点）
pub fn project_onto_segment(point: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let v = b - a;
    let c2 = v.dot(&v);
    if c2 < EPSILON {
        // 退化线段
        return *a;
    }

    let w = point - a;
    let t = (w.dot(&v) / c2).clamp(0.0, 1.0);
    a + v * t
}

/// 计算点到线段 [a, b] 的距离
pub fn point_segment_distance(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    (point - project_onto_segment(point, a, b)).norm()
}

/// 2D包围盒
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    /// 创建新的包围盒
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 创建空的包围盒（无效状态）
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::MAX, f64::MAX),
            max: Point2::new(f64::MIN, f64::MIN),
        }
    }

    /// 从点集创建包围盒
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// 检查是否包含指定点
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// 获取宽度
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// 获取高度
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
