//! 基准点定义
//!
//! 基准点是带名称的2D参考点，用于跨底图/跨楼层的位置对齐与比例标定。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 基准点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fiducial {
    /// 位置（底图像素坐标）
    pub position: Point2,

    /// 名称，同名基准点在不同楼层间相互对应
    #[serde(default)]
    pub name: String,

    /// 是否被选中（瞬态，不持久化）
    #[serde(skip)]
    pub selected: bool,
}

impl Fiducial {
    /// 创建新基准点
    pub fn new(x: f64, y: f64, name: impl Into<String>) -> Self {
        Self {
            position: Point2::new(x, y),
            name: name.into(),
            selected: false,
        }
    }

    /// 计算到指定点的欧氏距离
    pub fn distance_to(&self, point: &Point2) -> f64 {
        (self.position - point).norm()
    }
}
