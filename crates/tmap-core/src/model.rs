//! 放置模型
//!
//! 模型是放置在楼层上的外部目录资产实例（货架、工作站等）。
//! 核心只关心其几何参数，视觉资产由外部目录按 `model_name` 解析。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 放置的模型实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// 实例名称（同一目录模型可多次放置）
    #[serde(default)]
    pub instance_name: String,

    /// 目录中的模型名称
    pub model_name: String,

    /// 位置（底图像素坐标）
    pub position: Point2,

    /// 朝向（弧度）
    #[serde(default)]
    pub yaw: f64,

    /// 缩放比例
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// 是否被选中（瞬态，不持久化）
    #[serde(skip)]
    pub selected: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl Model {
    /// 创建新的模型实例
    pub fn new(model_name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            instance_name: String::new(),
            model_name: model_name.into(),
            position: Point2::new(x, y),
            yaw: 0.0,
            scale: 1.0,
            selected: false,
        }
    }

    /// 设置朝向
    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// 计算到指定点的欧氏距离
    pub fn distance_to(&self, point: &Point2) -> f64 {
        (self.position - point).norm()
    }
}
