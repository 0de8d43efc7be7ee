//! 编辑器交互模式
//!
//! 选择与查询的行为按模式分派：每个模式显式声明它关心哪些实体
//! 类别，空间查询据此跳过无关类别而不是依赖实体多态。

use crate::polygon::PolygonKind;
use serde::{Deserialize, Serialize};

/// 编辑器交互模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EditorMode {
    /// 选择（默认）
    #[default]
    Select,
    /// 移动
    Move,
    /// 绘制车道
    Lane,
    /// 绘制墙体
    Wall,
    /// 绘制测量边
    Measurement,
    /// 绘制门
    Door,
    /// 放置模型
    Model,
    /// 放置基准点
    Fiducial,
    /// 绘制楼板区域
    Floor,
    /// 绘制等待区
    Zone,
}

impl EditorMode {
    /// 该模式是否需要最近顶点查询
    ///
    /// 顶点是所有绘边模式的吸附目标；放置模型/基准点时无关。
    pub fn wants_vertices(&self) -> bool {
        matches!(
            self,
            EditorMode::Select
                | EditorMode::Move
                | EditorMode::Lane
                | EditorMode::Wall
                | EditorMode::Measurement
                | EditorMode::Door
        )
    }

    /// 该模式是否需要最近模型查询
    pub fn wants_models(&self) -> bool {
        matches!(self, EditorMode::Select | EditorMode::Move | EditorMode::Model)
    }

    /// 该模式是否需要最近基准点查询
    pub fn wants_fiducials(&self) -> bool {
        matches!(
            self,
            EditorMode::Select | EditorMode::Move | EditorMode::Fiducial
        )
    }

    /// 该模式是否以多边形包含测试作为主选择方式
    pub fn is_polygon_mode(&self) -> bool {
        matches!(self, EditorMode::Floor | EditorMode::Zone)
    }

    /// 该模式下指定类型的多边形是否参与包含测试
    pub fn accepts_polygon(&self, kind: PolygonKind) -> bool {
        match self {
            EditorMode::Select | EditorMode::Move => true,
            EditorMode::Floor => kind == PolygonKind::Floor,
            EditorMode::Zone => kind == PolygonKind::Zone,
            _ => false,
        }
    }
}
