//! 边定义
//!
//! 支持的边类型：
//! - 车道 (Lane)
//! - 墙体 (Wall)
//! - 测量边 (Measurement)
//! - 门 (Door)
//!
//! 边通过下标引用所属楼层的顶点，自身不拥有顶点。

use serde::{Deserialize, Serialize};

/// 车道通行方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LaneOrientation {
    /// 双向通行（默认）
    #[default]
    Bidirectional,
    /// 仅沿 start -> end 方向
    Forward,
    /// 仅沿 end -> start 方向
    Backward,
}

/// 门的运动形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DoorType {
    /// 单开铰链门（默认）
    #[default]
    Hinged,
    /// 双开铰链门
    DoubleHinged,
    /// 单扇滑动门
    Sliding,
    /// 双扇滑动门
    DoubleSliding,
}

/// 门参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorParams {
    /// 运动形式
    pub door_type: DoorType,

    /// 摆动角度范围（度）
    pub motion_degrees: f64,

    /// 摆动方向：+1 逆时针，-1 顺时针
    pub motion_direction: i32,
}

impl Default for DoorParams {
    fn default() -> Self {
        Self {
            door_type: DoorType::Hinged,
            motion_degrees: 90.0,
            motion_direction: 1,
        }
    }
}

/// 边类型及其类型相关参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// 车道：可通行的路线段
    Lane {
        /// 通行方向
        orientation: LaneOrientation,
    },
    /// 墙体：结构边界
    Wall,
    /// 测量边：已知真实长度的标定参考
    Measurement {
        /// 两端点的真实距离（米）
        distance_meters: f64,
    },
    /// 门：带摆动/滑动参数的边
    Door(DoorParams),
}

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 起点在楼层顶点序列中的下标
    pub start_idx: usize,

    /// 终点在楼层顶点序列中的下标
    pub end_idx: usize,

    /// 类型与参数
    pub kind: EdgeKind,

    /// 是否被选中（瞬态，不持久化）
    #[serde(skip)]
    pub selected: bool,
}

impl Edge {
    /// 创建新边
    pub fn new(start_idx: usize, end_idx: usize, kind: EdgeKind) -> Self {
        Self {
            start_idx,
            end_idx,
            kind,
            selected: false,
        }
    }

    /// 创建车道边（双向）
    pub fn lane(start_idx: usize, end_idx: usize) -> Self {
        Self::new(
            start_idx,
            end_idx,
            EdgeKind::Lane {
                orientation: LaneOrientation::Bidirectional,
            },
        )
    }

    /// 创建墙体边
    pub fn wall(start_idx: usize, end_idx: usize) -> Self {
        Self::new(start_idx, end_idx, EdgeKind::Wall)
    }

    /// 创建测量边
    pub fn measurement(start_idx: usize, end_idx: usize, distance_meters: f64) -> Self {
        Self::new(start_idx, end_idx, EdgeKind::Measurement { distance_meters })
    }

    /// 创建门边（默认参数）
    pub fn door(start_idx: usize, end_idx: usize) -> Self {
        Self::new(start_idx, end_idx, EdgeKind::Door(DoorParams::default()))
    }

    /// 检查边是否引用指定顶点
    pub fn references(&self, vertex_idx: usize) -> bool {
        self.start_idx == vertex_idx || self.end_idx == vertex_idx
    }

    /// 检查两个端点下标是否都在顶点数量范围内
    pub fn indices_valid(&self, vertex_count: usize) -> bool {
        self.start_idx < vertex_count && self.end_idx < vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_references() {
        let e = Edge::wall(2, 5);
        assert!(e.references(2));
        assert!(e.references(5));
        assert!(!e.references(3));
    }

    #[test]
    fn test_edge_indices_valid() {
        let e = Edge::lane(0, 3);
        assert!(e.indices_valid(4));
        assert!(!e.indices_valid(3));
    }
}
