//! 楼层定义
//!
//! 一个楼层聚合一张底图的全部标注几何：顶点、边、多边形、模型和
//! 基准点，以及底图尺寸、比例尺和标高。所有编辑操作（比例标定、
//! 选择清除、批量删除）都在这里维护下标引用的一致性。

use crate::edge::{Edge, EdgeKind};
use crate::fiducial::Fiducial;
use crate::math::{BoundingBox2, EPSILON};
use crate::model::Model;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 楼层编辑错误
#[derive(Debug, Clone, Error)]
pub enum LevelError {
    #[error("vertex index {idx} out of range (vertex count {count})")]
    InvalidVertexIndex { idx: usize, count: usize },

    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),
}

/// 批量删除的结果
///
/// 区分"什么都没删"与"部分顶点因仍被引用而保留"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteResult {
    /// 是否删除了任何实体（调用方据此标记工程已修改）
    pub deleted_any: bool,

    /// 因仍被未选中的边/多边形引用而保留的选中顶点数
    pub vertices_retained: usize,
}

/// 楼层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 楼层名称
    pub name: String,

    /// 底图文件名（无底图时为 None）
    #[serde(default)]
    pub drawing_filename: Option<String>,

    /// 底图宽度（像素）
    #[serde(default)]
    pub drawing_width: u32,

    /// 底图高度（像素）
    #[serde(default)]
    pub drawing_height: u32,

    /// 比例尺（米/像素）
    #[serde(default = "default_meters_per_pixel")]
    pub drawing_meters_per_pixel: f64,

    /// 标高（米）
    #[serde(default)]
    pub elevation: f64,

    /// 无底图时手工指定的世界宽度（米）
    #[serde(default = "default_world_meters")]
    pub x_meters: f64,

    /// 无底图时手工指定的世界高度（米）
    #[serde(default = "default_world_meters")]
    pub y_meters: f64,

    /// 顶点序列，边和多边形按下标引用
    #[serde(default)]
    pub vertices: Vec<Vertex>,

    #[serde(default)]
    pub edges: Vec<Edge>,

    #[serde(default)]
    pub polygons: Vec<Polygon>,

    #[serde(default)]
    pub models: Vec<Model>,

    #[serde(default)]
    pub fiducials: Vec<Fiducial>,
}

fn default_meters_per_pixel() -> f64 {
    0.05
}

fn default_world_meters() -> f64 {
    10.0
}

impl Level {
    /// 创建空楼层
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            drawing_filename: None,
            drawing_width: 0,
            drawing_height: 0,
            drawing_meters_per_pixel: default_meters_per_pixel(),
            elevation: 0.0,
            x_meters: default_world_meters(),
            y_meters: default_world_meters(),
            vertices: Vec::new(),
            edges: Vec::new(),
            polygons: Vec::new(),
            models: Vec::new(),
            fiducials: Vec::new(),
        }
    }

    /// 添加顶点，返回其下标
    pub fn add_vertex(&mut self, x: f64, y: f64) -> usize {
        self.vertices.push(Vertex::new(x, y));
        self.vertices.len() - 1
    }

    /// 添加边，端点下标越界时拒绝
    pub fn add_edge(&mut self, edge: Edge) -> Result<usize, LevelError> {
        if !edge.indices_valid(self.vertices.len()) {
            let idx = edge.start_idx.max(edge.end_idx);
            return Err(LevelError::InvalidVertexIndex {
                idx,
                count: self.vertices.len(),
            });
        }
        self.edges.push(edge);
        Ok(self.edges.len() - 1)
    }

    /// 添加多边形，下标越界或环退化时拒绝
    pub fn add_polygon(&mut self, polygon: Polygon) -> Result<usize, LevelError> {
        if let Some(&idx) = polygon
            .vertex_indices
            .iter()
            .find(|&&i| i >= self.vertices.len())
        {
            return Err(LevelError::InvalidVertexIndex {
                idx,
                count: self.vertices.len(),
            });
        }
        if polygon.is_degenerate() {
            return Err(LevelError::DegeneratePolygon(format!(
                "loop {:?}",
                polygon.vertex_indices
            )));
        }
        self.polygons.push(polygon);
        Ok(self.polygons.len() - 1)
    }

    /// 校验全部边/多边形的下标引用与多边形非退化性
    pub fn integrity_check(&self) -> Result<(), LevelError> {
        let count = self.vertices.len();
        for edge in &self.edges {
            if !edge.indices_valid(count) {
                return Err(LevelError::InvalidVertexIndex {
                    idx: edge.start_idx.max(edge.end_idx),
                    count,
                });
            }
        }
        for polygon in &self.polygons {
            if let Some(&idx) = polygon.vertex_indices.iter().find(|&&i| i >= count) {
                return Err(LevelError::InvalidVertexIndex { idx, count });
            }
            if polygon.is_degenerate() {
                return Err(LevelError::DegeneratePolygon(format!(
                    "loop {:?}",
                    polygon.vertex_indices
                )));
            }
        }
        Ok(())
    }

    /// 由测量边推导比例尺（米/像素）
    ///
    /// 没有测量边时保持原值；多条测量边时以最后定义的一条为准；
    /// 像素距离或推导结果非正时拒绝该条并保留原值。
    /// 返回比例尺是否被更新。
    pub fn calculate_scale(&mut self) -> bool {
        let mut updated = false;

        for edge in &self.edges {
            let EdgeKind::Measurement { distance_meters } = &edge.kind else {
                continue;
            };
            if !edge.indices_valid(self.vertices.len()) {
                continue;
            }

            let a = &self.vertices[edge.start_idx].position;
            let b = &self.vertices[edge.end_idx].position;
            let dist_pixels = (b - a).norm();
            if dist_pixels < EPSILON {
                continue;
            }

            let scale = *distance_meters / dist_pixels;
            if scale > 0.0 {
                self.drawing_meters_per_pixel = scale;
                updated = true;
            }
        }

        updated
    }

    /// 清除楼层内全部实体的选中标记
    pub fn clear_selection(&mut self) {
        for v in &mut self.vertices {
            v.selected = false;
        }
        for e in &mut self.edges {
            e.selected = false;
        }
        for p in &mut self.polygons {
            p.selected = false;
        }
        for m in &mut self.models {
            m.selected = false;
        }
        for f in &mut self.fiducials {
            f.selected = false;
        }
    }

    /// 删除所有选中的实体
    ///
    /// 选中的边/多边形/模型/基准点直接删除。选中的顶点只有在不再
    /// 被任何存留的边/多边形引用时才删除（部分失败语义），删除后
    /// 对存留的下标引用做重编号，保持引用一致性。
    pub fn delete_selected(&mut self) -> DeleteResult {
        let mut result = DeleteResult::default();

        let before = self.edges.len() + self.polygons.len() + self.models.len()
            + self.fiducials.len();
        self.edges.retain(|e| !e.selected);
        self.polygons.retain(|p| !p.selected);
        self.models.retain(|m| !m.selected);
        self.fiducials.retain(|f| !f.selected);
        let after = self.edges.len() + self.polygons.len() + self.models.len()
            + self.fiducials.len();
        result.deleted_any = after < before;

        // 从高到低删除，避免重编号影响待处理的下标
        let selected: Vec<usize> = (0..self.vertices.len())
            .rev()
            .filter(|&i| self.vertices[i].selected)
            .collect();

        for idx in selected {
            let referenced = self.edges.iter().any(|e| e.references(idx))
                || self.polygons.iter().any(|p| p.references(idx));
            if referenced {
                result.vertices_retained += 1;
                continue;
            }

            self.vertices.remove(idx);
            result.deleted_any = true;

            for edge in &mut self.edges {
                if edge.start_idx > idx {
                    edge.start_idx -= 1;
                }
                if edge.end_idx > idx {
                    edge.end_idx -= 1;
                }
            }
            for polygon in &mut self.polygons {
                for i in &mut polygon.vertex_indices {
                    if *i > idx {
                        *i -= 1;
                    }
                }
            }
        }

        result
    }

    /// 当前选中的多边形下标（供渲染/交互层查询）
    pub fn selected_polygon(&self) -> Option<usize> {
        self.polygons.iter().position(|p| p.selected)
    }

    /// 计算楼层内全部定位实体的包围盒（空楼层返回 None）
    pub fn bounds(&self) -> Option<BoundingBox2> {
        let points = self
            .vertices
            .iter()
            .map(|v| v.position)
            .chain(self.models.iter().map(|m| m.position))
            .chain(self.fiducials.iter().map(|f| f.position));

        let mut iter = points.peekable();
        iter.peek()?;
        Some(BoundingBox2::from_points(iter))
    }
}
