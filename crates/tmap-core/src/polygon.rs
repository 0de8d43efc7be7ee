//! 多边形定义
//!
//! 多边形是由顶点下标构成的闭合环，用于描述楼板区域、等待区等
//! 命名区域。环上相邻下标（含尾部回绕到头部）构成多边形的边，
//! 边拖拽交互据此在环中插入新顶点。

use crate::math::{point_segment_distance, project_onto_segment, Point2};
use crate::vertex::Vertex;
use serde::{Deserialize, Serialize};

/// 多边形类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolygonKind {
    /// 楼板区域（默认）
    #[default]
    Floor,
    /// 等待区
    Zone,
}

/// 边拖拽描述符
///
/// 标识环上最近的一条边（两个环内位置）及拖拽起点在该边上的投影点。
/// 交互层随后可用 [`Polygon::insert_vertex`] 把新顶点插入两端点之间。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDrag {
    /// 边起点在环中的位置
    pub start_pos: usize,
    /// 边终点在环中的位置（回绕时为 0）
    pub end_pos: usize,
    /// 拖拽起点在该边上的投影点
    pub point: Point2,
}

/// 多边形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// 顶点下标构成的闭合环
    pub vertex_indices: Vec<usize>,

    /// 类型
    pub kind: PolygonKind,

    /// 是否被选中（瞬态，不持久化）
    #[serde(skip)]
    pub selected: bool,
}

impl Polygon {
    /// 创建新多边形
    pub fn new(kind: PolygonKind, vertex_indices: Vec<usize>) -> Self {
        Self {
            vertex_indices,
            kind,
            selected: false,
        }
    }

    /// 检查多边形是否引用指定顶点
    pub fn references(&self, vertex_idx: usize) -> bool {
        self.vertex_indices.contains(&vertex_idx)
    }

    /// 检查所有下标是否都在顶点数量范围内
    pub fn indices_valid(&self, vertex_count: usize) -> bool {
        self.vertex_indices.iter().all(|&i| i < vertex_count)
    }

    /// 检查环是否退化：少于3个顶点，或相邻（含回绕）下标重复
    pub fn is_degenerate(&self) -> bool {
        let n = self.vertex_indices.len();
        if n < 3 {
            return true;
        }
        (0..n).any(|i| self.vertex_indices[i] == self.vertex_indices[(i + 1) % n])
    }

    /// 射线法判断点是否在多边形内
    ///
    /// `vertices` 为所属楼层的顶点序列。越界下标视为不包含。
    pub fn contains_point(&self, vertices: &[Vertex], x: f64, y: f64) -> bool {
        let n = self.vertex_indices.len();
        if n < 3 || !self.indices_valid(vertices.len()) {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = &vertices[self.vertex_indices[i]].position;
            let pj = &vertices[self.vertex_indices[j]].position;

            if (pi.y > y) != (pj.y > y)
                && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// 查找环上距指定点最近的边
    ///
    /// 距离相等时取环内位置较小的边。环内不足2个位置时返回 `None`。
    pub fn nearest_edge(&self, vertices: &[Vertex], x: f64, y: f64) -> Option<EdgeDrag> {
        let n = self.vertex_indices.len();
        if n < 2 || !self.indices_valid(vertices.len()) {
            return None;
        }

        let point = Point2::new(x, y);
        let mut best: Option<(f64, EdgeDrag)> = None;

        for i in 0..n {
            let j = (i + 1) % n;
            let a = &vertices[self.vertex_indices[i]].position;
            let b = &vertices[self.vertex_indices[j]].position;

            let dist = point_segment_distance(&point, a, b);
            if best.as_ref().map_or(true, |(d, _)| dist < *d) {
                best = Some((
                    dist,
                    EdgeDrag {
                        start_pos: i,
                        end_pos: j,
                        point: project_onto_segment(&point, a, b),
                    },
                ));
            }
        }

        best.map(|(_, drag)| drag)
    }

    /// 按边拖拽描述符在环中插入新顶点下标
    ///
    /// 新下标插入到描述符标识的两个环位置之间。
    pub fn insert_vertex(&mut self, drag: &EdgeDrag, vertex_idx: usize) {
        self.vertex_indices.insert(drag.start_pos + 1, vertex_idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn triangle_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(5.0, 10.0),
        ]
    }

    #[test]
    fn test_contains_point() {
        let vertices = triangle_vertices();
        let poly = Polygon::new(PolygonKind::Floor, vec![0, 1, 2]);

        assert!(poly.contains_point(&vertices, 5.0, 5.0));
        assert!(!poly.contains_point(&vertices, 20.0, 20.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Polygon::new(PolygonKind::Floor, vec![0, 1]).is_degenerate());
        assert!(Polygon::new(PolygonKind::Floor, vec![0, 1, 1]).is_degenerate());
        // 回绕处重复
        assert!(Polygon::new(PolygonKind::Floor, vec![0, 1, 0]).is_degenerate());
        assert!(!Polygon::new(PolygonKind::Floor, vec![0, 1, 2]).is_degenerate());
    }

    #[test]
    fn test_nearest_edge_square() {
        let vertices = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(10.0, 10.0),
            Vertex::new(0.0, 10.0),
        ];
        let poly = Polygon::new(PolygonKind::Floor, vec![0, 1, 2, 3]);

        // 靠近底边中点：应命中 (0, 1) 而非相邻边
        let drag = poly.nearest_edge(&vertices, 5.0, 1.0).unwrap();
        assert_eq!(drag.start_pos, 0);
        assert_eq!(drag.end_pos, 1);
        assert!(approx_eq(drag.point.x, 5.0));
        assert!(approx_eq(drag.point.y, 0.0));

        // 靠近回绕边 (3, 0)
        let drag = poly.nearest_edge(&vertices, 1.0, 5.0).unwrap();
        assert_eq!(drag.start_pos, 3);
        assert_eq!(drag.end_pos, 0);
    }

    #[test]
    fn test_nearest_edge_too_few_vertices() {
        let vertices = triangle_vertices();
        let poly = Polygon::new(PolygonKind::Zone, vec![0]);
        assert!(poly.nearest_edge(&vertices, 5.0, 5.0).is_none());
    }

    #[test]
    fn test_insert_vertex() {
        let vertices = triangle_vertices();
        let mut poly = Polygon::new(PolygonKind::Floor, vec![0, 1, 2]);
        let drag = poly.nearest_edge(&vertices, 5.0, -1.0).unwrap();
        poly.insert_vertex(&drag, 7);
        assert_eq!(poly.vertex_indices, vec![0, 7, 1, 2]);
    }
}
