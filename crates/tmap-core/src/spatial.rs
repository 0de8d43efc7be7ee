//! 空间查询
//!
//! 纯查询模块：对楼层实体做最近项搜索与多边形包含测试，不做任何
//! 修改。选择状态的写入由 `Level`/`Project` 在单写者约定下完成。

use crate::level::Level;
use crate::math::Point2;
use crate::mode::EditorMode;

/// 按实体类别独立给出的最近项查询结果
///
/// 对空类别或当前模式不关心的类别，距离保持 `f64::INFINITY`、
/// 下标保持 `None`。这里不做"足够近"的阈值判断，由调用方决定。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestItem {
    pub model_dist: f64,
    pub model_idx: Option<usize>,

    pub vertex_dist: f64,
    pub vertex_idx: Option<usize>,

    pub fiducial_dist: f64,
    pub fiducial_idx: Option<usize>,
}

impl Default for NearestItem {
    fn default() -> Self {
        Self {
            model_dist: f64::INFINITY,
            model_idx: None,
            vertex_dist: f64::INFINITY,
            vertex_idx: None,
            fiducial_dist: f64::INFINITY,
            fiducial_idx: None,
        }
    }
}

/// 查询距 (x, y) 最近的模型、顶点和基准点
///
/// 只遍历当前模式声明关心的类别。距离相等时保留下标较小者。
pub fn nearest_items(mode: EditorMode, level: &Level, x: f64, y: f64) -> NearestItem {
    let point = Point2::new(x, y);
    let mut nearest = NearestItem::default();

    if mode.wants_models() {
        for (i, model) in level.models.iter().enumerate() {
            let dist = model.distance_to(&point);
            if dist < nearest.model_dist {
                nearest.model_dist = dist;
                nearest.model_idx = Some(i);
            }
        }
    }

    if mode.wants_vertices() {
        for (i, vertex) in level.vertices.iter().enumerate() {
            let dist = vertex.distance_to(&point);
            if dist < nearest.vertex_dist {
                nearest.vertex_dist = dist;
                nearest.vertex_idx = Some(i);
            }
        }
    }

    if mode.wants_fiducials() {
        for (i, fiducial) in level.fiducials.iter().enumerate() {
            let dist = fiducial.distance_to(&point);
            if dist < nearest.fiducial_dist {
                nearest.fiducial_dist = dist;
                nearest.fiducial_idx = Some(i);
            }
        }
    }

    nearest
}

/// 按下标序查找第一个包含 (x, y) 且类型被当前模式接受的多边形
pub fn containing_polygon(mode: EditorMode, level: &Level, x: f64, y: f64) -> Option<usize> {
    level
        .polygons
        .iter()
        .position(|p| mode.accepts_polygon(p.kind) && p.contains_point(&level.vertices, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use crate::model::Model;
    use crate::polygon::{Polygon, PolygonKind};

    #[test]
    fn test_nearest_items_empty_level() {
        let level = Level::new("L1");
        let nearest = nearest_items(EditorMode::Select, &level, 1.0, 2.0);

        assert!(nearest.model_dist.is_infinite());
        assert!(nearest.model_idx.is_none());
        assert!(nearest.vertex_dist.is_infinite());
        assert!(nearest.vertex_idx.is_none());
        assert!(nearest.fiducial_dist.is_infinite());
        assert!(nearest.fiducial_idx.is_none());
    }

    #[test]
    fn test_nearest_items_finds_closest_vertex() {
        let mut level = Level::new("L1");
        level.add_vertex(0.0, 0.0);
        level.add_vertex(10.0, 0.0);
        level.add_vertex(4.0, 0.0);

        let nearest = nearest_items(EditorMode::Select, &level, 5.0, 0.0);
        assert_eq!(nearest.vertex_idx, Some(2));
        assert!(approx_eq(nearest.vertex_dist, 1.0));
    }

    #[test]
    fn test_nearest_items_tie_breaks_to_lowest_index() {
        let mut level = Level::new("L1");
        level.add_vertex(-1.0, 0.0);
        level.add_vertex(1.0, 0.0);

        let nearest = nearest_items(EditorMode::Select, &level, 0.0, 0.0);
        assert_eq!(nearest.vertex_idx, Some(0));
    }

    #[test]
    fn test_nearest_items_mode_excludes_kinds() {
        let mut level = Level::new("L1");
        level.add_vertex(0.0, 0.0);
        level.models.push(Model::new("shelf", 0.0, 0.0));

        // 门模式不报告模型距离，但结构保持一致
        let nearest = nearest_items(EditorMode::Door, &level, 0.0, 0.0);
        assert!(nearest.model_dist.is_infinite());
        assert!(nearest.model_idx.is_none());
        assert_eq!(nearest.vertex_idx, Some(0));
    }

    #[test]
    fn test_containing_polygon() {
        let mut level = Level::new("L1");
        let a = level.add_vertex(0.0, 0.0);
        let b = level.add_vertex(10.0, 0.0);
        let c = level.add_vertex(5.0, 10.0);
        level
            .add_polygon(Polygon::new(PolygonKind::Floor, vec![a, b, c]))
            .unwrap();

        assert_eq!(
            containing_polygon(EditorMode::Floor, &level, 5.0, 5.0),
            Some(0)
        );
        assert_eq!(containing_polygon(EditorMode::Floor, &level, 20.0, 20.0), None);
        // 等待区模式不接受楼板多边形
        assert_eq!(containing_polygon(EditorMode::Zone, &level, 5.0, 5.0), None);
    }
}
