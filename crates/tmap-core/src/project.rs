//! 工程聚合根
//!
//! 工程拥有一个建筑（若干楼层）和一组场景，并把交互层上报的
//! "模式 + 坐标 + 楼层下标"调用路由到对应楼层：先做下标校验，
//! 再委托空间查询或楼层的修改操作。楼层下标越界视为调用方契约
//! 违例，立即报错而不猜测回退楼层。

use crate::building::Building;
use crate::level::{DeleteResult, Level};
use crate::math::Point2;
use crate::mode::EditorMode;
use crate::polygon::EdgeDrag;
use crate::scenario::{Scenario, ScenarioLevel};
use crate::spatial::{self, NearestItem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 点选判定半径（底图像素）
const SELECT_RADIUS_PIXELS: f64 = 10.0;

/// 工程路由错误
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error("level index {idx} out of range (level count {count})")]
    LevelIndexOutOfRange { idx: usize, count: usize },

    #[error("scenario index {idx} out of range (scenario count {count})")]
    ScenarioIndexOutOfRange { idx: usize, count: usize },

    #[error("polygon index {idx} out of range (polygon count {count})")]
    PolygonIndexOutOfRange { idx: usize, count: usize },

    #[error("no active scenario")]
    NoActiveScenario,
}

/// 点选命中的实体类别
enum SelectTarget {
    Vertex(usize),
    Model(usize),
    Fiducial(usize),
    ScenarioVertex(usize),
}

/// 工程
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// 工程名称
    pub name: String,

    /// 建筑
    #[serde(default)]
    pub building: Building,

    /// 场景列表
    #[serde(default)]
    pub scenarios: Vec<Scenario>,

    /// 当前激活的场景下标（瞬态，不持久化）
    #[serde(skip)]
    pub scenario_idx: Option<usize>,

    /// 是否有未保存的修改（瞬态）
    #[serde(skip)]
    modified: bool,
}

impl Project {
    /// 创建空工程
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            building: Building::new(name.clone()),
            name,
            scenarios: Vec::new(),
            scenario_idx: None,
            modified: false,
        }
    }

    /// 是否有未保存的修改
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// 标记为已保存
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    fn check_level_idx(&self, idx: usize) -> Result<(), ProjectError> {
        let count = self.building.levels.len();
        if idx >= count {
            return Err(ProjectError::LevelIndexOutOfRange { idx, count });
        }
        Ok(())
    }

    /// 只读访问指定楼层（渲染层据此重建视觉表示）
    pub fn level(&self, idx: usize) -> Result<&Level, ProjectError> {
        self.check_level_idx(idx)?;
        Ok(&self.building.levels[idx])
    }

    /// 可变访问指定楼层
    pub fn level_mut(&mut self, idx: usize) -> Result<&mut Level, ProjectError> {
        self.check_level_idx(idx)?;
        self.modified = true;
        Ok(&mut self.building.levels[idx])
    }

    /// 清除指定楼层及激活场景覆盖层的全部选中标记
    pub fn clear_selection(&mut self, level_idx: usize) -> Result<(), ProjectError> {
        self.check_level_idx(level_idx)?;
        self.building.levels[level_idx].clear_selection();
        if let Some(idx) = self.scenario_idx {
            if let Some(overlay) = self.scenarios[idx].scenario_levels.get_mut(level_idx) {
                overlay.clear_selection();
            }
        }
        Ok(())
    }

    /// 删除指定楼层所有选中的实体
    pub fn delete_selected(&mut self, level_idx: usize) -> Result<DeleteResult, ProjectError> {
        self.check_level_idx(level_idx)?;
        let result = self.building.levels[level_idx].delete_selected();
        if result.deleted_any {
            self.modified = true;
        }
        Ok(result)
    }

    /// 查询指定楼层距 (x, y) 最近的模型、顶点和基准点
    pub fn nearest_items(
        &self,
        mode: EditorMode,
        level_idx: usize,
        x: f64,
        y: f64,
    ) -> Result<NearestItem, ProjectError> {
        Ok(spatial::nearest_items(mode, self.level(level_idx)?, x, y))
    }

    /// 选中第一个包含 (x, y) 且类型被当前模式接受的多边形
    ///
    /// 先清除该楼层已有的多边形选中；没有命中时不再选中任何多边形。
    /// 返回命中的多边形下标。
    pub fn set_selected_containing_polygon(
        &mut self,
        mode: EditorMode,
        level_idx: usize,
        x: f64,
        y: f64,
    ) -> Result<Option<usize>, ProjectError> {
        self.check_level_idx(level_idx)?;
        let hit = spatial::containing_polygon(mode, &self.building.levels[level_idx], x, y);

        let level = &mut self.building.levels[level_idx];
        for p in &mut level.polygons {
            p.selected = false;
        }
        if let Some(i) = hit {
            level.polygons[i].selected = true;
        }
        Ok(hit)
    }

    /// 鼠标点选：清除旧选择，按模式决定获胜的选择类别
    ///
    /// 多边形模式走包含测试；其余模式在模式关心的类别中取最近项，
    /// 距离进入点选半径才选中。选择模式下激活场景覆盖层的顶点与
    /// 基础实体同场竞争。
    pub fn mouse_select_press(
        &mut self,
        mode: EditorMode,
        level_idx: usize,
        x: f64,
        y: f64,
    ) -> Result<(), ProjectError> {
        self.clear_selection(level_idx)?;

        if mode.is_polygon_mode() {
            self.set_selected_containing_polygon(mode, level_idx, x, y)?;
            return Ok(());
        }

        let nearest = spatial::nearest_items(mode, &self.building.levels[level_idx], x, y);

        let mut scenario_nearest = (f64::INFINITY, None);
        if matches!(mode, EditorMode::Select | EditorMode::Move) {
            if let Some(overlay) = self.scenario_level(level_idx)? {
                scenario_nearest = overlay.nearest_vertex(&Point2::new(x, y));
            }
        }

        // 距离相等时靠前的类别获胜：顶点、模型、基准点、场景顶点
        let mut best_dist = f64::INFINITY;
        let mut best: Option<SelectTarget> = None;
        let candidates = [
            (nearest.vertex_dist, nearest.vertex_idx.map(SelectTarget::Vertex)),
            (nearest.model_dist, nearest.model_idx.map(SelectTarget::Model)),
            (
                nearest.fiducial_dist,
                nearest.fiducial_idx.map(SelectTarget::Fiducial),
            ),
            (
                scenario_nearest.0,
                scenario_nearest.1.map(SelectTarget::ScenarioVertex),
            ),
        ];
        for (dist, target) in candidates {
            if let Some(target) = target {
                if dist < best_dist {
                    best_dist = dist;
                    best = Some(target);
                }
            }
        }

        if best_dist > SELECT_RADIUS_PIXELS {
            return Ok(());
        }

        match best {
            Some(SelectTarget::Vertex(i)) => {
                self.building.levels[level_idx].vertices[i].selected = true;
            }
            Some(SelectTarget::Model(i)) => {
                self.building.levels[level_idx].models[i].selected = true;
            }
            Some(SelectTarget::Fiducial(i)) => {
                self.building.levels[level_idx].fiducials[i].selected = true;
            }
            Some(SelectTarget::ScenarioVertex(i)) => {
                if let Some(idx) = self.scenario_idx {
                    self.scenarios[idx].level_overlay_mut(level_idx).vertices[i].selected = true;
                }
            }
            None => {}
        }
        Ok(())
    }

    /// 多边形边拖拽起始：查找距 (x, y) 最近的多边形边
    ///
    /// 多边形类型不被当前模式接受时返回 `None`；环内不足2个顶点时
    /// 同样返回 `None`（无有效描述符）。
    pub fn polygon_edge_drag_press(
        &self,
        mode: EditorMode,
        level_idx: usize,
        polygon_idx: usize,
        x: f64,
        y: f64,
    ) -> Result<Option<EdgeDrag>, ProjectError> {
        let level = self.level(level_idx)?;
        let polygon = level
            .polygons
            .get(polygon_idx)
            .ok_or(ProjectError::PolygonIndexOutOfRange {
                idx: polygon_idx,
                count: level.polygons.len(),
            })?;

        if !mode.accepts_polygon(polygon.kind) {
            return Ok(None);
        }
        Ok(polygon.nearest_edge(&level.vertices, x, y))
    }

    /// 当前选中且类型被模式接受的多边形下标
    pub fn get_selected_polygon(
        &self,
        mode: EditorMode,
        level_idx: usize,
    ) -> Result<Option<usize>, ProjectError> {
        let level = self.level(level_idx)?;
        Ok(level
            .polygons
            .iter()
            .position(|p| p.selected && mode.accepts_polygon(p.kind)))
    }

    /// 添加场景，返回其下标
    pub fn add_scenario(&mut self, name: impl Into<String>) -> usize {
        self.scenarios.push(Scenario::new(name));
        self.modified = true;
        self.scenarios.len() - 1
    }

    /// 场景列表行被点击：激活该场景
    pub fn scenario_row_clicked(&mut self, row: usize) -> Result<(), ProjectError> {
        if row >= self.scenarios.len() {
            return Err(ProjectError::ScenarioIndexOutOfRange {
                idx: row,
                count: self.scenarios.len(),
            });
        }
        self.scenario_idx = Some(row);
        Ok(())
    }

    /// 解析激活场景在指定楼层上的覆盖层
    ///
    /// 没有激活场景、或场景尚未在该楼层建立覆盖层时返回 `None`。
    pub fn scenario_level(&self, level_idx: usize) -> Result<Option<&ScenarioLevel>, ProjectError> {
        self.check_level_idx(level_idx)?;
        Ok(self
            .scenario_idx
            .and_then(|i| self.scenarios[i].level_overlay(level_idx)))
    }

    /// 向激活场景在指定楼层的覆盖层添加顶点
    pub fn add_scenario_vertex(
        &mut self,
        level_idx: usize,
        x: f64,
        y: f64,
    ) -> Result<usize, ProjectError> {
        self.check_level_idx(level_idx)?;
        let scenario_idx = self.scenario_idx.ok_or(ProjectError::NoActiveScenario)?;
        self.modified = true;
        Ok(self.scenarios[scenario_idx]
            .level_overlay_mut(level_idx)
            .add_vertex(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::polygon::{Polygon, PolygonKind};

    fn project_with_level() -> Project {
        let mut project = Project::new("warehouse");
        project.building.add_level(Level::new("L1"));
        project
    }

    #[test]
    fn test_level_index_out_of_range() {
        let mut project = project_with_level();
        assert!(matches!(
            project.clear_selection(1),
            Err(ProjectError::LevelIndexOutOfRange { idx: 1, count: 1 })
        ));
        assert!(project.nearest_items(EditorMode::Select, 3, 0.0, 0.0).is_err());
        assert!(project.level(1).is_err());
    }

    #[test]
    fn test_mouse_select_press_picks_nearest_kind() {
        let mut project = project_with_level();
        {
            let level = project.level_mut(0).unwrap();
            level.add_vertex(0.0, 0.0);
            level.models.push(Model::new("shelf", 4.0, 0.0));
        }

        project
            .mouse_select_press(EditorMode::Select, 0, 3.5, 0.0)
            .unwrap();
        let level = project.level(0).unwrap();
        assert!(level.models[0].selected);
        assert!(!level.vertices[0].selected);
    }

    #[test]
    fn test_mouse_select_press_respects_radius() {
        let mut project = project_with_level();
        project.level_mut(0).unwrap().add_vertex(0.0, 0.0);

        project
            .mouse_select_press(EditorMode::Select, 0, 100.0, 100.0)
            .unwrap();
        assert!(!project.level(0).unwrap().vertices[0].selected);
    }

    #[test]
    fn test_polygon_selection_flow() {
        let mut project = project_with_level();
        {
            let level = project.level_mut(0).unwrap();
            let a = level.add_vertex(0.0, 0.0);
            let b = level.add_vertex(10.0, 0.0);
            let c = level.add_vertex(5.0, 10.0);
            level
                .add_polygon(Polygon::new(PolygonKind::Floor, vec![a, b, c]))
                .unwrap();
        }

        let hit = project
            .set_selected_containing_polygon(EditorMode::Floor, 0, 5.0, 5.0)
            .unwrap();
        assert_eq!(hit, Some(0));
        assert_eq!(
            project.get_selected_polygon(EditorMode::Floor, 0).unwrap(),
            Some(0)
        );

        // 未命中时清除已有选择
        let miss = project
            .set_selected_containing_polygon(EditorMode::Floor, 0, 50.0, 50.0)
            .unwrap();
        assert_eq!(miss, None);
        assert_eq!(project.get_selected_polygon(EditorMode::Floor, 0).unwrap(), None);
    }

    #[test]
    fn test_polygon_edge_drag_press() {
        let mut project = project_with_level();
        {
            let level = project.level_mut(0).unwrap();
            for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
                level.add_vertex(x, y);
            }
            level
                .add_polygon(Polygon::new(PolygonKind::Zone, vec![0, 1, 2, 3]))
                .unwrap();
        }

        let drag = project
            .polygon_edge_drag_press(EditorMode::Zone, 0, 0, 5.0, 0.5)
            .unwrap()
            .unwrap();
        assert_eq!((drag.start_pos, drag.end_pos), (0, 1));

        // 楼板模式不接受等待区多边形
        assert!(project
            .polygon_edge_drag_press(EditorMode::Floor, 0, 0, 5.0, 0.5)
            .unwrap()
            .is_none());

        assert!(matches!(
            project.polygon_edge_drag_press(EditorMode::Zone, 0, 7, 5.0, 0.5),
            Err(ProjectError::PolygonIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_scenario_state() {
        let mut project = project_with_level();

        assert!(matches!(
            project.add_scenario_vertex(0, 1.0, 2.0),
            Err(ProjectError::NoActiveScenario)
        ));

        project.add_scenario("rush hour");
        assert!(project.scenario_row_clicked(1).is_err());
        project.scenario_row_clicked(0).unwrap();

        project.add_scenario_vertex(0, 1.0, 2.0).unwrap();
        let overlay = project.scenario_level(0).unwrap().unwrap();
        assert_eq!(overlay.vertices.len(), 1);
    }

    #[test]
    fn test_scenario_vertex_competes_in_selection() {
        let mut project = project_with_level();
        project.level_mut(0).unwrap().add_vertex(8.0, 0.0);
        project.add_scenario("rush hour");
        project.scenario_row_clicked(0).unwrap();
        project.add_scenario_vertex(0, 1.0, 0.0).unwrap();

        project
            .mouse_select_press(EditorMode::Select, 0, 2.0, 0.0)
            .unwrap();
        assert!(project.scenarios[0].scenario_levels[0].vertices[0].selected);
        assert!(!project.level(0).unwrap().vertices[0].selected);
    }

    #[test]
    fn test_delete_selected_marks_modified() {
        let mut project = project_with_level();
        let idx = project.level_mut(0).unwrap().add_vertex(0.0, 0.0);
        project.mark_saved();

        project.level_mut(0).unwrap().vertices[idx].selected = true;
        project.mark_saved();
        let result = project.delete_selected(0).unwrap();

        assert!(result.deleted_any);
        assert!(project.is_modified());
    }
}
