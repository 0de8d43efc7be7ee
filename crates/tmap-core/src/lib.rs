//! TMAP 核心引擎
//!
//! 维护楼层平面交通图的非可视核心：几何数据模型、把用户交互
//! 解析为实体选择的空间查询，以及比例标定与批量删除等编辑操作。
//!
//! # 架构设计
//!
//! - 实体间引用采用"容器 + 下标"：顶点存放在楼层的有序容器中，
//!   边/多边形持有整数下标而非直接引用，序列化因此保持平凡，
//!   删除时统一重编号以避免悬挂引用。
//! - 空间查询（`spatial`）是纯查询模块；选择状态等修改由
//!   `Level`/`Project` 在单写者约定下完成。
//! - 模式相关的行为差异通过 `EditorMode` 的能力谓词显式分派。
//!
//! # 示例
//!
//! ```rust
//! use tmap_core::prelude::*;
//!
//! let mut level = Level::new("L1");
//! let a = level.add_vertex(0.0, 0.0);
//! let b = level.add_vertex(3.0, 4.0);
//! level.add_edge(Edge::measurement(a, b, 5.0)).unwrap();
//!
//! // 5 像素对应 5 米
//! level.calculate_scale();
//! assert!((level.drawing_meters_per_pixel - 1.0).abs() < 1e-10);
//! ```

pub mod building;
pub mod edge;
pub mod fiducial;
pub mod level;
pub mod math;
pub mod mode;
pub mod model;
pub mod polygon;
pub mod project;
pub mod scenario;
pub mod spatial;
pub mod vertex;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::building::Building;
    pub use crate::edge::{DoorParams, DoorType, Edge, EdgeKind, LaneOrientation};
    pub use crate::fiducial::Fiducial;
    pub use crate::level::{DeleteResult, Level, LevelError};
    pub use crate::math::{Point2, Vector2};
    pub use crate::mode::EditorMode;
    pub use crate::model::Model;
    pub use crate::polygon::{EdgeDrag, Polygon, PolygonKind};
    pub use crate::project::{Project, ProjectError};
    pub use crate::scenario::{Scenario, ScenarioLevel};
    pub use crate::spatial::NearestItem;
    pub use crate::vertex::Vertex;
}
