//! TMAP原生工程格式（.tmap.json）
//!
//! 带版本号的JSON文本：一个建筑节点（各楼层的底图信息与全部实体
//! 列表，边/多边形以整数下标引用顶点）加一个场景列表。加载时校验
//! 格式版本与下标引用的完整性，任一校验失败整体中止，不产生半成品
//! 工程。

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tmap_core::project::Project;
use tracing::{debug, info};

/// 当前文件格式版本
const FORMAT_VERSION: u32 = 1;

/// 磁盘上的工程文档
#[derive(Deserialize)]
struct ProjectFile {
    format_version: u32,

    #[serde(flatten)]
    project: Project,
}

/// 写出用的借用视图，避免整棵工程树的克隆
#[derive(Serialize)]
struct ProjectFileRef<'a> {
    format_version: u32,

    #[serde(flatten)]
    project: &'a Project,
}

/// 保存工程到文件
///
/// 序列化不会因数据内容失败，只可能因底层IO失败。
pub fn save(project: &Project, path: &Path) -> Result<(), FileError> {
    let doc = ProjectFileRef {
        format_version: FORMAT_VERSION,
        project,
    };

    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json)?;

    info!(
        path = %path.display(),
        levels = project.building.levels.len(),
        scenarios = project.scenarios.len(),
        "project saved"
    );
    Ok(())
}

/// 从文件加载工程
///
/// 结构损坏返回 [`FileError::Json`]，边/多边形引用越界顶点下标或
/// 多边形退化返回 [`FileError::Integrity`]；出错时调用方已打开的
/// 工程不受影响。
pub fn load(path: &Path) -> Result<Project, FileError> {
    let json = std::fs::read_to_string(path)?;
    let doc: ProjectFile = serde_json::from_str(&json)?;

    if doc.format_version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(format!(
            "file version {} is newer than supported version {}",
            doc.format_version, FORMAT_VERSION
        )));
    }

    validate(&doc.project)?;

    debug!(
        path = %path.display(),
        levels = doc.project.building.levels.len(),
        "project loaded"
    );
    Ok(doc.project)
}

/// 校验全部楼层的下标引用完整性
fn validate(project: &Project) -> Result<(), FileError> {
    for level in &project.building.levels {
        level
            .integrity_check()
            .map_err(|e| FileError::Integrity(format!("level '{}': {}", level.name, e)))?;
    }
    Ok(())
}
