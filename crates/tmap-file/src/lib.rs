//! TMAP 工程文件处理
//!
//! 支持：
//! - `.tmap.json` 原生格式（带版本号的JSON文本）
//! - 加载时的下标引用完整性校验

pub mod error;
pub mod native;

pub use error::FileError;
pub use native::{load, save};
