//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色目录记录的稳定表示
//! - 性别与语言字段的归一化规则
//! - 按语言过滤

mod aggregate;
mod value_objects;

pub use aggregate::{filter_by_language, Voice};
pub use value_objects::{resolve_language, Gender, UNKNOWN_LANGUAGE};
