//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Speech Context: 合成请求、结果与模型选择
//! - Voice Context: 音色目录

pub mod speech;
pub mod voice;
