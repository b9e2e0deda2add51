//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：生成剧集音频、集成冒烟检查

mod audio_commands;

pub mod handlers;

pub use audio_commands::*;
