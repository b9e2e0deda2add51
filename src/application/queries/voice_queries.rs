//! Voice Queries

/// 列出音色目录查询
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    /// 语言前缀过滤（如 "en"）
    pub language: Option<String>,
}
