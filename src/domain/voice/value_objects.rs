//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 语言未知时的占位值
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// 音色性别
///
/// 封闭集合，供应商返回 male/female 以外的任何值都归为 Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// 从供应商原始字段归一化
    ///
    /// 供应商字段形态不受约束（可能缺失、为 null、非字符串）
    pub fn from_vendor(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(|v| v.as_str()) {
            Some("male") => Self::Male,
            Some("female") => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 解析音色语言
///
/// 回退链: 显式 locale → 首个模型的首个语言 → "unknown"，空字符串视为缺失
pub fn resolve_language(locale: Option<&str>, model_locale: Option<&str>) -> String {
    locale
        .filter(|l| !l.is_empty())
        .or_else(|| model_locale.filter(|l| !l.is_empty()))
        .unwrap_or(UNKNOWN_LANGUAGE)
        .to_string()
}
