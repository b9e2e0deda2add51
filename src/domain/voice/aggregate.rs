//! Voice Context - 音色快照

use serde::{Deserialize, Serialize};

use super::Gender;

/// 音色
///
/// 远端音色目录的只读快照，不做本地持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
    pub gender: Gender,
}

impl Voice {
    /// 语言标签是否以给定前缀开头
    pub fn speaks(&self, language_prefix: &str) -> bool {
        self.language.starts_with(language_prefix)
    }
}

/// 按语言前缀过滤音色，保持原有顺序
pub fn filter_by_language(voices: Vec<Voice>, language_prefix: &str) -> Vec<Voice> {
    voices
        .into_iter()
        .filter(|voice| voice.speaks(language_prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, language: &str) -> Voice {
        Voice {
            id: id.to_string(),
            name: id.to_uppercase(),
            language: language.to_string(),
            gender: Gender::Other,
        }
    }

    #[test]
    fn test_filter_keeps_order_and_prefix() {
        let voices = vec![
            voice("scott", "en-US"),
            voice("lucia", "es-ES"),
            voice("george", "en-GB"),
            voice("mystery", "unknown"),
        ];

        let english = filter_by_language(voices, "en");
        let ids: Vec<_> = english.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["scott", "george"]);
        assert!(english.iter().all(|v| v.language.starts_with("en")));
    }

    #[test]
    fn test_gender_serializes_lowercase() {
        let value = serde_json::to_value(voice("scott", "en-US")).unwrap();
        assert_eq!(value["gender"], "other");
    }
}
