//! Story Files - 文件系统故事存储实现
//!
//! 实现 StoryStorePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{StoryError, StoryStorePort, StoryText};
use crate::domain::speech::AudioFormat;

/// 故事文件后缀
pub const STORY_SUFFIX: &str = "-story.txt";

/// 音频文件名中缀
const AUDIO_INFIX: &str = "-audio";

/// 文件系统故事存储
pub struct FileStoryStore {
    /// 故事与音频所在目录
    base_dir: PathBuf,
}

impl FileStoryStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 剧集音频路径
    pub fn audio_path(&self, episode_id: &str, format: AudioFormat) -> PathBuf {
        self.base_dir
            .join(format!("{}{}.{}", episode_id, AUDIO_INFIX, format.extension()))
    }
}

/// 从文件名提取剧集 ID
pub fn episode_id_from_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(STORY_SUFFIX)
        .filter(|id| !id.is_empty())
}

#[async_trait]
impl StoryStorePort for FileStoryStore {
    async fn latest_story(&self) -> Result<StoryText, StoryError> {
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| StoryError::IoError(format!("{}: {}", self.base_dir.display(), e)))?;

        let mut latest: Option<String> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoryError::IoError(e.to_string()))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if episode_id_from_name(&name).is_none() {
                continue;
            }
            // 剧集 ID 以时间戳开头，字典序最大即最新
            if latest.as_deref().map_or(true, |current| name.as_str() > current) {
                latest = Some(name);
            }
        }

        let name = latest
            .ok_or_else(|| StoryError::NoStories(self.base_dir.display().to_string()))?;

        tracing::debug!(file = %name, "Selected latest story file");

        self.read_story(self.base_dir.join(name)).await
    }

    async fn read_story(&self, path: PathBuf) -> Result<StoryText, StoryError> {
        let episode_id = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(episode_id_from_name)
            .map(str::to_string)
            .ok_or_else(|| StoryError::InvalidName(path.display().to_string()))?;

        let text = fs::read_to_string(&path)
            .await
            .map_err(|e| StoryError::IoError(format!("{}: {}", path.display(), e)))?;

        Ok(StoryText {
            episode_id,
            path,
            text,
        })
    }

    async fn save_audio(
        &self,
        episode_id: &str,
        format: AudioFormat,
        data: &[u8],
    ) -> Result<PathBuf, StoryError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| StoryError::IoError(e.to_string()))?;

        let audio_path = self.audio_path(episode_id, format);
        fs::write(&audio_path, data)
            .await
            .map_err(|e| StoryError::IoError(e.to_string()))?;

        tracing::debug!(
            "Saved audio: episode={}, path={}, size={} bytes",
            episode_id,
            audio_path.display(),
            data.len()
        );

        Ok(audio_path)
    }
}
