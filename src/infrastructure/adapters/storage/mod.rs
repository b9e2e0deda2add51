//! Storage Adapter - 故事文件存储

mod story_files;

pub use story_files::{episode_id_from_name, FileStoryStore, STORY_SUFFIX};
