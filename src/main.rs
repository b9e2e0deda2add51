//! Storyvoice - 睡前故事 TTS 生成
//!
//! 命令行入口:
//! - generate: 为最新（或指定）故事生成音频
//! - voices: 列出 Speechify 音色
//! - smoke: 对 Speechify 接入做冒烟检查

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use storyvoice::application::{
    GenerateEpisodeAudio, GenerateEpisodeAudioHandler, ListVoices, ListVoicesHandler,
    RunSmokeCheck, RunSmokeCheckHandler,
};
use storyvoice::config::{load_config, load_config_from_path, print_config, AppConfig};
use storyvoice::domain::speech::{AudioFormat, LegacyVoiceSettings};
use storyvoice::infrastructure::{FileStoryStore, LegacyCompatibleTtsProvider, SpeechifyTtsClient};

/// 历史脚本沿用的 ElevenLabs 参数
const LEGACY_STABILITY: f32 = 0.5;
const LEGACY_SIMILARITY_BOOST: f32 = 0.8;

#[derive(Parser, Debug)]
#[command(name = "storyvoice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate sleep-story narration with Speechify")]
struct Args {
    /// Load settings from a specific config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize the latest story in the output directory (default)
    Generate {
        /// Story file to read instead of the latest one
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Voice id (defaults to the configured voice)
        #[arg(long)]
        voice: Option<String>,

        /// Language tag (defaults to the configured story language)
        #[arg(long)]
        language: Option<String>,

        /// Output format: mp3, wav, ogg or aac
        #[arg(long)]
        format: Option<AudioFormat>,
    },

    /// List available voices
    Voices {
        /// Only show voices whose language starts with this prefix
        #[arg(long)]
        language: Option<String>,
    },

    /// Run the Speechify integration smoke check
    Smoke {
        /// Where to save the sample audio
        #[arg(long, default_value = "test-output")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env.local 可选
    let _ = dotenvy::from_filename(".env.local");

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config_from_path(Some(path.as_path())),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    setup_tracing(&config);
    print_config(&config);

    let command = args.command.unwrap_or(Command::Generate {
        input: None,
        voice: None,
        language: None,
        format: None,
    });

    match command {
        Command::Generate {
            input,
            voice,
            language,
            format,
        } => {
            let tts = Arc::new(LegacyCompatibleTtsProvider::with_provider(Arc::new(
                speechify_client(&config)?,
            )));
            let stories = Arc::new(FileStoryStore::new(&config.story.output_dir));
            let handler = GenerateEpisodeAudioHandler::new(tts, stories);

            let response = handler
                .handle(GenerateEpisodeAudio {
                    story_path: input,
                    voice: Some(voice.unwrap_or_else(|| config.speechify.default_voice.clone())),
                    language: Some(language.unwrap_or_else(|| config.story.language.clone())),
                    format: format.unwrap_or(config.story.format),
                    legacy: LegacyVoiceSettings::new(LEGACY_STABILITY, LEGACY_SIMILARITY_BOOST),
                })
                .await
                .context("Error generating audio")?;

            println!("Audio saved to {}", response.audio_path.display());
        }
        Command::Voices { language } => {
            let handler = ListVoicesHandler::new(Arc::new(speechify_client(&config)?));
            let voices = handler.handle(ListVoices { language }).await?;

            for voice in &voices {
                println!("{} ({}) {} {}", voice.name, voice.id, voice.language, voice.gender);
            }
            println!("{} voices", voices.len());
        }
        Command::Smoke { output_dir } => {
            let handler = RunSmokeCheckHandler::new(Arc::new(speechify_client(&config)?));
            let report = handler
                .handle(RunSmokeCheck {
                    voice: config.speechify.default_voice.clone(),
                })
                .await
                .context("Speechify TTS smoke check failed")?;

            for (index, step) in report.steps.iter().enumerate() {
                println!("{}. {}: {}", index + 1, step.name, step.detail);
            }

            tokio::fs::create_dir_all(&output_dir).await?;
            let sample_path = output_dir.join("speechify-test.mp3");
            tokio::fs::write(&sample_path, &report.sample_audio).await?;
            println!(
                "Test audio saved to {} ({} bytes)",
                sample_path.display(),
                report.sample_audio.len()
            );
        }
    }

    Ok(())
}

fn speechify_client(config: &AppConfig) -> anyhow::Result<SpeechifyTtsClient> {
    let api_key = config
        .speechify
        .api_key
        .clone()
        .context("Missing SPEECHIFY_API_KEY in environment.")?;
    Ok(SpeechifyTtsClient::with_config(
        config.speechify.client_config(api_key),
    )?)
}

fn setup_tracing(config: &AppConfig) {
    let log_filter = format!("{},storyvoice={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
