mod config;
mod output;
mod playback;
mod ui;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use audio_core::{collect_audio, AssembledAudio, CollectError, CollectEvent};
use llm_core::{select_voices, GeminiClient, ScriptRequest, SpeakerVoice};

use crate::config::Config;
use crate::output::OutputWriter;

const BANNER: &str = r#"
 ██████╗  ██████╗ █████╗ ███████╗████████╗
 ██╔══██╗██╔════╝██╔══██╗██╔════╝╚══██╔══╝
 ██████╔╝██║     ███████║███████╗   ██║
 ██╔═══╝ ██║     ██╔══██║╚════██║   ██║
 ██║     ╚██████╗██║  ██║███████║   ██║
 ╚═╝      ╚═════╝╚═╝  ╚═╝╚══════╝   ╚═╝

 AI Podcast Generator
"#;

struct Setup {
    speaker1: String,
    speaker2: String,
    voice1: String,
    voice2: String,
    language: String,
    accent: String,
    duration_minutes: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    run().await
}

async fn run() -> Result<()> {
    println!("{BANNER}");
    println!("This tool generates a podcast script and audio for a topic of your choice.");
    println!("The script gets two speakers and is then synthesized with multi-speaker TTS.\n");

    let config = Config::from_env()?;
    let client = GeminiClient::new(config.api_key.clone())?
        .with_models(&config.script_model, &config.tts_model);
    let writer = OutputWriter::new(&config.output_dir)?;

    let setup = interview_setup()?;

    loop {
        let topic = ui::prompt("\nEnter a podcast topic (or 'quit' to exit)", "")?;
        let lowered = topic.to_ascii_lowercase();
        if topic.is_empty() || matches!(lowered.as_str(), "quit" | "exit" | "q") {
            println!("Exiting the podcast generator. Goodbye!");
            break;
        }

        let request = ScriptRequest {
            topic: topic.clone(),
            speaker1: setup.speaker1.clone(),
            speaker2: setup.speaker2.clone(),
            language: setup.language.clone(),
            duration_minutes: setup.duration_minutes,
        };

        info!(
            "generating podcast script in {} with {} accent",
            setup.language, setup.accent
        );
        let script = match client.generate_script(&request).await {
            Ok(script) => script,
            Err(err) => {
                error!("script generation failed: {err}");
                println!("Please try again with a different topic.");
                continue;
            }
        };

        print_script(&script, &setup.speaker1, &setup.speaker2);

        let proceed = ui::prompt("Generate audio for this script? (y/n)", "y")?;
        if !proceed.eq_ignore_ascii_case("y") {
            continue;
        }

        match generate_audio(&client, &setup, &script).await {
            Ok(assembled) => {
                let base = output::base_name(&topic, &output::timestamp());
                match writer.save_podcast(&base, &script, &assembled) {
                    Ok((audio_path, script_path)) => {
                        println!("Complete podcast audio saved as: {}", audio_path.display());
                        println!("Script saved as: {}", script_path.display());

                        let play = ui::prompt("Would you like to play the audio now? (y/n)", "n")?;
                        if play.eq_ignore_ascii_case("y") {
                            match playback::play(&audio_path) {
                                Ok(()) => {
                                    println!("Audio playback started in your default media player.")
                                }
                                Err(err) => {
                                    warn!("could not play audio: {err}");
                                    println!(
                                        "Please play the file manually: {}",
                                        audio_path.display()
                                    );
                                }
                            }
                        }
                    }
                    Err(err) => error!("could not save podcast files: {err}"),
                }
            }
            Err(err) => {
                error!("audio generation failed: {err}");
                println!("Please try again with a different topic.");
            }
        }
    }

    Ok(())
}

/// One-time setup: speaker names, voices, language, accent, duration.
fn interview_setup() -> Result<Setup> {
    println!("Let's set up your podcast speakers:");
    let speaker1 = ui::prompt("Enter name for first speaker", "Host 1")?;
    let speaker2 = ui::prompt("Enter name for second speaker", "Host 2")?;

    let gender_options = [("1", "Male"), ("2", "Female"), ("3", "Neutral")];
    let g1 = ui::menu("Select voice type for first speaker:", &gender_options, "1")?;
    let g2 = ui::menu("Select voice type for second speaker:", &gender_options, "2")?;
    let gender1 = match g1.as_str() {
        "2" => "female",
        "3" => "neutral",
        _ => "male",
    };
    let gender2 = match g2.as_str() {
        "1" => "male",
        "3" => "neutral",
        _ => "female",
    };

    let (voice1, voice2) = select_voices(gender1, gender2);
    println!(
        "Your podcast will feature {speaker1} (voice: {voice1}) and {speaker2} (voice: {voice2})."
    );

    let language = match ui::menu(
        "Select script language:",
        &[
            ("1", "English"),
            ("2", "Tagalog"),
            ("3", "Taglish (Tagalog-English)"),
        ],
        "1",
    )?
    .as_str()
    {
        "2" => "tagalog",
        "3" => "taglish",
        _ => "english",
    }
    .to_string();

    let accent = match ui::menu(
        "Select accent:",
        &[("1", "English"), ("2", "Tagalog"), ("3", "Neutral")],
        "3",
    )?
    .as_str()
    {
        "1" => "english",
        "2" => "tagalog",
        _ => "neutral",
    }
    .to_string();

    let duration_minutes = match ui::menu(
        "Select podcast duration:",
        &[("1", "Short (2-3 minutes)"), ("2", "Medium (4-5 minutes)")],
        "1",
    )?
    .as_str()
    {
        "2" => 5,
        _ => 3,
    };
    println!("Note: actual audio duration may vary slightly from the target length.");

    Ok(Setup {
        speaker1,
        speaker2,
        voice1,
        voice2,
        language,
        accent,
        duration_minutes,
    })
}

/// Run the collector with a progress task draining lifecycle events.
async fn generate_audio(
    client: &GeminiClient,
    setup: &Setup,
    script: &str,
) -> Result<AssembledAudio, CollectError> {
    let source = client.tts_source(
        script,
        &setup.accent,
        [
            SpeakerVoice {
                speaker: setup.speaker1.clone(),
                voice: setup.voice1.clone(),
            },
            SpeakerVoice {
                speaker: setup.speaker2.clone(),
                voice: setup.voice2.clone(),
            },
        ],
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let progress = tokio::spawn(async move {
        let mut chunks = 0usize;
        while let Some(event) = rx.recv().await {
            match event {
                CollectEvent::AttemptStarted { attempt, max } => {
                    info!("audio generation attempt {attempt}/{max}");
                }
                CollectEvent::ChunkReceived { bytes } => {
                    chunks += 1;
                    debug!("audio chunk {chunks} received ({bytes} bytes)");
                }
                CollectEvent::Diagnostic(text) => println!("{text}"),
                CollectEvent::AttemptFailed { attempt, error } => {
                    warn!("attempt {attempt} failed: {error}");
                }
                CollectEvent::Completed { chunks, bytes } => {
                    info!("collected {chunks} audio chunks ({bytes} bytes)");
                }
            }
        }
    });

    let result = collect_audio(&source, Some(&tx)).await;
    drop(tx);
    let _ = progress.await;
    result
}

fn print_script(script: &str, speaker1: &str, speaker2: &str) {
    println!("\n===== GENERATED SCRIPT =====");
    let prefix1 = format!("{speaker1}:");
    let prefix2 = format!("{speaker2}:");
    for line in script.lines() {
        if line.contains(&prefix1) {
            println!("  > {line}");
        } else if line.contains(&prefix2) {
            println!("  < {line}");
        } else {
            println!("    {line}");
        }
    }
    println!("===== END OF SCRIPT =====\n");
}
