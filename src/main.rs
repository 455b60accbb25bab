//! MindWell terminal chat
//!
//! Reads lines from stdin, hands them to the conversation, and prints
//! messages as they are appended.

use mindwell::quick_reply::{self, QUICK_REPLIES};
use mindwell::{ChatConfig, ChatEvent, Conversation, EmotionLabel, Message, Sender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interleave with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindwell=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ChatConfig::from_env()?;
    let conversation = Conversation::from_config(&config)?;
    tracing::info!(
        conv_id = %conversation.conversation_id(),
        min_delay_ms = %config.delay.min().as_millis(),
        max_delay_ms = %config.delay.max().as_millis(),
        seeded = config.seed.is_some(),
        "Chat session started"
    );

    let mut events = conversation.subscribe();
    for message in &conversation.snapshot().messages {
        print_message(message);
    }
    print_quick_replies();

    let renderer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ChatEvent::MessageAppended { message }) => print_message(&message),
                Ok(ChatEvent::ComposingChanged { composing: true }) => {
                    println!("  MindWell is typing...");
                }
                Ok(ChatEvent::ComposingChanged { composing: false }) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if let Some(command) = input.strip_prefix('/') {
            match command {
                "quit" => break,
                "quick" => print_quick_replies(),
                "snapshot" => println!("{}", serde_json::to_string_pretty(&conversation.snapshot())?),
                other => match other.parse().ok().and_then(quick_reply::by_number) {
                    Some(shortcut) => conversation.submit(shortcut.text),
                    None => println!("Unknown command: /{other}"),
                },
            }
            continue;
        }

        if conversation.snapshot().composing {
            println!("  (MindWell is still replying, please wait)");
        }
        conversation.submit(input);
    }

    conversation.close();
    drop(conversation);
    renderer.await?;

    tracing::info!("Chat session ended");
    Ok(())
}

fn print_message(message: &Message) {
    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    match message.sender {
        Sender::Bot => println!("[{time}] MindWell: {}", message.text),
        Sender::User => match message.emotion {
            Some(emotion) if emotion != EmotionLabel::Neutral => {
                println!("[{time}] You ({emotion}): {}", message.text);
            }
            _ => println!("[{time}] You: {}", message.text),
        },
    }
}

fn print_quick_replies() {
    println!("Quick replies (type /N to send, /snapshot to dump state, /quit to leave):");
    for (i, shortcut) in QUICK_REPLIES.iter().enumerate() {
        println!("  /{}  {}", i + 1, shortcut.label);
    }
}
