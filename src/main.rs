use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use faith_poll::poll::session::SessionError;
use faith_poll::poll::types::{PollRequest, PollSessionState, FAITH_CATEGORIES};
use faith_poll::services::llm::ChatClient;
use faith_poll::services::persistence::{HttpAnswerStore, HttpPollArchive};
use faith_poll::services::translate::{HttpTranslator, Translator};
use faith_poll::{PollConfig, PollSession, SubmissionCoordinator};

type Input = Lines<BufReader<Stdin>>;

async fn prompt(input: &mut Input, label: &str) -> Result<String> {
    println!("{}", label);
    let line = input
        .next_line()
        .await
        .context("reading stdin")?
        .context("stdin closed")?;
    Ok(line.trim().to_string())
}

fn render(state: &PollSessionState) {
    match state {
        PollSessionState::Ready(poll) | PollSessionState::Submitting(poll) => {
            println!("\n📜 {}", poll.poll.question);
            for (i, opt) in poll.display.iter().enumerate() {
                let mark = if opt.selected { "(x)" } else { "( )" };
                println!("  {} {}. {}", mark, i + 1, opt.text);
            }
        }
        PollSessionState::Submitted { chosen, .. } => {
            println!("\n🎉 Your answer has been submitted! 🙌 ({})", chosen);
        }
        PollSessionState::Failed { reason, .. } => println!("\n⚠️  {}", reason),
        PollSessionState::Idle | PollSessionState::Generating => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PollConfig::from_env().context("loading configuration")?;
    tracing::info!("Faith poll starting (chat endpoint: {})", config.chat_url);

    let generator = Arc::new(ChatClient::new(&config.chat_url, config.timeout));
    let coordinator = SubmissionCoordinator::new(
        Arc::new(HttpAnswerStore::new(&config.answer_url, config.timeout)),
        Arc::new(HttpPollArchive::new(&config.record_url, config.timeout)),
    );
    let translator = Translator::new(Arc::new(HttpTranslator::new(&config.translate_url, config.timeout)));
    let mut session = PollSession::new(generator, coordinator, config.timeout);

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let headline = prompt(&mut input, "News headline:").await?;
    let details = prompt(&mut input, "Details:").await?;

    println!("Select your religion (blank for General):");
    for (i, category) in FAITH_CATEGORIES.iter().enumerate() {
        println!("  {}. {}", i + 1, category);
    }
    let pick = prompt(&mut input, ">").await?;
    let category = pick
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| FAITH_CATEGORIES.get(i).copied());
    let request = PollRequest::new(headline, details, category);

    loop {
        println!("✨ Generating...");
        session.start_generation(request.clone());
        render(session.settle().await);

        if let PollSessionState::Failed { .. } = session.state() {
            let again = prompt(&mut input, "Retry? [y/N]").await?;
            if again.eq_ignore_ascii_case("y") {
                continue;
            }
            return Ok(());
        }
        break;
    }

    if let (Some(lang), Some(poll)) = (&config.target_lang, session.state().visible_poll()) {
        let translated = translator.translate_poll(&poll.poll, lang).await;
        println!("\n[{}] {}", lang, translated.question);
        for opt in &translated.options {
            println!("  - {}", opt);
        }
    }

    let selectable = session
        .state()
        .visible_poll()
        .map(|p| !p.display.is_empty())
        .unwrap_or(false);
    if !selectable {
        println!("No options to choose from. Try generating again.");
        return Ok(());
    }

    loop {
        let answer = prompt(&mut input, "Pick an option number, or 's' to submit:").await?;

        if answer.eq_ignore_ascii_case("s") {
            match session.confirm_submission().await {
                Ok(_) => {
                    render(session.state());
                    break;
                }
                Err(SessionError::NoSelection) => println!("Please select an option to submit."),
                Err(e) => {
                    println!("{}", e);
                    let again = prompt(&mut input, "Retry submission? [y/N]").await?;
                    if !again.eq_ignore_ascii_case("y") {
                        break;
                    }
                }
            }
            continue;
        }

        match answer.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(index) => match session.select_option(index) {
                Ok(()) => render(session.state()),
                Err(e) => println!("{}", e),
            },
            None => println!("Not a number: {:?}", answer),
        }
    }

    let snapshot = session.telemetry.snapshot();
    tracing::info!(
        "Session done: {} generations, {} secondary write failures",
        snapshot.generation_stats.started,
        snapshot.submission_stats.secondary_failed
    );
    Ok(())
}

