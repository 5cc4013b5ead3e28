//! Research command handlers.
//!
//! Each handler resolves the audiences it needs from the store, makes one
//! gateway call (four for the dashboard) and prints the rendered result.

use std::io::Write as _;

use audiencelab_core::{DiscoveredAudience, ResearchResult};
use audiencelab_gateway::ResearchGateway;
use audiencelab_store::{AudienceStore, BlobStore};
use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::audiences::find_audience;
use crate::render;

/// Sub-commands available under `research`.
#[derive(Debug, Subcommand)]
pub enum ResearchCommands {
    /// Ask a free-form market question
    Market { query: String },
    /// Run the four standard audience questions
    Dashboard { id: String },
    /// Talk to an audience persona; reads questions from stdin without --message
    Chat {
        id: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Generate chart data for a topic, optionally against a second audience
    Chart {
        id: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        compare_with: Option<String>,
    },
    /// Explain one label of a chart in detail
    ChartDetail {
        id: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        label: String,
    },
    /// Generate marketing campaign ideas for a goal
    Campaign {
        id: String,
        #[arg(long)]
        goal: String,
    },
    /// Compare two audiences side by side
    Compare {
        audience_a: String,
        audience_b: String,
        #[arg(long)]
        question: String,
    },
    /// Discover consumer segments within a market
    Discover {
        market: String,
        /// Save every discovered segment as an audience
        #[arg(long)]
        save: bool,
    },
}

/// Dispatch a `research` sub-command.
///
/// # Errors
///
/// Returns an error if an audience id is unknown or the gateway call fails.
/// Dashboard widget failures and chat errors are printed, not returned.
pub(crate) async fn run_research<B: BlobStore>(
    store: &AudienceStore<B>,
    gateway: &ResearchGateway,
    command: ResearchCommands,
) -> anyhow::Result<()> {
    match command {
        ResearchCommands::Market { query } => {
            print_result(&gateway.market_research(&query).await?);
        }
        ResearchCommands::Dashboard { id } => {
            let audience = find_audience(store, &id)?;
            println!("Dashboard: {}", audience.name);
            for report in gateway.dashboard(&audience).await {
                println!();
                println!("== {} ==", report.widget.title);
                match report.result {
                    Ok(result) => print_result(&result),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        ResearchCommands::Chat { id, message } => {
            let audience = find_audience(store, &id)?;
            match message {
                Some(message) => {
                    let answer = gateway.persona_chat(&audience, &message).await?;
                    println!("{}", render::html_to_text(&answer));
                }
                None => run_chat_loop(gateway, &audience).await?,
            }
        }
        ResearchCommands::Chart {
            id,
            topic,
            compare_with,
        } => {
            let audience = find_audience(store, &id)?;
            if let Some(other_id) = compare_with {
                let other = find_audience(store, &other_id)?;
                let chart = gateway
                    .comparison_chart_data(&audience, &other, &topic)
                    .await?;
                print!(
                    "{}",
                    render::format_comparison_chart(&chart.data, &audience.name, &other.name)
                );
                print_sources(&chart.sources);
            } else {
                let chart = gateway.chart_data(&audience, &topic).await?;
                print!("{}", render::format_chart(&chart.data));
                print_sources(&chart.sources);
            }
        }
        ResearchCommands::ChartDetail { id, topic, label } => {
            let audience = find_audience(store, &id)?;
            print_result(&gateway.chart_detail(&audience, &topic, &label).await?);
        }
        ResearchCommands::Campaign { id, goal } => {
            let audience = find_audience(store, &id)?;
            print_result(&gateway.campaign_ideas(&audience, &goal).await?);
        }
        ResearchCommands::Compare {
            audience_a,
            audience_b,
            question,
        } => {
            let a = find_audience(store, &audience_a)?;
            let b = find_audience(store, &audience_b)?;
            print_result(&gateway.compare_audiences(&a, &b, &question).await?);
        }
        ResearchCommands::Discover { market, save } => {
            let found = gateway.discover_audiences(&market).await?;
            if found.data.is_empty() {
                println!("no audience segments found for '{market}'");
            }
            for segment in &found.data {
                println!("{}", segment.audience_name);
                println!("  {}", segment.description);
            }
            print_sources(&found.sources);

            if save {
                let failed = save_discovered(store, &found.data);
                if failed > 0 {
                    println!("{failed} of {} segments could not be saved", found.data.len());
                }
            }
        }
    }
    Ok(())
}

/// Promote each discovered segment on its own; one bad segment does not stop the rest.
///
/// Returns the number of segments that failed.
pub(crate) fn save_discovered<B: BlobStore>(
    store: &AudienceStore<B>,
    segments: &[DiscoveredAudience],
) -> usize {
    let mut failed = 0;
    for segment in segments {
        match store.promote(segment) {
            Ok(audience) => println!("saved audience '{}' ({})", audience.name, audience.id),
            Err(e) => {
                tracing::warn!(
                    name = %segment.audience_name,
                    error = %e,
                    "failed to save discovered audience"
                );
                println!("could not save '{}': {e}", segment.audience_name);
                failed += 1;
            }
        }
    }
    failed
}

/// Read questions from stdin until EOF or `exit`, answering each in persona.
///
/// A failed turn is shown as the persona's reply and the loop continues.
async fn run_chat_loop(
    gateway: &ResearchGateway,
    audience: &audiencelab_core::Audience,
) -> anyhow::Result<()> {
    println!(
        "Chatting with '{}'. Type a question, or `exit` to stop.",
        audience.name
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match gateway.persona_chat(audience, question).await {
            Ok(answer) => println!("{}", render::html_to_text(&answer)),
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                println!("Sorry, I encountered an error: {e}");
            }
        }
    }
    Ok(())
}

fn print_result(result: &ResearchResult) {
    println!("{}", render::html_to_text(&result.answer));
    print_sources(&result.sources);
}

fn print_sources(sources: &[audiencelab_core::Source]) {
    let rendered = render::format_sources(sources);
    if !rendered.is_empty() {
        println!();
        print!("{rendered}");
    }
}
