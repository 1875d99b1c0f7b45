use anyhow::{anyhow, Context};
use bedtime::{ChildInfo, Language, Rating, StoryConfig, StoryError, StoryRequest, StoryService};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generate a personalized bedtime story.
#[derive(Debug, Parser)]
#[command(name = "bedtime", version)]
struct Args {
    /// A child as NAME:AGE. Repeat for up to five children.
    #[arg(long = "child", required = true, value_parser = parse_child)]
    children: Vec<ChildInfo>,

    /// Favorite toys, activities and today's events.
    #[arg(long, default_value = "")]
    activities: String,

    /// Values the story should teach.
    #[arg(long, default_value = "")]
    values: String,

    /// Story language (label or ISO code). Defaults to DEFAULT_LANGUAGE.
    #[arg(long)]
    language: Option<String>,

    /// Provider or model override; takes precedence over MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Rate the generated story from 1 to 5.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rating: Option<u8>,
}

fn parse_child(value: &str) -> Result<ChildInfo, String> {
    let (name, age) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:AGE, got '{value}'"))?;
    let age = age
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("age must be a number, got '{age}'"))?;
    Ok(ChildInfo::new(name.trim(), age))
}

fn user_message(err: &StoryError) -> String {
    match err {
        StoryError::ModeratedContent { .. } => {
            "Some of the details were flagged as unsuitable for children. Please change them and try again."
                .to_string()
        }
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = StoryConfig::from_env().context("reading configuration")?;
    if let Some(model) = args.model {
        config.model = Some(model);
    }
    let service = StoryService::from_config(&config).await?;

    let language = match args.language.as_deref() {
        Some(value) => value.parse::<Language>()?,
        None => service.default_language(),
    };
    let request = StoryRequest::new(args.children, args.activities, args.values, language)?;

    let outcome = match service.generate(request).await {
        Ok(outcome) => outcome,
        Err(err) => return Err(anyhow!(user_message(&err))),
    };

    println!("{}", outcome.story);
    tracing::info!(
        provider = %outcome.provider,
        elapsed_seconds = outcome.elapsed_seconds,
        "story delivered"
    );

    if let Some(rating) = args.rating {
        service
            .rate(outcome.record_id.as_ref(), Rating::new(rating)?)
            .await;
    }
    Ok(())
}
