use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use episode_publisher::{AzureBlobStore, BitlyShortener, EpisodePublisher, HostedEpisodeClient};
use pdf_pod::{
    tracing::init_tracing_subscriber, types::EpisodeDraft, EpisodePipeline,
    EpisodePipelineBuilder, MistralClient, OpenAIClient, PdfTextExtractor, ScriptGenerator,
};

#[derive(Parser)]
#[command(name = "pdf-pod", about = "Turns PDF research papers into published podcast episodes")]
struct Cli {
    /// OpenAI API key (generation and speech synthesis)
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_key: String,

    /// Mistral API key, required with `--provider mistral`
    #[arg(long, env = "MISTRAL_API_KEY")]
    mistral_key: Option<String>,

    /// Azure Storage connection string
    #[arg(long, env = "AZURE_STORAGE_CONNECTION_STRING")]
    storage_connection_string: String,

    /// Blob container episode audio is uploaded to
    #[arg(long, env = "AZURE_STORAGE_CONTAINER", default_value = "episodes")]
    container: String,

    /// Link shortener API key
    #[arg(long, env = "BITLY_API_KEY")]
    shortener_key: String,

    /// Link shortener group the short links are filed under
    #[arg(long, env = "BITLY_GROUP_GUID")]
    shortener_group: String,

    /// Podcast host episodes endpoint
    #[arg(long, env = "PODCAST_HOST_URL")]
    host_url: String,

    /// Podcast host API key
    #[arg(long, env = "PODCAST_HOST_API_KEY")]
    host_key: String,

    /// Text generation provider
    #[arg(long, value_enum, default_value_t = Provider::OpenAi)]
    provider: Provider,

    /// Working directory for audio artifacts and drafts
    #[arg(long, default_value = "/var/tmp/pdf-pod")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Provider {
    #[value(name = "openai")]
    OpenAi,
    Mistral,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the episode (script, title, description, audio) without publishing
    Generate {
        /// PDF file to process
        pdf: PathBuf,
    },
    /// Publish a previously generated draft
    Publish {
        /// Draft JSON written by `generate`
        draft: PathBuf,
        /// Register the episode as private
        #[arg(long)]
        private: bool,
    },
    /// Run the full pipeline end to end
    Run {
        /// PDF file to process
        pdf: PathBuf,
        /// Register the episode as private
        #[arg(long)]
        private: bool,
    },
}

type Publisher = EpisodePublisher<AzureBlobStore, BitlyShortener, HostedEpisodeClient>;

fn build_pipeline<G>(
    cli: &Cli,
    generator: G,
) -> anyhow::Result<EpisodePipeline<PdfTextExtractor, G, OpenAIClient, Publisher>>
where
    G: ScriptGenerator + Send + Sync + 'static,
{
    let blobs = AzureBlobStore::from_connection_string(
        &cli.storage_connection_string,
        &cli.container,
    )
    .context("Invalid Azure Storage connection string")?;
    let shortener = BitlyShortener::new(&cli.shortener_key, &cli.shortener_group);
    let host = HostedEpisodeClient::new(&cli.host_url, &cli.host_key);

    Ok(EpisodePipelineBuilder::new(&cli.workdir)
        .extractor(PdfTextExtractor)
        .generator(generator)
        .synthesizer(OpenAIClient::new(&cli.openai_key))
        .publisher(EpisodePublisher::new(blobs, shortener, host))
        .build())
}

async fn execute<G>(cli: &Cli, generator: G) -> anyhow::Result<()>
where
    G: ScriptGenerator + Send + Sync + 'static,
{
    let pipeline = build_pipeline(cli, generator)?;

    match &cli.command {
        Command::Generate { pdf } => {
            let pdf_bytes = tokio::fs::read(pdf)
                .await
                .with_context(|| format!("Failed to read PDF at {}", pdf.display()))?;
            let draft = pipeline.generate(&pdf_bytes).await?;
            tracing::info!(
                run_id = %draft.run_id,
                title = %draft.metadata.title,
                "Draft ready; publish it with `pdf-pod publish`"
            );
        }
        Command::Publish { draft, private } => {
            let draft = EpisodeDraft::load(draft).await?;
            let episode = pipeline.publish(&draft, *private).await?;
            tracing::info!(
                audio_url = %episode.audio_url,
                status = episode.receipt.status,
                "Episode published"
            );
        }
        Command::Run { pdf, private } => {
            let pdf_bytes = tokio::fs::read(pdf)
                .await
                .with_context(|| format!("Failed to read PDF at {}", pdf.display()))?;
            let (draft, episode) = pipeline.run(&pdf_bytes, *private).await?;
            tracing::info!(
                run_id = %draft.run_id,
                audio_url = %episode.audio_url,
                "Episode generated and published"
            );
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    match cli.provider {
        Provider::OpenAi => {
            let generator = OpenAIClient::new(&cli.openai_key);
            execute(&cli, generator).await
        }
        Provider::Mistral => {
            let key = cli
                .mistral_key
                .clone()
                .context("MISTRAL_API_KEY is required with --provider mistral")?;
            execute(&cli, MistralClient::new(key)).await
        }
    }
}
