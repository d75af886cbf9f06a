use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use virtual_vogue::{
    logger::{self, LogLevel, LoggerConfig},
    session::DOWNLOAD_FILE_NAME,
    AnalyzeClothingImageInput, CompositeClothingOnModelInput, Config, DataUri, Flows,
    GeminiClient, GenerateAiModelInput, ModelForm, TryOnSession, VogueError,
};

#[derive(Parser)]
#[command(name = "vogue", version, about = "AI-powered virtual photoshoots")]
struct Cli {
    /// trace, debug, info, warn or error (overrides VOGUE_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect the garment type, features and suggested model gender of a clothing photo
    Analyze { image: PathBuf },

    /// Generate an AI model image from the model parameters
    Generate {
        #[command(flatten)]
        form: FormArgs,
        #[arg(short, long, default_value = "ai-model.png")]
        output: PathBuf,
    },

    /// Composite a clothing photo onto an existing model image
    Composite {
        clothing: PathBuf,
        model: PathBuf,
        #[arg(short, long, default_value = DOWNLOAD_FILE_NAME)]
        output: PathBuf,
    },

    /// Analyze, generate a model and composite in one go
    TryOn {
        clothing: PathBuf,
        #[command(flatten)]
        form: FormArgs,
        #[arg(short, long, default_value = DOWNLOAD_FILE_NAME)]
        output: PathBuf,
    },

    /// Serve the flows over HTTP
    #[cfg(feature = "server")]
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct FormArgs {
    /// confident, walking or casual-lean (or the full pose text)
    #[arg(long, default_value = "confident")]
    pose: String,

    /// athletic, average or hourglass
    #[arg(long, default_value = "athletic")]
    body_type: String,

    /// light-brown, dark-chocolate, pale-ivory or olive
    #[arg(long, default_value = "light-brown")]
    skin_tone: String,

    /// female or male; try-on follows the garment analysis when omitted
    #[arg(long)]
    gender: Option<String>,
}

impl FormArgs {
    fn to_form(&self) -> virtual_vogue::Result<ModelForm> {
        ModelForm::parse(
            &self.pose,
            &self.body_type,
            &self.skin_tone,
            self.gender.as_deref().unwrap_or("female"),
        )
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let mut logger_config = LoggerConfig::from_env();
    if let Some(level) = cli.log_level {
        logger_config = logger_config.with_level(level);
    }
    if cli.json_logs {
        logger_config = logger_config.with_json_output(true);
    }
    logger::init_with_config(logger_config)?;

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    let gemini_config = config.gemini.clone().unwrap_or_default();
    let flows = Flows::new(Arc::new(GeminiClient::new(gemini_config)?));

    match cli.command {
        Command::Analyze { image } => {
            let photo = read_image(&image).await?;
            let analysis = flows
                .analyze_clothing_image(AnalyzeClothingImageInput::new(photo.to_string()))
                .await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Generate { form, output } => {
            let form = form.to_form()?;
            let result = flows
                .generate_ai_model(GenerateAiModelInput::new(form.description()))
                .await?;
            write_image(&output, &result.model_image).await?;
        }
        Command::Composite {
            clothing,
            model,
            output,
        } => {
            let clothing = read_image(&clothing).await?;
            let model = read_image(&model).await?;
            let result = flows
                .composite_clothing_on_model(CompositeClothingOnModelInput::new(
                    clothing.to_string(),
                    model.to_string(),
                ))
                .await?;
            write_image(&output, &result.composite_image).await?;
        }
        Command::TryOn {
            clothing,
            form,
            output,
        } => {
            let mut session = TryOnSession::new();
            let mut model_form = form.to_form()?;

            let analysis = session
                .upload_clothing(&flows, read_image(&clothing).await?)
                .await?;
            log::info!(
                "👗 {} [{}], suggested model: {}",
                analysis.garment_type,
                analysis.clothing_features.join(", "),
                analysis.suggested_gender
            );
            if form.gender.is_none() {
                model_form = model_form.suggest_from(&analysis);
            }

            session.generate_model(&flows, &model_form).await?;
            session.create_try_on(&flows).await?;

            let download = session.download()?;
            tokio::fs::write(&output, &download.bytes).await?;
            log::info!("💾 Saved {} ({} bytes)", output.display(), download.bytes.len());
        }
        #[cfg(feature = "server")]
        Command::Serve { port } => {
            let config = match port {
                Some(port) => config.with_port(port),
                None => config,
            };
            virtual_vogue::server::run(config, flows).await?;
        }
    }

    Ok(())
}

async fn read_image(path: &Path) -> Result<DataUri, Box<dyn Error>> {
    let mime = mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .ok_or_else(|| {
            VogueError::Validation(format!("{} is not a recognised image file", path.display()))
        })?;

    let bytes = tokio::fs::read(path).await?;
    log::debug!("Read {} ({}, {} bytes)", path.display(), mime, bytes.len());
    Ok(DataUri::from_bytes(mime.essence_str(), &bytes)?)
}

async fn write_image(path: &Path, image: &DataUri) -> Result<(), Box<dyn Error>> {
    let bytes = image.decode()?;
    tokio::fs::write(path, &bytes).await?;
    log::info!(
        "💾 Saved {} ({}, {} bytes)",
        path.display(),
        image.essence(),
        bytes.len()
    );
    Ok(())
}
