use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use time::OffsetDateTime;

mod api;
mod config;
mod layout;
mod lesson;
mod lesson_export;
mod pdf;

#[cfg(test)]
mod pdf_tests;

use config::Config;
use lesson::LessonRecord;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render a lesson JSON file to PDF
    Render {
        /// Path to the lesson description
        path: PathBuf,
        /// Output file, defaults to the suggested lesson filename
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let res = match cli.command {
        Some(Commands::Render { path, output }) => render(path, output),
        Some(Commands::Serve { host, port, config }) => serve(host, port, config).await,
        None => serve(None, None, None).await,
    };
    if let Err(e) = res {
        log::error!("{e:?}");
        std::process::exit(1);
    }
}

fn render(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading lesson file {}", path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing lesson file {}", path.display()))?;
    let lesson = LessonRecord::from_json(&payload)?;

    let pdf = lesson_export::generate_lesson_pdf(&lesson, OffsetDateTime::now_utc());
    let output = output.unwrap_or_else(|| PathBuf::from(&pdf.filename));
    std::fs::write(&output, &pdf.bytes)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Lesson: {}", lesson.title);
    println!("Objectives: {}", lesson.learning_objectives.len());
    println!("Sections: {}", lesson.sections.len());
    println!("Questions: {}", lesson.questions.len());
    println!("Wrote {} bytes to {}", pdf.bytes.len(), output.display());
    Ok(())
}

async fn serve(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?.with_overrides(host, port);
    let app = api::router(&config);

    let listener = config.bind().await?;
    log::info!("Lessonsheet listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
