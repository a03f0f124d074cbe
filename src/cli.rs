use crate::api::ApiClient;
use crate::api::models::QuestionSearchParams;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::forms::RegisterForm;
use crate::search::{SearchBox, grouped};
use crate::session::Session;
use crate::storage::{LocalStore, TokenStore};
use crate::theme::{self, ThemePreference};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "blepp")]
#[command(about = "Terminal client for the Blepp exam-prep backend", long_about = None)]
pub struct Cli {
    /// Backend origin, overriding config and environment.
    #[arg(long, global = true)]
    pub api_url: Option<Url>,

    /// Directory holding the local token store.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with email and password.
    Login {
        email: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        /// Target exam date, `YYYY-MM-DD`.
        #[arg(long)]
        exam_date: Option<String>,
        #[arg(long)]
        hours: Option<u8>,
    },
    /// Show the signed-in profile.
    Whoami,
    /// Search topics, flashcards and questions.
    Search { query: String },
    Topics,
    Flashcards,
    Questions {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        topic: Option<String>,
    },
    Exams,
    /// Board-exam readiness summary.
    Readiness,
    /// Completed lessons, optionally for one topic slug.
    Lessons {
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// Show or set the color theme.
    Theme { theme: Option<ThemePreference> },
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }
}

/// Execute one command against the configured backend.
pub async fn run(command: Commands, config: &ClientConfig) -> Result<()> {
    let store = LocalStore::open(config.storage_path())?;
    let api = ApiClient::from_config(config, TokenStore::new(store.clone()));
    let mut session = Session::new(api.clone());

    match command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            let user = session.login(&email, &password).await?;
            println!("Signed in as {} <{}>", user.full_name, user.email);
        }
        Commands::Logout => {
            session.logout().await?;
            println!("Signed out");
        }
        Commands::Register {
            email,
            password,
            name,
            exam_date,
            hours,
        } => {
            let form = RegisterForm {
                full_name: name,
                email,
                password,
                target_exam_date: exam_date.unwrap_or_default(),
                daily_study_hours: hours,
            };
            let user = session.register(&form).await?;
            println!("Account created for {}", user.email);
        }
        Commands::Whoami => {
            session.restore().await?;
            match session.user() {
                Some(user) => {
                    println!("{} <{}>", user.full_name, user.email);
                    if let Some(date) = user.target_exam_date {
                        println!("Exam date: {}", date);
                    }
                    if let Some(hours) = user.daily_study_hours {
                        println!("Daily study hours: {}", hours);
                    }
                }
                None => println!("Not signed in"),
            }
        }
        Commands::Search { query } => {
            let search = SearchBox::new(api, config.search);
            search.input(&query);
            search.flush().await;
            let state = search.state();
            if let Some(error) = &state.error {
                anyhow::bail!("Search failed: {}", error);
            }
            if !state.open {
                println!("Type at least {} characters to search", config.search.min_query_chars);
            } else if state.results.is_empty() {
                println!("No results for \"{}\"", query.trim());
            }
            for (kind, results) in grouped(&state.results) {
                println!("{}", kind.label());
                for result in results {
                    println!("  {} ({})  {}", result.title, result.subtitle, result.href);
                }
            }
        }
        Commands::Topics => {
            for topic in api.list_topics().await.context("Failed to load topics")? {
                let weak = if topic.weak { "  [weak]" } else { "" };
                println!("{}  {}{}", topic.id, topic.name, weak);
            }
        }
        Commands::Flashcards => {
            for card in api.list_flashcards().await.context("Failed to load flashcards")? {
                println!("{}  {} / {}", card.id, card.front, card.back);
            }
        }
        Commands::Questions { query, topic } => {
            let params = QuestionSearchParams {
                query,
                topic_id: topic,
                ..QuestionSearchParams::default()
            };
            let questions = api
                .search_questions(&params)
                .await
                .context("Failed to load questions")?;
            for question in questions {
                println!("{}  [{}] {}", question.id, question.difficulty, question.text);
            }
        }
        Commands::Exams => {
            for exam in api.list_exams().await.context("Failed to load exams")? {
                println!(
                    "{}  {} ({} questions, {} min)",
                    exam.id, exam.title, exam.total_questions, exam.duration_minutes
                );
            }
        }
        Commands::Readiness => {
            let readiness = api.readiness().await.context("Failed to load readiness")?;
            println!("{}", serde_json::to_string_pretty(&readiness)?);
        }
        Commands::Lessons { topic } => {
            let progress = api
                .lesson_progress(topic.as_deref())
                .await
                .context("Failed to load lesson progress")?;
            for lesson in progress {
                println!(
                    "{}/{}  completed {}",
                    lesson.topic_slug,
                    lesson.lesson_id,
                    lesson.completed_at.format("%Y-%m-%d")
                );
            }
        }
        Commands::Theme { theme: None } => {
            println!("{}", theme::stored_theme(&store, theme::system_prefers_dark()));
        }
        Commands::Theme { theme: Some(theme) } => {
            theme::apply_theme(&store, theme)?;
            println!("Theme set to {}", theme);
        }
    }
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
