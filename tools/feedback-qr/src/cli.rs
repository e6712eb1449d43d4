//! Command-line arguments and input loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use feedback_publisher::{AccessToken, Challenge, ConfigError, StoreConfig, TOKEN_ENV_VAR};

/// Feedback-QR: publish a solved challenge and show a QR code linking to it
#[derive(Parser, Debug)]
#[command(name = "feedback-qr")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("challenge_source").required(true).args(["challenge", "title"])))]
#[command(group(ArgGroup::new("answer_source").required(true).args(["answer", "answer_file"])))]
pub struct Args {
    /// JSON file with `title` and `description`
    #[arg(long, value_name = "FILE")]
    pub challenge: Option<PathBuf>,

    /// Challenge title
    #[arg(long, requires = "description")]
    pub title: Option<String>,

    /// Challenge problem statement
    #[arg(long, requires = "title")]
    pub description: Option<String>,

    /// Submitted answer source
    #[arg(long)]
    pub answer: Option<String>,

    /// Read the submitted answer from a file
    #[arg(long, value_name = "FILE")]
    pub answer_file: Option<PathBuf>,

    /// Print the QR code to stdout instead of opening the TUI
    #[arg(long)]
    pub plain: bool,

    /// Also write the QR code as SVG
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,

    /// Print the document and target path without publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Target branch
    #[arg(long)]
    pub branch: Option<String>,

    /// Directory inside the repository
    #[arg(long = "dir", value_name = "DIR")]
    pub directory: Option<String>,

    /// Content API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Access token
    #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,
}

impl Args {
    /// Challenge from `--challenge` or `--title`/`--description`.
    pub fn load_challenge(&self) -> Result<Challenge> {
        if let Some(path) = &self.challenge {
            return read_challenge(path);
        }
        match (&self.title, &self.description) {
            (Some(title), Some(description)) => Ok(Challenge::new(title, description)),
            _ => anyhow::bail!("either --challenge or both --title and --description are required"),
        }
    }

    /// Answer from `--answer` or `--answer-file`.
    pub fn load_answer(&self) -> Result<String> {
        if let Some(answer) = &self.answer {
            return Ok(answer.clone());
        }
        match &self.answer_file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read answer file {}", path.display())),
            None => anyhow::bail!("either --answer or --answer-file is required"),
        }
    }

    /// Environment-derived store config with command-line overrides applied.
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        let mut config = StoreConfig::from_env();

        if let Some(owner) = &self.owner {
            config.owner = owner.clone();
        }
        if let Some(repo) = &self.repo {
            config.repo = repo.clone();
        }
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
        if let Some(directory) = &self.directory {
            config.directory = directory.clone();
        }
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.auth_token = AccessToken::new(token.as_str());
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_challenge(path: &Path) -> Result<Challenge> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read challenge file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid challenge JSON in {}", path.display()))
}
