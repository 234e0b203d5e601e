//! Command-line surface.
//!
//! - assess: critique bullets given as arguments or read from a file
//! - interactive: read bullets from stdin until `quit`
//! - serve: run the HTTP API

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::assessment::pipeline::{AssessOptions, DEFAULT_SUGGESTION_COUNT};
use crate::assessment::styles::{Style, Tone};
use crate::assessment::suggestions::ModelSettings;
use crate::llm_client::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::render::OutputFormat;

/// Bulletly - assess resume bullets and suggest stronger rewrites
#[derive(Parser, Debug)]
#[command(name = "bulletly")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess one or more bullets and print verdicts with suggestions
    Assess {
        /// Bullets to assess
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        bullets: Vec<String>,

        /// File with one bullet per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Optional path to save the results as JSON
        #[arg(long)]
        save: Option<PathBuf>,

        #[command(flatten)]
        rewrite: RewriteArgs,
    },

    /// Type bullets and get feedback until `quit`
    Interactive {
        #[command(flatten)]
        rewrite: RewriteArgs,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        model: ModelArgs,
    },
}

/// Knobs shared by `assess` and `interactive`.
#[derive(Args, Debug, Clone)]
pub struct RewriteArgs {
    /// Target role (e.g. Data Engineer)
    #[arg(long, default_value = "")]
    pub role: String,

    /// Seniority (Intern/Junior/Mid/Senior/Staff/Principal)
    #[arg(long, default_value = "")]
    pub seniority: String,

    #[arg(long, value_enum, default_value_t = Style::Ats)]
    pub style: Style,

    #[arg(long, value_enum, default_value_t = Tone::Neutral)]
    pub tone: Tone,

    /// Preserve numbers from the original bullet
    #[arg(long)]
    pub keep_metrics: bool,

    /// Number of suggestions when a bullet needs improvement
    #[arg(long, default_value_t = DEFAULT_SUGGESTION_COUNT, value_parser = parse_count)]
    pub n: usize,

    /// Use local templates without calling the completion service
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Completion model knobs, shared by every subcommand that may call the service.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    #[arg(long, alias = "max_tokens", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

impl ModelArgs {
    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl RewriteArgs {
    pub fn assess_options(&self) -> AssessOptions {
        AssessOptions {
            role: self.role.clone(),
            seniority: self.seniority.clone(),
            style: self.style,
            tone: self.tone,
            keep_metrics: self.keep_metrics,
            n: self.n,
        }
    }

    pub fn model_settings(&self) -> ModelSettings {
        self.model.model_settings()
    }
}

fn parse_count(raw: &str) -> Result<usize, String> {
    let n: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a positive number"))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bulletly").chain(args.iter().copied()))
    }

    #[test]
    fn test_assess_defaults() {
        let cli = parse(&["assess", "Built API for ingestion"]).unwrap();
        let Commands::Assess {
            bullets,
            file,
            format,
            save,
            rewrite,
        } = cli.command
        else {
            panic!("expected assess");
        };
        assert_eq!(bullets, vec!["Built API for ingestion"]);
        assert!(file.is_none());
        assert!(save.is_none());
        assert_eq!(format, OutputFormat::Text);
        assert_eq!(rewrite.n, 2);
        assert_eq!(rewrite.style, Style::Ats);
        assert_eq!(rewrite.tone, Tone::Neutral);
        assert_eq!(rewrite.model.model, DEFAULT_MODEL);
        assert_eq!(rewrite.model.max_tokens, 700);
        assert!(!rewrite.dry_run);
    }

    #[test]
    fn test_assess_flags() {
        let cli = parse(&[
            "assess",
            "Led team",
            "--style",
            "leadership",
            "--tone",
            "bold",
            "--keep-metrics",
            "--n",
            "3",
            "--format",
            "markdown",
            "--dry-run",
            "--max_tokens",
            "300",
        ])
        .unwrap();
        let Commands::Assess {
            format, rewrite, ..
        } = cli.command
        else {
            panic!("expected assess");
        };
        assert_eq!(format, OutputFormat::Markdown);
        let options = rewrite.assess_options();
        assert_eq!(options.style, Style::Leadership);
        assert_eq!(options.tone, Tone::Bold);
        assert!(options.keep_metrics);
        assert_eq!(options.n, 3);
        assert!(rewrite.dry_run);
        assert_eq!(rewrite.model_settings().max_tokens, 300);
    }

    #[test]
    fn test_assess_requires_bullets_or_file() {
        assert!(parse(&["assess"]).is_err());
        assert!(parse(&["assess", "--file", "bullets.txt"]).is_ok());
        assert!(parse(&["assess", "Built API", "--file", "bullets.txt"]).is_err());
    }

    #[test]
    fn test_zero_suggestions_rejected() {
        assert!(parse(&["assess", "Built API", "--n", "0"]).is_err());
        assert!(parse(&["interactive", "--n", "x"]).is_err());
    }

    #[test]
    fn test_unknown_style_rejected() {
        assert!(parse(&["assess", "Built API", "--style", "fancy"]).is_err());
    }

    #[test]
    fn test_serve_port() {
        let cli = parse(&["serve", "--port", "9000"]).unwrap();
        let Commands::Serve { port, model } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(port, Some(9000));
        assert_eq!(model.model, DEFAULT_MODEL);
        assert_eq!(model.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_serve_model_settings() {
        let cli = parse(&[
            "serve",
            "--model",
            "llama-3.1-8b-instant",
            "--temperature",
            "0.9",
            "--max-tokens",
            "256",
        ])
        .unwrap();
        let Commands::Serve { model, .. } = cli.command else {
            panic!("expected serve");
        };
        let settings = model.model_settings();
        assert_eq!(settings.model, "llama-3.1-8b-instant");
        assert_eq!(settings.temperature, 0.9);
        assert_eq!(settings.max_tokens, 256);
    }
}
