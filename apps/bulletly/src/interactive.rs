//! Line-oriented conversation loop: read a bullet, print simple feedback, repeat.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::assessment::pipeline::{assess_bullet, AssessOptions};
use crate::assessment::suggestions::SuggestionGenerator;
use crate::render::render_simple;

const RULE_WIDTH: usize = 50;
const PROMPT: &str = "Enter a resume bullet: ";

pub async fn run<R, W>(
    mut input: R,
    mut output: W,
    options: &AssessOptions,
    generator: &dyn SuggestionGenerator,
    offline: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let rule = "=".repeat(RULE_WIDTH);
    let mut banner = format!("\nBulletly - Resume Bullet Analyzer\n{rule}\n");
    if !options.role.is_empty() {
        banner.push_str(&format!("Role: {}\n", options.role));
    }
    if offline {
        banner.push_str("Mode: Offline (--dry-run)\n");
    }
    banner.push_str(&format!("{rule}\nType 'quit' to exit\n\n"));
    output.write_all(banner.as_bytes()).await?;

    let mut line = String::new();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            output.write_all(b"\nGoodbye!\n").await?;
            break;
        }

        let bullet = line.trim();
        if bullet.eq_ignore_ascii_case("quit") {
            output.write_all(b"Goodbye!\n").await?;
            break;
        }
        if bullet.is_empty() {
            continue;
        }

        let reply = match assess_bullet(bullet, options, generator).await {
            Ok(feedback) => format!("{}\n\n", render_simple(&feedback)),
            Err(e) => format!("Error: {e}\n\n"),
        };
        output.write_all(reply.as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::suggestions::OfflineGenerator;

    async fn session(input: &str, options: &AssessOptions) -> String {
        let mut output = Vec::new();
        run(input.as_bytes(), &mut output, options, &OfflineGenerator, true)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let out = session("QUIT\nBuilt API for ingestion\n", &AssessOptions::default()).await;
        assert!(out.contains("Mode: Offline (--dry-run)"));
        assert!(out.ends_with("Enter a resume bullet: Goodbye!\n"));
        assert!(!out.contains("[NEEDS_IMPROVEMENT]"));
    }

    #[tokio::test]
    async fn test_assesses_each_non_blank_line() {
        let options = AssessOptions {
            role: "Data Engineer".to_string(),
            ..AssessOptions::default()
        };
        let out = session("\nBuilt API for ingestion\n\n", &options).await;
        assert!(out.contains("Role: Data Engineer"));
        assert_eq!(out.matches("[NEEDS_IMPROVEMENT]").count(), 1);
        assert!(out.contains("1. "));
        assert!(out.contains("2. "));
        assert!(out.contains("Questions to strengthen:"));
        // end of input
        assert!(out.ends_with("\nGoodbye!\n"));
    }

    #[tokio::test]
    async fn test_validation_failure_is_reported_and_loop_continues() {
        let options = AssessOptions {
            keep_metrics: true,
            ..AssessOptions::default()
        };
        // templates keep the leading number but cut the trailing one
        let long = format!("Cut 15 {}42", "word ".repeat(60));
        let out = session(&format!("{long}\nquit\n"), &options).await;
        assert!(out.contains("Error: "));
        assert!(out.ends_with("Goodbye!\n"));
    }
}
