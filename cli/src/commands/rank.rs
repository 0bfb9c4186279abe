use super::{load_config, run_retrieval, ui, RetrievalArgs};
use anyhow::{Context, Result};
use ranker_core::llm::{ChatCompletionsClient, TextGenerator};
use ranker_core::QueryResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const RANKING_INSTRUCTION: &str = "Rank these resumes from best to worst for the job, \
explain why each was ranked where it was, and suggest the top 3.";

pub async fn handle_rank(config_path: Option<&Path>, args: RetrievalArgs, output: PathBuf) -> Result<()> {
    let config = load_config(config_path, Some(&args))?;
    // Fail on a missing key before any embedding work
    let generator = ChatCompletionsClient::from_config(&config.llm)?;

    // Skipped documents were already reported through `warn!` during loading
    let retrieval = run_retrieval(&config, &args).await?;

    let prompt = build_prompt(&retrieval.query, &retrieval.results);
    let spinner = ui::spinner(&format!("Asking {} to rank the resumes...", generator.model()));
    let generated = generator.generate(&prompt).await;
    spinner.finish_and_clear();
    let ranking = generated?;

    ui::print_header("Top Resumes & Reasoning");
    println!("{}", ranking);

    fs::write(&output, &ranking)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Results saved to {}", output.display());
    ui::print_key_value("Saved to", &output.display().to_string());
    Ok(())
}

pub fn build_prompt(job_description: &str, results: &[QueryResult]) -> String {
    let resumes = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Resume {}:\n{}", i + 1, r.chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are an HR assistant. You have the following job description:\n{}\n\n\
         And you have found the following resumes:\n{}\n\n{}",
        job_description, resumes, RANKING_INSTRUCTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranker_core::Chunk;

    fn result(rank: usize, text: &str) -> QueryResult {
        QueryResult {
            rank,
            distance: 0.1 * rank as f32,
            chunk: Chunk {
                id: format!("c{rank}"),
                source_document_id: format!("doc{rank}.txt"),
                chunk_index: 0,
                start_char: 0,
                length: text.chars().count(),
                text: text.to_string(),
            },
        }
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt(
            "Go engineer",
            &[result(1, "Six years of Go"), result(2, "Python only")],
        );
        assert!(prompt.starts_with(
            "You are an HR assistant. You have the following job description:\nGo engineer\n\n"
        ));
        assert!(prompt.contains("Resume 1:\nSix years of Go\n\nResume 2:\nPython only"));
        assert!(prompt.ends_with("suggest the top 3."));
    }
}
