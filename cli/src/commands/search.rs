use super::{load_config, run_retrieval, ui, RetrievalArgs};
use anyhow::Result;
use std::path::Path;

pub async fn handle_search(config_path: Option<&Path>, args: RetrievalArgs, json: bool) -> Result<()> {
    let config = load_config(config_path, Some(&args))?;
    let retrieval = run_retrieval(&config, &args).await?;

    if json {
        let skipped: Vec<String> = retrieval
            .report
            .failures
            .iter()
            .map(|f| f.to_string())
            .collect();
        let out = serde_json::json!({
            "model": retrieval.model,
            "metric": config.search.metric,
            "documents": retrieval.report.documents.len(),
            "skipped": skipped,
            "results": retrieval.results,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    ui::print_header(&format!(
        "Top {} of {} resumes for {}",
        retrieval.results.len(),
        retrieval.report.documents.len(),
        args.job.display()
    ));
    for result in &retrieval.results {
        ui::print_search_match(
            result.rank,
            &result.chunk.source_document_id,
            result.chunk.chunk_index,
            result.distance,
            &result.chunk.text,
        );
    }
    Ok(())
}
