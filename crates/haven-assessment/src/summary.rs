use haven_core::models::recommendation::ScoredArea;

/// Render ranked recommendations as Markdown for display.
pub fn summarize(recommendations: &[ScoredArea]) -> String {
    let mut output = String::from("## Recommended focus areas\n\n");

    if recommendations.is_empty() {
        output.push_str("No recommendations available.\n");
        return output;
    }

    for (rank, scored) in recommendations.iter().enumerate() {
        output.push_str(&format!(
            "{}. **{}** (score {})\n   {}\n",
            rank + 1,
            scored.name(),
            scored.score,
            scored.area.description,
        ));
    }

    if recommendations.iter().all(|s| s.score == 0) {
        output.push_str(
            "\nNone of your answers pointed to a specific area, so these are general starting points.\n",
        );
    }
    output
}
