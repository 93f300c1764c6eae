use crate::products::{
    evaluation::{display_not_after, EvaluationResult},
    status::Status,
    summary::RunSummary,
};


/// Per-host table
pub fn render_table(results: &[EvaluationResult]) -> String {
    let mut table = format!(
        "{:30} {:5}  {:14} {:30} {:10}\n{}\n",
        "SITENAME",
        "PORT",
        "STATUS",
        "EXPIRES",
        "DAYS LEFT",
        "-".repeat(105)
    );
    for result in results {
        let expires = result
            .not_after()
            .map(display_not_after)
            .or_else(|| result.error_description().map(String::from))
            .unwrap_or_default();
        let days_left = result
            .days_left()
            .map(|days| days.to_string())
            .unwrap_or_default();
        table.push_str(&format!(
            "{:30} {:<5}  {:14} {:30} {:>10}\n",
            result.hostname,
            result.port,
            result.status().label(),
            expires,
            days_left
        ));
    }
    table
}


/// Summary block, only non-zero statuses, then failed side effects if any
pub fn render_summary(summary: &RunSummary) -> String {
    let block = Status::ALL
        .iter()
        .filter(|status| summary.count(**status) > 0)
        .fold(String::from("\nSummary:\n"), |block, status| {
            format!("{}  {:12}: {}\n", block, status.label(), summary.count(*status))
        });
    match summary.failed_side_effects {
        0 => block,
        failed => format!("{}  {:12}: {}\n", block, "FAILED", failed),
    }
}


/// Summary as a JSON object, all statuses in report order plus FAILED when side effects failed
pub fn render_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string(summary)
}
