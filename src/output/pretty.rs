use chrono::Utc;
use colored::Colorize;

use crate::gear::{GearItem, PackingList, WeightSummary};
use crate::sync::{DrainOutcome, DrainReport, QueueStats};

/// Format a gear list as a pretty table
pub fn format_gear_list_pretty(user_id: &str, items: &[GearItem]) -> String {
    let title = format!("Gear for {user_id}");
    if items.is_empty() {
        return format!("{} (0 items)\n  No gear", title.bold());
    }

    let mut output = format!("{} ({} items)\n", title.bold(), items.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for item in items {
        let line = format!(
            "{:>4}  {:<24} {:>10}  {}",
            format!("#{}", item.id).dimmed(),
            item.name.bold(),
            item.weight.yellow(),
            item.category.cyan()
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a packing list with quantities
pub fn format_packing_list_pretty(list: &PackingList) -> String {
    let mut output = format!(
        "{} ({} items, {:.2} kg)\n",
        list.name.bold(),
        list.item_count(),
        list.total_weight_kg()
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if list.items.is_empty() {
        output.push_str(&format!("  {}\n", "Nothing packed".dimmed()));
    }

    for entry in &list.items {
        let line = format!(
            "{:>4}  {:<24} {:>10} x{:<3} {}",
            format!("#{}", entry.item.id).dimmed(),
            entry.item.name.bold(),
            entry.item.weight.yellow(),
            entry.quantity,
            entry.item.category.cyan()
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a weight summary with a bar per category
pub fn format_summary_pretty(user_id: &str, summary: &WeightSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Weight summary for {user_id}").bold().to_string());
    lines.push("─".repeat(40));

    if summary.is_empty() {
        lines.push("  No weighed gear".dimmed().to_string());
    }

    for category in &summary.categories {
        // One block per 5%
        let blocks = (category.percentage / 5.0).round() as usize;
        lines.push(format!(
            "  {:<16} {:>8.2} kg  {:>5.1}%  {}",
            category.category,
            category.weight_kg,
            category.percentage,
            "█".repeat(blocks).green()
        ));
    }

    lines.push("─".repeat(40));
    lines.push(format!("  Total weight: {:.2} kg", summary.total_kg).bold().to_string());

    if !summary.unparsed.is_empty() {
        let ids = summary
            .unparsed
            .iter()
            .map(|id| format!("#{id}"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  {} {}", "Unreadable weights:".yellow(), ids));
    }

    lines.join("\n")
}

/// Format sync queue status
pub fn format_queue_stats_pretty(stats: &QueueStats, fallback_only: bool) -> String {
    let mut lines = Vec::new();

    lines.push("Sync Queue Status".bold().to_string());
    lines.push("─".repeat(40));

    lines.push(format!(
        "  Pending:    {} {}",
        stats.pending,
        if stats.pending > 0 {
            "entries waiting".dimmed()
        } else {
            "".dimmed()
        }
    ));

    if let Some(oldest) = stats.oldest_pending {
        let age = Utc::now().signed_duration_since(oldest);
        let age_str = if age.num_hours() > 0 {
            format!("{} hours ago", age.num_hours())
        } else if age.num_minutes() > 0 {
            format!("{} minutes ago", age.num_minutes())
        } else {
            "just now".to_string()
        };
        lines.push(format!("  Oldest:     {}", age_str.dimmed()));
    }

    if fallback_only {
        lines.push(format!(
            "  {}",
            "Database unavailable, queue is not persisted".yellow()
        ));
    }

    if stats.pending > 0 {
        lines.push(String::new());
        lines.push(
            "Run 'gearstash sync run' to push pending entries"
                .dimmed()
                .to_string(),
        );
    }

    lines.join("\n")
}

/// Format the result of a drain pass
pub fn format_drain_report_pretty(report: &DrainReport) -> String {
    if report.total() == 0 {
        return "No pending entries to sync.".to_string();
    }

    let mut lines = Vec::new();

    lines.push(format!("Sync completed: {} entries", report.total()));
    lines.push("─".repeat(40));

    if report.delivered > 0 {
        lines.push(format!(
            "  {} {}",
            "✓".green(),
            format!("{} delivered", report.delivered).green()
        ));
    }

    if report.retrying > 0 {
        lines.push(format!(
            "  {} {}",
            "○".yellow(),
            format!("{} will retry", report.retrying).yellow()
        ));
    }

    if report.dropped > 0 {
        lines.push(format!(
            "  {} {}",
            "✗".red(),
            format!("{} dropped", report.dropped).red()
        ));
    }

    let errors: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.outcome != DrainOutcome::Delivered)
        .take(3)
        .collect();

    if !errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        for result in errors {
            lines.push(format!(
                "  - #{} {}: {}",
                result.id,
                result.action,
                result.error.as_deref().unwrap_or("Unknown error")
            ));
        }
    }

    lines.join("\n")
}
