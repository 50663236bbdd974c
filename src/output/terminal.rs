// Colored terminal summaries for frequency tables and topic reports.

use colored::Colorize;

use crate::text::frequency::FrequencyTable;
use crate::topics::report::TopicReport;

/// Display the most frequent tokens as a bar chart.
pub fn display_frequencies(table: &FrequencyTable, limit: usize) {
    if table.is_empty() {
        println!("No frequencies to show.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Top {} of {} tokens ({} occurrences) ===",
            limit.min(table.len()),
            table.len(),
            table.total()
        )
        .bold()
    );
    println!();

    let bar_width: usize = 20;
    let max = table.max_count().max(1) as f64;

    for (i, (token, count)) in table.top(limit).iter().enumerate() {
        let share = *count as f64 / max;
        let filled = (share * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );

        let colored_bar = if share >= 0.5 {
            bar.bright_green()
        } else if share >= 0.2 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:>3}. {:<32} {} {}",
            i + 1,
            clip_label(token, 30).bold(),
            colored_bar,
            count
        );
    }
    println!();
}

/// Display topics and the best topic per document.
pub fn display_topics(report: &TopicReport) {
    println!(
        "\n{}",
        format!(
            "=== {} topics over {} documents ===",
            report.topics.len(),
            report.documents.len()
        )
        .bold()
    );
    println!();

    for topic in &report.topics {
        println!(
            "  {:<9} {}",
            format!("Topic {}", topic.index).bold(),
            topic.words.join(", ").dimmed()
        );
    }

    println!();
    for doc in &report.documents {
        let share = doc.distribution.get(doc.top_topic).copied().unwrap_or(0.0);
        println!(
            "  {:<40} {} {}",
            clip_label(&doc.name, 38),
            format!("topic {}", doc.top_topic).bright_green(),
            format!("({:.0}%)", share * 100.0).dimmed()
        );
    }
    println!();
}

/// Shorten a label to `width` characters for column alignment, marking the
/// cut with "…". Counts chars, not bytes, so accented tokens are safe.
fn clip_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let mut clipped: String = label.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}
