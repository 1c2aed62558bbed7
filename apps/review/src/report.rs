//! Terminal rendering of analyses, history and session status.

use chrono::{DateTime, Local};

use crate::analysis::{Priority, ResumeAnalysis};
use crate::history::HistoryEntry;
use crate::pipeline::{SessionStatus, SessionView};

const BAR_WIDTH: usize = 20;

pub fn verdict(overall: u8) -> &'static str {
    match overall {
        80..=u8::MAX => "Excellent!",
        60..=79 => "Good Start",
        _ => "Needs Work",
    }
}

fn bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!!",
        Priority::Medium => "!! ",
        Priority::Low => "!  ",
    }
}

fn format_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

pub fn render_analysis(analysis: &ResumeAnalysis) -> String {
    let report = &analysis.report;
    let info = &report.personal_info;
    let mut lines = Vec::new();

    let name = if info.name.trim().is_empty() {
        "Untitled"
    } else {
        info.name.as_str()
    };
    lines.push(format!("━━ {name} ━━"));
    let contact: Vec<&str> = [&info.email, &info.phone, &info.linkedin]
        .into_iter()
        .filter_map(|c| c.as_deref())
        .filter(|c| !c.trim().is_empty())
        .collect();
    if !contact.is_empty() {
        lines.push(contact.join(" · "));
    }

    lines.push(String::new());
    lines.push(format!(
        "Score: {}% — {}",
        report.score.overall,
        verdict(report.score.overall)
    ));
    lines.push(String::new());
    lines.push("Metric Breakdown".to_string());
    for (label, value) in report.score.metrics() {
        lines.push(format!("  {label:<11} {} {value:>3}", bar(value)));
    }

    lines.push(String::new());
    lines.push("Executive Summary".to_string());
    lines.push(format!("  {}", report.summary));

    if !report.improvements.is_empty() {
        lines.push(String::new());
        lines.push("Key Improvements".to_string());
        for imp in &report.improvements {
            lines.push(format!(
                "  {} [{} Priority] {}",
                priority_marker(imp.priority),
                imp.priority,
                imp.category
            ));
            lines.push(format!("      {}", imp.suggestion));
        }
    }

    if !report.sections.skills.is_empty() {
        lines.push(String::new());
        lines.push("Skills Extracted".to_string());
        lines.push(format!("  {}", report.sections.skills.join(", ")));
    }

    if !report.upskilling.is_empty() {
        lines.push(String::new());
        lines.push("Upskilling Path".to_string());
        for item in &report.upskilling {
            lines.push(format!("  ✓ {item}"));
        }
    }

    if !report.sections.experience.is_empty() {
        lines.push(String::new());
        lines.push("Extracted Experience".to_string());
        for exp in &report.sections.experience {
            lines.push(format!("  {} @ {} ({})", exp.role, exp.company, exp.duration));
            for desc in &exp.description {
                lines.push(format!("    • {desc}"));
            }
        }
    }

    if !report.sections.education.is_empty() {
        lines.push(String::new());
        lines.push("Education".to_string());
        for edu in &report.sections.education {
            lines.push(format!("  {}, {} ({})", edu.degree, edu.institution, edu.year));
        }
    }

    lines.join("\n")
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No analyses yet.".to_string();
    }
    let mut lines = vec!["Recent Analyses".to_string()];
    for entry in entries {
        lines.push(format!(
            "  {:>3}%  {}  {}",
            entry.overall_score,
            format_date(entry.timestamp),
            entry.display_name
        ));
    }
    lines.join("\n")
}

fn with_last_entry(mut status: String, history: &[HistoryEntry]) -> String {
    if let Some(last) = history.first() {
        status.push_str(&format!(
            "\nLast analysis: {} ({}%, {})",
            last.display_name,
            last.overall_score,
            format_date(last.timestamp)
        ));
    }
    status
}

/// What the session currently shows, plus the latest history entry when idle
/// without a result.
pub fn render_status(view: &SessionView) -> String {
    match view.status() {
        SessionStatus::Pending => with_last_entry(
            "Analysis pending: paste resume text or pass a file to get feedback.".to_string(),
            &view.history,
        ),
        SessionStatus::Analyzing => "Analyzing your resume...".to_string(),
        SessionStatus::Error => with_last_entry(
            format!("Error: {}", view.error.as_deref().unwrap_or_default()),
            &view.history,
        ),
        SessionStatus::Result => match &view.analysis {
            Some(a) => format!(
                "Analysis complete: {}% ({})",
                a.report.score.overall,
                verdict(a.report.score.overall)
            ),
            None => String::new(),
        },
    }
}
