//! Plain-text views of job postings and comparisons.

use std::fmt::Write;

use super::pdf::{document_for, file_name_for, PdfKind};
use crate::models::{Comparison, ComparisonDetail, CoverLetterParagraph, JobPosting, WorkExperience};

const UNKNOWN_LOCATION: &str = "Unknown Location";

pub fn job_list(postings: &[JobPosting]) -> String {
    let mut out = String::new();
    for job in postings {
        let location = job.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
        let _ = writeln!(out, "[{}] {}\n    {}\n    {}", job.id, job.title, job.company, location);
    }
    out
}

pub fn comparison_list(comparisons: &[Comparison]) -> String {
    let mut out = String::new();
    for c in comparisons {
        let location = c.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
        let marker = if c.is_active { " (active)" } else { "" };
        let _ = writeln!(out, "[{}] {}{}\n    {}\n    {}", c.id, c.title, marker, c.company, location);
    }
    out
}

pub fn work_experience(index: usize, exp: &WorkExperience) -> String {
    let mut out = format!("#{index} {} at {}\n", exp.title, exp.company);
    let range = exp.date_range();
    if !range.is_empty() {
        let _ = writeln!(out, "    {range}");
    }
    for accomplishment in &exp.accomplishments {
        let _ = writeln!(out, "    - {accomplishment}");
    }
    out
}

pub fn paragraph(index: usize, paragraph: &CoverLetterParagraph) -> String {
    format!(
        "#{index} Paragraph {}:\n    {}\n",
        paragraph.paragraph_number, paragraph.paragraph_text
    )
}

fn pdf_status(comparison: &Comparison, kind: PdfKind) -> String {
    match document_for(comparison, kind) {
        None => format!("No {kind} available"),
        Some(Ok(doc)) => format!(
            "{} ({} bytes)",
            file_name_for(kind, &comparison.title, &comparison.company),
            doc.len()
        ),
        Some(Err(e)) => format!("Unreadable {kind}: {}", e.detail()),
    }
}

pub fn comparison_detail(detail: &ComparisonDetail) -> String {
    let c = &detail.comparison;
    let mut out = String::new();
    let _ = writeln!(out, "{}", c.title);
    let _ = writeln!(out, "{}", c.company);
    let _ = writeln!(out, "{}", c.location.as_deref().unwrap_or(UNKNOWN_LOCATION));
    let _ = writeln!(out, "Status: {}", if c.is_active { "active" } else { "inactive" });

    let _ = writeln!(out, "\n== Resume ==\n{}", pdf_status(c, PdfKind::Resume));
    let _ = writeln!(out, "\nWork Experiences");
    for (i, exp) in detail.work_experiences.iter().enumerate() {
        out.push_str(&work_experience(i, exp));
    }

    let _ = writeln!(out, "\n== Cover Letter ==\n{}", pdf_status(c, PdfKind::CoverLetter));
    let _ = writeln!(out, "\nCover Letter Paragraphs");
    let mut paragraphs: Vec<_> = detail.cover_letter_paragraphs.iter().enumerate().collect();
    paragraphs.sort_by_key(|(_, p)| p.paragraph_number);
    for (i, p) in paragraphs {
        out.push_str(&paragraph(i, p));
    }
    out
}
