use crate::analyzer::{AnalysisReport, FitReport};
use crate::priority::ImpactEntry;
use crate::threshold::AdaptiveStanding;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
    fn write_fits(&mut self, report: &FitReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_fits(&mut self, report: &FitReport) -> anyhow::Result<()> {
        self.write_json(report)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_score_summary(report)?;
        self.write_subjects(report)?;
        self.write_action_plan(report)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_fits(&mut self, report: &FitReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Adaptive Threshold Fit")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Source: {}", report.history_source)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Subject | Threshold | Accuracy | Records | Hard | Easy |"
        )?;
        writeln!(
            self.writer,
            "|---------|-----------|----------|---------|------|------|"
        )?;
        for fit in report.fits.values() {
            writeln!(
                self.writer,
                "| {} | {:.2} | {:.1}% | {} | {:.1}% | {:.1}% |",
                fit.subject,
                fit.threshold,
                fit.accuracy * 100.0,
                fit.data_points,
                fit.hard_share * 100.0,
                fit.easy_share * 100.0
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# DSAT What-If Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(source) = &report.history_source {
            writeln!(self.writer, "Thresholds fitted from: {source}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_score_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let insights = &report.insights;
        writeln!(self.writer, "## Score Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Current Total | {} |", insights.total_current)?;
        writeln!(self.writer, "| Potential Total | {} |", insights.total_potential)?;
        writeln!(self.writer, "| Total Gain | +{} |", insights.total_gain)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_subjects(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        for (subject, rec) in &report.recommendations.recommendations {
            writeln!(self.writer, "## {subject}")?;
            writeln!(self.writer)?;

            if let Some(score) = report.score.subjects.get(subject) {
                writeln!(
                    self.writer,
                    "Module 1: {}/{} ({:.1}%), threshold {:.2}, Module 2 tier: **{}**, scaled score {}",
                    score.module1_correct,
                    score.module1_total,
                    score.module1_accuracy * 100.0,
                    score.threshold,
                    score.difficulty,
                    score.scaled_score
                )?;
                writeln!(self.writer)?;
            }
            if let Some(standing) = report.insights.subjects.get(subject).and_then(|s| s.standing.as_ref()) {
                writeln!(self.writer, "{}", standing_message(standing))?;
                writeln!(self.writer)?;
            }

            if rec.high_impact_questions.is_empty() {
                writeln!(self.writer, "No incorrect answers.")?;
                writeln!(self.writer)?;
                continue;
            }

            writeln!(
                self.writer,
                "| Rank | Question | Module | Complexity | Impact | Direct | Branch | Effort |"
            )?;
            writeln!(
                self.writer,
                "|------|----------|--------|------------|--------|--------|--------|--------|"
            )?;
            for (i, entry) in rec.high_impact_questions.iter().enumerate() {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} | {} | {} | {} |",
                    i + 1,
                    entry.question_id,
                    entry.module.number(),
                    entry.complexity,
                    entry.impact_score,
                    entry.direct_impact,
                    entry.branch_bonus,
                    entry.complexity_bonus
                )?;
            }
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "Potential gain: +{} ({} Module 1 priorities)",
                rec.total_potential_gain, rec.module1_priority_count
            )?;
            if let Some(summary) = report.recommendations.summary.get(subject) {
                if summary.focus_on_module1 {
                    writeln!(self.writer)?;
                    writeln!(self.writer, "Focus on Module 1: most gains come from the routing stage.")?;
                }
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_action_plan(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.insights.action_plan.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Action Plan")?;
        writeln!(self.writer)?;
        for (i, item) in report.insights.action_plan.iter().enumerate() {
            writeln!(
                self.writer,
                "{}. {} {} ({}, {}): +{}",
                i + 1,
                item.subject,
                item.question_id,
                item.module,
                item.complexity,
                item.impact_score
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl Default for TerminalWriter<std::io::Stdout> {
    fn default() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "DSAT What-If Analysis".bold().blue())?;
        writeln!(self.writer, "{}", "=====================".blue())?;
        writeln!(self.writer)?;

        let insights = &report.insights;
        writeln!(
            self.writer,
            "Current score: {}   Potential: {}   Gain: {}",
            insights.total_current.to_string().bold(),
            insights.total_potential.to_string().green(),
            format!("+{}", insights.total_gain).green().bold()
        )?;
        writeln!(self.writer)?;

        for (subject, rec) in &report.recommendations.recommendations {
            self.print_subject(report, subject, &rec.high_impact_questions)?;
        }
        self.print_action_plan(report)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_fits(&mut self, report: &FitReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Adaptive Threshold Fit".bold().blue())?;
        writeln!(self.writer, "Source: {}", report.history_source)?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Subject", "Threshold", "Accuracy", "Records", "Hard", "Easy",
        ]);
        for fit in report.fits.values() {
            table.add_row(vec![
                fit.subject.clone(),
                format!("{:.2}", fit.threshold),
                format!("{:.1}%", fit.accuracy * 100.0),
                fit.data_points.to_string(),
                format!("{:.1}%", fit.hard_share * 100.0),
                format!("{:.1}%", fit.easy_share * 100.0),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_subject(
        &mut self,
        report: &AnalysisReport,
        subject: &str,
        entries: &[ImpactEntry],
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", subject.bold().underline())?;
        if let Some(score) = report.score.subjects.get(subject) {
            writeln!(
                self.writer,
                "  Module 1: {}/{} ({:.1}%) vs threshold {:.2} -> Module 2 {}",
                score.module1_correct,
                score.module1_total,
                score.module1_accuracy * 100.0,
                score.threshold,
                difficulty_label(score.difficulty.as_str())
            )?;
            writeln!(self.writer, "  Scaled score: {}", score.scaled_score)?;
        }
        if let Some(standing) = report.insights.subjects.get(subject).and_then(|s| s.standing.as_ref()) {
            writeln!(self.writer, "  {}", standing_message(standing))?;
        }

        if entries.is_empty() {
            writeln!(self.writer, "  {}", "No incorrect answers.".green())?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "#", "Question", "Module", "Complexity", "Impact", "Direct", "Branch", "Effort",
        ]);
        for (i, entry) in entries.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                entry.question_id.clone(),
                entry.module.number().to_string(),
                entry.complexity.to_string(),
                entry.impact_score.to_string(),
                entry.direct_impact.to_string(),
                entry.branch_bonus.to_string(),
                entry.complexity_bonus.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        if let Some(summary) = report.recommendations.summary.get(subject) {
            writeln!(
                self.writer,
                "  Average impact {:.1}, best single fix +{}",
                summary.average_impact_per_question, summary.highest_single_impact
            )?;
            if summary.focus_on_module1 {
                writeln!(self.writer, "  {}", "Focus on Module 1".yellow().bold())?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_action_plan(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.insights.action_plan.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "Action plan".bold())?;
        for (i, item) in report.insights.action_plan.iter().enumerate() {
            writeln!(
                self.writer,
                "  {}. {} {} ({}, {}) {}",
                i + 1,
                item.subject,
                item.question_id.yellow(),
                item.module,
                item.complexity,
                format!("+{}", item.impact_score).green()
            )?;
        }
        Ok(())
    }
}

fn difficulty_label(tier: &str) -> ColoredString {
    match tier {
        "hard" => tier.to_uppercase().red().bold(),
        _ => tier.to_uppercase().cyan().bold(),
    }
}

fn standing_message(standing: &AdaptiveStanding) -> String {
    match standing {
        AdaptiveStanding::Locked {
            questions_needed: Some(n),
        } => format!("Answer {n} more Module 1 questions correctly to unlock the hard tier."),
        AdaptiveStanding::Locked {
            questions_needed: None,
        } => "The hard tier is out of reach on this Module 1.".to_string(),
        AdaptiveStanding::Unlocked { buffer } => {
            format!("On the hard tier; up to {buffer} Module 1 misses would keep it.")
        }
    }
}

/// Writer for `format`, targeting `output` or stdout.
pub fn create_writer(format: OutputFormat, output: Option<&Path>) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
