//! Output formatters - console, JSON, Markdown, and HTML presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{ranked_counts, BatchReport};
use askama::Template;
use colored::{Color, Colorize};
use std::fmt::Write as _;

/// Legend printed with every summary, matching the scoring formula.
pub const SCORE_LEGEND: &str = "score = 2 unique + weighted + int(400 ratio)";

/// Trait for formatting batch reports
pub trait OutputFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and aligned tables
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and downstream tooling
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results as documents
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with a self-contained styled page
pub struct HtmlFormatter;

/// Coordinates the individual formatters behind one entry point
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Keyword Analysis Report</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .legend {
            color: #6c757d;
            font-style: italic;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 15px 0;
        }
        th, td {
            text-align: left;
            padding: 8px 12px;
            border-bottom: 1px solid #e9ecef;
        }
        th {
            background: #f8f9fa;
            color: #007acc;
        }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .failures {
            background: #f8d7da;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #dc3545;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Keyword Analysis Report</h1>
            <p>Generated: {{ generated_at }}</p>
            <p class="legend">{{ legend }}</p>
        </div>

        <div class="section">
            <h2>Summary</h2>
            <table>
                <tr><th>File</th><th>Total</th><th>Ratio</th><th>Weighted</th><th>Unique</th><th>Score</th></tr>
                {{ summary_rows_html | safe }}
            </table>
        </div>

        {% if has_failures %}
        <div class="section">
            <h2>Failed Documents</h2>
            <div class="failures">
                {{ failures_html | safe }}
            </div>
        </div>
        {% endif %}

        {{ details_html | safe }}

        <div class="metadata">
            <p><strong>keyword-ranker v{{ version }}</strong></p>
            <p>Keywords: {{ keyword_count }} ({{ priority_count }} priority) | Weight factor: {{ factor }} | Documents: {{ documents }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlReportTemplate {
    generated_at: String,
    legend: String,
    summary_rows_html: String,
    has_failures: bool,
    failures_html: String,
    details_html: String,
    version: String,
    keyword_count: usize,
    priority_count: usize,
    factor: String,
    documents: usize,
}

/// Render a score without a trailing ".0" when it is integral.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{:.2}", score)
    }
}

fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn file_column_width(&self, report: &BatchReport) -> usize {
        report
            .ranked()
            .iter()
            .map(|a| a.file.chars().count())
            .max()
            .unwrap_or(4)
            .max(4)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "{}", self.colorize("Summary", Color::Cyan)).ok();
        writeln!(out, "{}", self.colorize(SCORE_LEGEND, Color::BrightBlack)).ok();
        writeln!(out).ok();

        let width = self.file_column_width(report);
        writeln!(
            out,
            "  {:<width$}  {:>6}  {:>8}  {:>9}  {:>6}  {:>8}",
            "file", "total", "ratio", "weighted", "unique", "score",
        )
        .ok();

        for analysis in report.ranked() {
            writeln!(
                out,
                "  {:<width$}  {:>6}  {:>8}  {:>9}  {:>6}  {:>8}",
                analysis.file,
                analysis.total,
                format_percent(analysis.ratio),
                format_score(analysis.weighted),
                analysis.unique,
                format_score(analysis.score),
            )
            .ok();
        }

        if report.has_failures() {
            writeln!(out).ok();
            writeln!(out, "{}", self.colorize("Failed documents:", Color::Red)).ok();
            for (file, error) in report.failures() {
                writeln!(out, "  {}: {}", file, error).ok();
            }
        }

        if self.detailed {
            for analysis in report.ranked() {
                writeln!(out).ok();
                writeln!(out, "{}", self.colorize(&analysis.file, Color::Cyan)).ok();
                writeln!(out, "  {:<20}  {:>6}  {:>10}", "keyword", "count", "frequency").ok();

                for count in ranked_counts(analysis) {
                    writeln!(
                        out,
                        "  {:<20}  {:>6}  {:>10}",
                        count.keyword,
                        count.count,
                        format_percent(count.frequency),
                    )
                    .ok();
                }

                writeln!(
                    out,
                    "  Total keyword count: {} (ratio: {})",
                    analysis.total,
                    format_percent(analysis.ratio),
                )
                .ok();
                writeln!(out, "  Weighted keyword count: {}", format_score(analysis.weighted)).ok();
                writeln!(out, "  Unique keyword count: {}", analysis.unique).ok();
                writeln!(out, "  Score: {}", format_score(analysis.score)).ok();
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let summary: Vec<_> = report.ranked().into_iter().cloned().collect();
        let failures: Vec<_> = report
            .failures()
            .into_iter()
            .map(|(file, error)| serde_json::json!({ "file": file, "error": error }))
            .collect();

        let value = serde_json::json!({
            "metadata": report.metadata,
            "summary": summary,
            "failures": failures,
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };

        Ok(rendered)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "# Keyword Analysis Report").ok();
        writeln!(out).ok();
        writeln!(out, "`{}`", SCORE_LEGEND).ok();
        writeln!(out).ok();
        writeln!(out, "## Summary").ok();
        writeln!(out).ok();
        writeln!(out, "| File | Total | Ratio | Weighted | Unique | Score |").ok();
        writeln!(out, "|------|------:|------:|---------:|-------:|------:|").ok();

        for analysis in report.ranked() {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                analysis.file,
                analysis.total,
                format_percent(analysis.ratio),
                format_score(analysis.weighted),
                analysis.unique,
                format_score(analysis.score),
            )
            .ok();
        }

        if report.has_failures() {
            writeln!(out).ok();
            writeln!(out, "## Failed Documents").ok();
            writeln!(out).ok();
            for (file, error) in report.failures() {
                writeln!(out, "- **{}**: {}", file, error).ok();
            }
        }

        for analysis in report.ranked() {
            writeln!(out).ok();
            writeln!(out, "## {}", analysis.file).ok();
            writeln!(out).ok();
            writeln!(out, "| Keyword | Count | Frequency |").ok();
            writeln!(out, "|---------|------:|----------:|").ok();
            for count in ranked_counts(analysis) {
                writeln!(
                    out,
                    "| {} | {} | {} |",
                    count.keyword,
                    count.count,
                    format_percent(count.frequency),
                )
                .ok();
            }
        }

        if self.include_metadata {
            writeln!(out).ok();
            writeln!(out, "---").ok();
            writeln!(
                out,
                "Generated {} by keyword-ranker v{} | {} keywords, factor {}",
                report.metadata.generated_at,
                report.metadata.version,
                report.metadata.keyword_count,
                format_score(report.metadata.factor),
            )
            .ok();
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut summary_rows_html = String::new();
        for analysis in report.ranked() {
            writeln!(
                summary_rows_html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&analysis.file),
                analysis.total,
                format_percent(analysis.ratio),
                format_score(analysis.weighted),
                analysis.unique,
                format_score(analysis.score),
            )
            .ok();
        }

        let mut failures_html = String::new();
        for (file, error) in report.failures() {
            writeln!(
                failures_html,
                "<p><strong>{}</strong>: {}</p>",
                escape_html(file),
                escape_html(error),
            )
            .ok();
        }

        let mut details_html = String::new();
        for analysis in report.ranked() {
            writeln!(details_html, "<div class=\"section\">").ok();
            writeln!(details_html, "<h2>{}</h2>", escape_html(&analysis.file)).ok();
            writeln!(
                details_html,
                "<table><tr><th>Keyword</th><th>Count</th><th>Frequency</th></tr>"
            )
            .ok();
            for count in ranked_counts(analysis) {
                writeln!(
                    details_html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&count.keyword),
                    count.count,
                    format_percent(count.frequency),
                )
                .ok();
            }
            writeln!(details_html, "</table>").ok();
            writeln!(details_html, "</div>").ok();
        }

        let template = HtmlReportTemplate {
            generated_at: report.metadata.generated_at.clone(),
            legend: SCORE_LEGEND.to_string(),
            summary_rows_html,
            has_failures: report.has_failures(),
            failures_html,
            details_html,
            version: report.metadata.version.clone(),
            keyword_count: report.metadata.keyword_count,
            priority_count: report.metadata.priority_count,
            factor: format_score(report.metadata.factor),
            documents: report.metadata.documents,
        };

        template.render().map_err(|e| {
            crate::error::KeywordRankerError::OutputFormatting(format!(
                "Failed to render HTML report: {}",
                e
            ))
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(),
        }
    }

    pub fn generate(&self, report: &BatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}
