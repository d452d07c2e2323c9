use crate::error::{PipelineError, UserFriendlyError};
use crate::extractor::BatchSummary;
use crate::organizer::writer::{LookupReport, MaterializeReport, OrganizeReport};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

impl MessageType {
    fn emoji(&self) -> Emoji<'static, 'static> {
        match self {
            MessageType::Success => CHECKMARK,
            MessageType::Error => CROSS,
            MessageType::Warning => WARNING,
            MessageType::Info => INFO,
        }
    }

    /// Lower-case level tag; doubles as the plain-mode prefix (upper-cased)
    /// and the JSON "level" field.
    fn level(&self) -> &'static str {
        match self {
            MessageType::Success => "success",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Info => "info",
        }
    }

    fn plain_mark(&self) -> &'static str {
        match self {
            MessageType::Success => "✓",
            MessageType::Error => "✗",
            MessageType::Warning => "!",
            MessageType::Info => "i",
        }
    }

    fn paint(&self, text: &str) -> String {
        match self {
            MessageType::Success => style(text).green().bold().to_string(),
            MessageType::Error => style(text).red().bold().to_string(),
            MessageType::Warning => style(text).yellow().bold().to_string(),
            MessageType::Info => style(text).cyan().to_string(),
        }
    }

    fn goes_to_stderr(&self) -> bool {
        matches!(self, MessageType::Error)
    }
}

pub struct OutputFormatter {
    #[allow(dead_code)]
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        self.emit(MessageType::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(MessageType::Error, message);
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            self.emit(MessageType::Warning, message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            self.emit(MessageType::Info, message);
        }
    }

    fn emit(&self, kind: MessageType, message: &str) {
        let line = match self.mode {
            OutputMode::Json => {
                self.print_json_message(kind.level(), message);
                return;
            }
            OutputMode::Human if self.use_colors => {
                format!("{}{}", kind.emoji(), kind.paint(message))
            }
            OutputMode::Human => format!("{} {}", kind.plain_mark(), message),
            OutputMode::Plain => format!("{}: {}", kind.level().to_uppercase(), message),
        };

        if kind.goes_to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn debug(&self, message: &str) {
        if !self.should_show_message(2) {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => println!("  {}", style(message).dim()),
            OutputMode::Human => println!("  DEBUG: {}", message),
            OutputMode::Json => self.print_json_message("debug", message),
            OutputMode::Plain => println!("DEBUG: {}", message),
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!("{}{}", ROCKET, style(operation).bold())
            }
            OutputMode::Human => println!("> {}", operation),
            OutputMode::Json => self.print_json_message("operation_start", operation),
            OutputMode::Plain => println!("STARTING: {}", operation),
        }
    }

    pub fn print_user_friendly_error(&self, error: &PipelineError) {
        self.error(&error.user_message());

        let suggestion = match error.suggestion() {
            Some(suggestion) => suggestion,
            None => return,
        };

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!();
                println!(
                    "{}{}",
                    INFO,
                    style(&format!("Suggestion: {}", suggestion)).cyan()
                );
            }
            OutputMode::Human => {
                println!();
                println!("Suggestion: {}", suggestion);
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "suggestion",
                    "message": suggestion
                }));
            }
            OutputMode::Plain => println!("SUGGESTION: {}", suggestion),
        }
    }

    /// Ask a yes/no question. Anything but an explicit "y" declines, as does
    /// a closed stdin (non-interactive invocation without --yes).
    pub fn confirm(&self, question: &str) -> bool {
        print!("{} (y/n): ", question);
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        match std::io::stdin().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        }
    }

    pub fn print_batch_summary(&self, summary: &BatchSummary, output_dir: &Path) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_batch_summary(summary, output_dir),
            OutputMode::Json => {
                let json = serde_json::json!({
                    "type": "extraction_summary",
                    "processed": summary.processed,
                    "success": summary.success_count,
                    "empty": summary.empty_count,
                    "failed": summary.failure_count,
                    "images": summary.total_produced,
                    "cancelled": summary.cancelled,
                    "duration_ms": summary.elapsed.as_millis(),
                    "output_dir": output_dir.display().to_string(),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputMode::Plain => {
                println!("COMPLETED: extraction");
                println!("Processed: {}", summary.processed);
                println!("Successful: {} ({} images)", summary.success_count, summary.total_produced);
                println!("Empty: {}", summary.empty_count);
                println!("Failed: {}", summary.failure_count);
                println!("Duration: {:?}", summary.elapsed);
                println!("Output: {}", output_dir.display());
            }
        }
    }

    fn print_human_batch_summary(&self, summary: &BatchSummary, output_dir: &Path) {
        println!();
        self.print_separator();

        let title = if summary.cancelled {
            "Extraction stopped by user"
        } else {
            "Extraction complete"
        };
        if self.use_colors {
            println!("{}", style(title).bold());
        } else {
            println!("{}", title);
        }
        println!();

        println!("  Files processed:   {}", summary.processed);
        println!(
            "  {}",
            self.colored(
                &format!(
                    "Successful:        {} files ({} images)",
                    summary.success_count, summary.total_produced
                ),
                |m| style(m).green()
            )
        );
        println!(
            "  {}",
            self.colored(
                &format!("Empty (no images): {} files", summary.empty_count),
                |m| style(m).yellow()
            )
        );
        println!(
            "  {}",
            self.colored(&format!("Failed:            {} files", summary.failure_count), |m| {
                style(m).red()
            })
        );
        println!();
        println!("  Time elapsed:      {}", format_duration(summary.elapsed));
        println!("  Output location:   {}", output_dir.display());

        self.print_separator();
    }

    pub fn print_category_table(&self, report: &OrganizeReport) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let json = serde_json::json!({
                    "type": "organize_summary",
                    "organized": report.organized,
                    "skipped_no_asset": report.skipped_no_asset,
                    "errors": report.errors.len(),
                    "categories": report.category_counts,
                    "mapping_file": report.mapping_path.display().to_string(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
                );
            }
            _ => {
                println!();
                println!("Assets organized by category:");

                // Largest categories first, like any sane leaderboard.
                let mut counts: Vec<(&String, &usize)> = report.category_counts.iter().collect();
                counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

                for (category, count) in counts {
                    println!("  {:<15}: {:>6} assets", category, count);
                }

                println!();
                println!("  {:<15}: {:>6} assets", "TOTAL", report.organized);
                if report.skipped_no_asset > 0 {
                    println!("  (no usable asset in {} directories)", report.skipped_no_asset);
                }
                if !report.errors.is_empty() {
                    println!("  ({} assets skipped on filesystem errors)", report.errors.len());
                }
                println!();
                println!("Mapping file saved to: {}", report.mapping_path.display());
            }
        }
    }

    pub fn print_lookup_summary(&self, report: &LookupReport) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let json = serde_json::json!({
                    "type": "lookup_summary",
                    "total": report.total,
                    "organized": report.organized,
                    "no_assets": report.skipped_no_asset,
                    "types": report.type_counts,
                    "errors": report.errors.len(),
                    "lookup_file": report.document_path.display().to_string(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
                );
            }
            _ => {
                println!();
                println!("Total asset directories: {}", report.total);
                for (file_type, count) in &report.type_counts {
                    println!("Assets with {} files:   {}", file_type.to_uppercase(), count);
                }
                println!("Assets with no images:   {}", report.skipped_no_asset);
                println!("Total usable assets:     {}", report.organized);
                println!();
                println!("Lookup file: {}", report.document_path.display());
            }
        }
    }

    pub fn print_materialize_summary(&self, report: &MaterializeReport, engine_root: &Path) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let json = serde_json::json!({
                    "type": "materialize_summary",
                    "copied": report.copied,
                    "skipped_existing": report.skipped_existing,
                    "errors": report.errors.len(),
                    "engine_root": engine_root.display().to_string(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
                );
            }
            _ => {
                println!();
                println!("Copied {} assets into {}", report.copied, engine_root.display());
                if report.skipped_existing > 0 {
                    println!("Skipped {} already-present files", report.skipped_existing);
                }
                if !report.errors.is_empty() {
                    println!("{} files failed to copy", report.errors.len());
                }
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => println!("{}", style("─".repeat(60)).dim()),
            OutputMode::Json => {}
            _ => println!("{}", "-".repeat(60)),
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn colored<F>(&self, message: &str, color_fn: F) -> String
    where
        F: Fn(&str) -> console::StyledObject<&str>,
    {
        if self.use_colors {
            color_fn(message).to_string()
        } else {
            message.to_string()
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}
