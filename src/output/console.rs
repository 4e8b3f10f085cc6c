//! Terminal rendering of search results

use crate::crawler::SearchOutcome;
use crate::model::{CapturedThread, JobKind, MatchResult};
use crate::output::markup::to_plain_text;
use crate::pattern::{Color, HighlightSpan, Highlighter, SpanStyle};
use ::console::{style, Style};
use std::fmt::Write;

/// Prints captured-thread notices followed by every result
pub fn render_results(outcome: &SearchOutcome, highlighter: &Highlighter<'_>, plain_text: bool) {
    print!("{}", format_results(outcome, highlighter, plain_text));
}

/// Formats the terminal output for a finished search
///
/// Snippets are highlighted only for results found by pattern search;
/// full-capture results are shown as-is.
pub fn format_results(
    outcome: &SearchOutcome,
    highlighter: &Highlighter<'_>,
    plain_text: bool,
) -> String {
    let mut out = String::new();

    for thread in &outcome.captured {
        let _ = writeln!(out, "{}", captured_notice(thread));
    }
    if !outcome.captured.is_empty() {
        out.push('\n');
    }

    for result in &outcome.results {
        format_result(&mut out, result, highlighter, plain_text);
    }

    let _ = writeln!(
        out,
        "{} results ({} captured, {} matched)",
        style(outcome.results.len()).bold(),
        outcome.count_by_kind(JobKind::FullCapture),
        outcome.count_by_kind(JobKind::Search)
    );

    out
}

fn captured_notice(thread: &CapturedThread) -> String {
    let subject = if thread.subject.is_empty() {
        String::from("(no subject)")
    } else {
        to_plain_text(&thread.subject)
    };

    format!(
        "{} /{}/{} {}",
        style("Capturing full thread").green().bold(),
        thread.board,
        thread.thread_id,
        style(format!("\"{}\"", subject)).color256(39).italic()
    )
}

fn format_result(
    out: &mut String,
    result: &MatchResult,
    highlighter: &Highlighter<'_>,
    plain_text: bool,
) {
    let text = if plain_text {
        to_plain_text(&result.snippet)
    } else {
        result.snippet.clone()
    };

    let snippet = match result.origin {
        JobKind::Search => paint_spans(&text, &highlighter.highlight(&text), highlighter),
        JobKind::FullCapture => text,
    };

    let _ = writeln!(
        out,
        "{} /{}/{} #{}",
        style(format!("[{}]", result.origin)).dim(),
        result.board,
        result.thread_id,
        result.post_id
    );
    let _ = writeln!(out, "  {}", style(&result.url).underlined());
    for line in snippet.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    if let Some(media_url) = &result.media_url {
        match &result.media_file {
            Some(path) => {
                let _ = writeln!(out, "  media: {} -> {}", media_url, path.display());
            }
            None => {
                let _ = writeln!(out, "  media: {}", media_url);
            }
        }
    }
    out.push('\n');
}

/// Applies terminal styles to the byte ranges in `spans`
fn paint_spans(text: &str, spans: &[HighlightSpan], highlighter: &Highlighter<'_>) -> String {
    let mut painted = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            continue;
        }
        painted.push_str(&text[cursor..span.start]);

        let style = match span.style {
            SpanStyle::Keyword { slot } => keyword_style(highlighter.palette().color_for(slot)),
            SpanStyle::Pattern => Style::new().black().on_yellow().bold(),
        };
        let _ = write!(painted, "{}", style.apply_to(&text[span.start..span.end]));
        cursor = span.end;
    }

    painted.push_str(&text[cursor..]);
    painted
}

fn keyword_style(color: Color) -> Style {
    let base = Style::new().bold();
    match color {
        Color::Red => base.red(),
        Color::Green => base.green(),
        Color::Yellow => base.yellow(),
        Color::Blue => base.blue(),
        Color::Magenta => base.magenta(),
        Color::Cyan => base.cyan(),
        Color::BrightRed => base.red().bright(),
        Color::BrightGreen => base.green().bright(),
        Color::BrightYellow => base.yellow().bright(),
        Color::BrightBlue => base.blue().bright(),
        Color::BrightMagenta => base.magenta().bright(),
        Color::BrightCyan => base.cyan().bright(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{compile_pattern, extract_keywords, Palette};
    use std::path::PathBuf;

    fn result(origin: JobKind, snippet: &str) -> MatchResult {
        MatchResult {
            board: "g".to_string(),
            thread_id: 100,
            post_id: 101,
            url: "https://boards.example.org/g/thread/100#p101".to_string(),
            media_url: Some("https://i.example.org/g/5.png".to_string()),
            media_file: Some(PathBuf::from("media/g/100/5.png")),
            snippet: snippet.to_string(),
            origin,
        }
    }

    fn outcome(results: Vec<MatchResult>) -> SearchOutcome {
        SearchOutcome {
            results,
            captured: vec![CapturedThread {
                board: "g".to_string(),
                thread_id: 100,
                subject: "Cat &amp; dog general".to_string(),
            }],
            keywords: extract_keywords("cat|dog"),
        }
    }

    #[test]
    fn test_format_contains_result_fields() {
        let pattern = compile_pattern("cat|dog").unwrap();
        let outcome = outcome(vec![result(JobKind::Search, "a cat<br>and a dog")]);
        let highlighter = Highlighter::new(&outcome.keywords, &pattern, Palette::default());

        let text = ::console::strip_ansi_codes(&format_results(&outcome, &highlighter, true))
            .to_string();

        assert!(text.contains("Capturing full thread /g/100 \"Cat & dog general\""));
        assert!(text.contains("[search] /g/100 #101"));
        assert!(text.contains("https://boards.example.org/g/thread/100#p101"));
        assert!(text.contains("  a cat\n  and a dog\n"));
        assert!(text.contains("media: https://i.example.org/g/5.png -> media/g/100/5.png"));
        assert!(text.contains("1 results (0 captured, 1 matched)"));
    }

    #[test]
    fn test_paint_spans_keeps_text() {
        let pattern = compile_pattern("cat|dog").unwrap();
        let keywords = extract_keywords("cat|dog");
        let highlighter = Highlighter::new(&keywords, &pattern, Palette::default());

        let text = "a cat and a dog";
        let painted = paint_spans(text, &highlighter.highlight(text), &highlighter);
        assert_eq!(::console::strip_ansi_codes(&painted), text);
    }

    #[test]
    fn test_raw_markup_kept_when_plain_text_off() {
        let pattern = compile_pattern("x").unwrap();
        let outcome = outcome(vec![result(JobKind::FullCapture, "a<br>b")]);
        let highlighter = Highlighter::new(&outcome.keywords, &pattern, Palette::default());

        let text = ::console::strip_ansi_codes(&format_results(&outcome, &highlighter, false))
            .to_string();
        assert!(text.contains("  a<br>b\n"));
    }
}
