//! Greedy word-wrap.

/// Wraps `text` into lines no wider than `max_width`, as measured by `measure`.
///
/// Paragraphs are split on `'\n'` and wrapped independently; blank paragraphs are
/// dropped. A word is appended to the current line while the result still fits;
/// otherwise the line is flushed and the word starts the next one. A single word
/// wider than `max_width` gets a line of its own.
pub fn wrap_paragraphs<F>(text: &str, max_width: f32, measure: F) -> Vec<Vec<String>>
where
    F: Fn(&str) -> f32,
{
    text.split('\n')
        .map(|paragraph| wrap_line(paragraph, max_width, &measure))
        .filter(|lines| !lines.is_empty())
        .collect()
}

fn wrap_line<F>(paragraph: &str, max_width: f32, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in paragraph.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
