use crate::homework::REPORT_SEPARATOR;

/// Split `text` into chunks of at most `limit` characters.
///
/// Chunks break on blank lines where possible so a homework line is never cut in
/// half; a single paragraph longer than `limit` is hard-split on char boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let sep_len = REPORT_SEPARATOR.chars().count();
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for paragraph in text.split(REPORT_SEPARATOR) {
        let para_len = paragraph.chars().count();

        if current_len > 0 && current_len + sep_len + para_len <= limit {
            current.push_str(REPORT_SEPARATOR);
            current.push_str(paragraph);
            current_len += sep_len + para_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if para_len <= limit {
            current.push_str(paragraph);
            current_len = para_len;
            continue;
        }

        let chars: Vec<char> = paragraph.chars().collect();
        for piece in chars.chunks(limit) {
            chunks.push(piece.iter().collect());
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }

    chunks
}
