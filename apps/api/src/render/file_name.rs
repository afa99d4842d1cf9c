/// Builds the download name for a CV title: every character that is not an
/// ASCII letter or digit becomes `_`, the result is lower-cased and `.pdf`
/// is appended. A blank title falls back to `cv.pdf`.
pub fn sanitize_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "cv.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}
