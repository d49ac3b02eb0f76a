/// First contiguous run of ASCII digits in the text.
#[must_use]
pub fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|char_: char| char_.is_ascii_digit())?;
    let tail = &text[start..];
    let end = tail.find(|char_: char| !char_.is_ascii_digit()).unwrap_or(tail.len());
    Some(&tail[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("operator_486_output.json"), Some("486"));
        assert_eq!(first_digit_run("06:00-12:00"), Some("06"));
        assert_eq!(first_digit_run("2024"), Some("2024"));
        assert_eq!(first_digit_run("Zürich 12 Uhr"), Some("12"));
        assert_eq!(first_digit_run("no digits"), None);
        assert_eq!(first_digit_run(""), None);
    }
}
