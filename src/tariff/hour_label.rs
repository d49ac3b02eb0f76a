use crate::{error::TariffError, tariff::Hour, text::first_digit_run};

/// Parse the start hour of an hour-range label such as `06:00-07:00` or `22 - 6 Uhr`.
pub fn parse_start_hour(label: &str) -> Result<Hour, TariffError> {
    first_digit_run(label)
        .and_then(|digits| digits.parse::<u32>().ok())
        .and_then(|hour| Hour::try_from(hour).ok())
        .ok_or_else(|| TariffError::MalformedInput(format!("`{label}` has no start hour")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_hour() {
        assert_eq!(parse_start_hour("06:00 - 12:00").unwrap().get(), 6);
        assert_eq!(parse_start_hour("22:00-06:00").unwrap().get(), 22);
        assert_eq!(parse_start_hour("0:00-1:00").unwrap().get(), 0);
        assert_eq!(parse_start_hour("from 23h").unwrap().get(), 23);
    }

    #[test]
    fn test_parse_start_hour_fails() {
        assert!(parse_start_hour("noon").is_err());
        assert!(parse_start_hour("24:00-01:00").is_err());
        assert!(parse_start_hour("99999999999999999999:00").is_err());
    }
}
