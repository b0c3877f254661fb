//! Quotation number formatting.
//!
//! Numbers have the shape `[INITIALS][DDMMYYYY]-[SEQ]`, e.g. `MF29082026-03`,
//! and match `^[A-Z0-9]{2}\d{8}-\d{2,}$`. The sequence is a per-day counter
//! allocated atomically by `CounterRepository`; this module only derives the
//! initials and formats the final string.

use chrono::NaiveDate;

/// Derives two uppercase ASCII initials for a user.
///
/// Only ASCII-alphanumeric characters count, so the result always fits the
/// `[A-Z0-9]{2}` prefix of the number contract regardless of the user's
/// script. First letters of the first two usable words of the display name;
/// a single word contributes its first two characters; otherwise the same
/// rules over the email local part; fallback `"XX"`.
pub fn initials(display_name: &str, email: &str) -> String {
    initials_from(display_name)
        .or_else(|| initials_from(email.split('@').next().unwrap_or("")))
        .unwrap_or_else(|| "XX".to_string())
}

/// Words of the input reduced to their ASCII-alphanumeric characters;
/// words with none are dropped.
fn ascii_words(s: &str) -> Vec<String> {
    s.split_whitespace()
        .map(|word| word.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect()
}

fn initials_from(s: &str) -> Option<String> {
    let words = ascii_words(s);
    let raw = match words.as_slice() {
        [first, second, ..] => {
            let a = first.chars().next()?;
            let b = second.chars().next()?;
            format!("{}{}", a, b)
        }
        [single] => {
            let mut chars = single.chars();
            let a = chars.next()?;
            let b = chars.next()?;
            format!("{}{}", a, b)
        }
        [] => return None,
    };
    Some(raw.to_ascii_uppercase())
}

/// Formats a quotation number from initials, date and per-day sequence.
///
/// The sequence is zero-padded to two digits; from the 100th quotation of a
/// day onwards it simply widens (`-100`, `-101`, ...), the prefix and date
/// stay fixed-width.
pub fn format_number(initials: &str, date: NaiveDate, seq: u32) -> String {
    format!("{}{}-{:02}", initials, date.format("%d%m%Y"), seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initials_two_words() {
        assert_eq!(initials("Mohamed Frihaoui", "m@example.com"), "MF");
        assert_eq!(initials("jane doe smith", "j@example.com"), "JD");
    }

    #[test]
    fn test_initials_single_word() {
        assert_eq!(initials("Admin", "admin@example.com"), "AD");
    }

    #[test]
    fn test_initials_from_email_fallback() {
        assert_eq!(initials("", "sales@example.com"), "SA");
        assert_eq!(initials("   ", "ops@example.com"), "OP");
    }

    #[test]
    fn test_initials_ultimate_fallback() {
        assert_eq!(initials("", "a@example.com"), "XX");
        assert_eq!(initials("", ""), "XX");
    }

    #[test]
    fn test_initials_skip_non_ascii() {
        // Non-ASCII characters never reach the number prefix.
        assert_eq!(initials("Žan Novak", "z@example.com"), "AN");
        assert_eq!(initials("ßeta Test", "b@example.com"), "ET");
        assert_eq!(initials("Ángel Pérez", "a@example.com"), "NP");
    }

    #[test]
    fn test_initials_fully_non_ascii_falls_through() {
        // A name with no usable characters falls back to the email,
        // then to the fixed default.
        assert_eq!(initials("Жанна Жук", "zh.zhuk@example.com"), "ZH");
        assert_eq!(initials("Жанна Жук", "ж@example.com"), "XX");
    }

    #[test]
    fn test_format_number_zero_padding() {
        let n = format_number("MF", date(2026, 8, 29), 3);
        assert_eq!(n, "MF29082026-03");

        let n = format_number("XX", date(2026, 1, 5), 12);
        assert_eq!(n, "XX05012026-12");
    }

    #[test]
    fn test_format_number_widens_past_99() {
        let n = format_number("MF", date(2026, 8, 29), 100);
        assert_eq!(n, "MF29082026-100");
    }

    #[test]
    fn test_format_matches_contract() {
        for (name, email) in [
            ("Jane Doe", "jane@x.com"),
            ("Žan Novak", "zan@x.com"),
            ("ßeta", "beta@x.com"),
            ("Жанна", "zh@x.com"),
            ("", ""),
        ] {
            let prefix = initials(name, email);
            let n = format_number(&prefix, date(2026, 12, 31), 1);
            // ^[A-Z0-9]{2}\d{8}-\d{2}$
            assert_eq!(n.len(), 13, "number {:?} for name {:?}", n, name);
            let (prefix, rest) = n.split_at(2);
            assert!(prefix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            let (digits, seq) = rest.split_at(8);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(seq.starts_with('-'));
            assert!(seq[1..].chars().all(|c| c.is_ascii_digit()));
            assert_eq!(seq.len(), 3);
        }
    }
}
