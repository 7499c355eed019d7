/// Normalize an email address by lower-casing its domain part.
/// The local part is left untouched, matching the behavior mentees
/// and mentors see from typical account systems.
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_lowercased() {
        let samples = [
            ("test1@EXAMPLE.COM", "test1@example.com"),
            ("Test2@Example.com", "Test2@example.com"),
            ("TEST3@EXAMPLE.COM", "TEST3@example.com"),
            ("test4@example.COM", "test4@example.com"),
        ];
        for (input, expected) in samples {
            assert_eq!(normalize_email(input), expected);
        }
    }

    #[test]
    fn local_part_is_preserved() {
        assert_eq!(normalize_email("MiXeD@example.com"), "MiXeD@example.com");
    }

    #[test]
    fn missing_at_sign_passes_through() {
        assert_eq!(normalize_email("not-an-email"), "not-an-email");
    }
}
