/// Tokens that mark the start of a service name ("Amazon Bedrock", "AWS Lambda").
const VENDOR_PREFIXES: &[&str] = &["amazon", "aws"];

/// Service abbreviations written in lowercase that still belong to a name.
const LOWERCASE_SERVICES: &[&str] = &["s3", "ec2", "rds", "eks", "ecs"];

/// Max tokens taken after a vendor prefix.
const MAX_NAME_TOKENS: usize = 3;

/// Tokens inspected by the capitalized-words fallback.
const FALLBACK_WINDOW: usize = 5;

/// Best-guess service name for an announcement title.
///
/// Takes up to three name-like tokens following "Amazon"/"AWS"; a token is
/// name-like when it starts uppercase or is a known lowercase abbreviation.
/// Without such a prefix, keeps the capitalized tokens among the first five.
/// Returns an empty string when nothing qualifies.
pub fn infer_service_name(title: &str) -> String {
    let words: Vec<&str> = title.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        if !is_vendor_prefix(word) || i + 1 >= words.len() {
            continue;
        }
        let parts: Vec<&str> = words[i + 1..]
            .iter()
            .take(MAX_NAME_TOKENS)
            .take_while(|w| is_name_like(w))
            .copied()
            .collect();
        if !parts.is_empty() {
            return parts.join(" ");
        }
    }

    words
        .iter()
        .take(FALLBACK_WINDOW)
        .filter(|w| starts_uppercase(w))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_vendor_prefix(word: &str) -> bool {
    VENDOR_PREFIXES
        .iter()
        .any(|p| word.eq_ignore_ascii_case(p))
}

fn is_name_like(word: &str) -> bool {
    starts_uppercase(word)
        || LOWERCASE_SERVICES
            .iter()
            .any(|s| word.eq_ignore_ascii_case(s))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
