use once_cell::sync::Lazy;
use std::collections::HashSet;

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "he/him", "she/her", "they/them", "he/they", "she/they",
        "it/its", "xe/xem", "ze/zir", "fae/faer", "any", "ask",
    ]
    .into_iter()
    .collect()
});

pub fn is_valid_pronoun(pronoun: &str) -> bool {
    PRONOUNS.contains(pronoun)
}
