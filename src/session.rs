//! RoleSessionName handling: caller-chosen label plus a random suffix

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const SUFFIX_LEN: usize = 6;

/// RoleSessionName must be 2..=64 characters
const SESSION_NAME_MAX_LEN: usize = 64;

static SESSION_LABEL_RE: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"\A[A-Za-z0-9_+=,.@-]+\z").unwrap());

pub fn validate_label(label: &str) -> Result<(), crate::error::Error> {
    if !SESSION_LABEL_RE.is_match(label) {
        return Err(crate::error::Error::InvalidArgument(format!(
            "session label {label:?} must consist of alphanumerics and '+=,.@-_'"
        )));
    }
    let max = SESSION_NAME_MAX_LEN - SUFFIX_LEN - 1;
    if label.len() > max {
        return Err(crate::error::Error::InvalidArgument(format!(
            "session label must be at most {max} characters long"
        )));
    }
    Ok(())
}

pub fn random_suffix<R: rand::Rng>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Returns `<label>-<suffix>`
pub fn with_random_suffix(label: &str) -> String {
    let suffix = random_suffix(&mut rand::thread_rng());
    format!("{label}-{suffix}")
}
