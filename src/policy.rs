//! Session policy source

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPolicy {
    /// Policy document given as a literal JSON string
    Inline(String),
    /// Path to a file whose content is the policy document
    File(std::path::PathBuf),
}

impl SessionPolicy {
    /// Returns the policy body. File content is passed through verbatim; no JSON validation happens here.
    pub async fn load(&self) -> Result<String, crate::error::Error> {
        match self {
            Self::Inline(v) => Ok(v.clone()),
            Self::File(path) => {
                let body = tokio::fs::read_to_string(path).await.map_err(|source| {
                    crate::error::Error::PolicyFileReadError {
                        path: path.clone(),
                        source,
                    }
                })?;
                tracing::debug!(message = "Loaded session policy file", path = ?path, len = body.len());
                Ok(body)
            }
        }
    }

    /// Resolve the CLI pair. Both given is rejected by the argument parser; file wins here otherwise.
    pub fn from_args(
        file: Option<&std::path::Path>,
        json: Option<&str>,
    ) -> Option<Self> {
        match (file, json) {
            (Some(f), _) => Some(Self::File(f.to_owned())),
            (None, Some(j)) if !j.is_empty() => Some(Self::Inline(j.to_owned())),
            (None, _) => None,
        }
    }
}
