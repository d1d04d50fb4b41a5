#[derive(Debug, Clone)]
pub struct Config {
    inner: ConfigData,
    federation_endpoint: url::Url,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigData {
    pub region: Option<String>,
    pub federation_endpoint: Option<String>,
    pub issuer: Option<String>,
    pub destination: Option<String>,
}

fn default_region() -> Option<String> {
    if let Ok(r) = std::env::var("AWS_REGION") {
        return Some(r);
    }
    if let Ok(r) = std::env::var("AWS_DEFAULT_REGION") {
        return Some(r);
    }
    None
}

impl Config {
    pub fn new(mut inner: ConfigData) -> Result<Self, crate::error::Error> {
        if inner.region.is_none() {
            inner.region = default_region();
        }
        let federation_endpoint = parse_endpoint(
            inner
                .federation_endpoint
                .as_deref()
                .unwrap_or(crate::federation::DEFAULT_ENDPOINT),
        )?;

        Ok(Self {
            inner,
            federation_endpoint,
        })
    }

    pub fn federation_endpoint(&self) -> url::Url {
        self.federation_endpoint.clone()
    }

    pub fn login_options(&self) -> crate::federation::LoginOptions {
        crate::federation::LoginOptions {
            endpoint: self.federation_endpoint(),
            issuer: self
                .issuer
                .clone()
                .unwrap_or_else(|| crate::federation::DEFAULT_ISSUER.to_owned()),
            destination: self
                .destination
                .clone()
                .unwrap_or_else(|| crate::federation::DEFAULT_DESTINATION.to_owned()),
        }
    }
}

impl std::ops::Deref for Config {
    type Target = ConfigData;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

fn parse_endpoint(u: &str) -> Result<url::Url, crate::error::Error> {
    let url = url::Url::parse(u).map_err(|_| {
        crate::error::Error::ConfigError("federation endpoint (--federation-endpoint) is malformed".to_string())
    })?;

    match (url.scheme(), url.origin()) {
        ("https" | "http", url::Origin::Tuple(..)) if url.query().is_none() => Ok(url),
        _ => Err(crate::error::Error::ConfigError(
            "federation endpoint (--federation-endpoint) must be an http(s) URL without query".to_string(),
        )),
    }
}
