/// Base URL of a deployment's REST API. Always ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub const DEFAULT_DEPLOYMENT: &'static str = "us1";

    /// `us1` lives at the bare api host; every other deployment is a subdomain.
    pub fn for_deployment(deployment: &str) -> Self {
        if deployment.is_empty() || deployment == Self::DEFAULT_DEPLOYMENT {
            Self("https://api.sumologic.com/api/".into())
        } else {
            Self(format!("https://api.{deployment}.sumologic.com/api/"))
        }
    }

    pub fn from_base_url(url: &str) -> Self {
        if url.ends_with('/') {
            Self(url.to_string())
        } else {
            Self(format!("{url}/"))
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.0, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
