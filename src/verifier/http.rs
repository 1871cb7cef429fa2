use eyre::WrapErr as _;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{SeedVerifier, VerifierError};
use crate::seed_words::NumberOfSeedWords;

const NEW_SEED_PATH: &str = "/api/v1/wallet/newSeed";
const VERIFY_SEED_PATH: &str = "/api/v2/wallet/seed/verify";

/// Talks to the wallet daemon's seed endpoints.
#[derive(Debug, Clone)]
pub struct HttpSeedVerifier {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NewSeedResponse {
    seed: String,
}

#[derive(Debug, Serialize)]
struct VerifySeedRequest<'a> {
    seed: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

impl HttpSeedVerifier {
    pub fn new(base_url: Url) -> Self {
        Self { base_url, client: reqwest::Client::new() }
    }

    pub fn try_from_url(base_url: &str) -> eyre::Result<Self> {
        let base_url = Url::parse(base_url)
            .wrap_err_with(|| format!("invalid verifier base url: {base_url}"))?;

        Ok(Self::new(base_url))
    }

    fn endpoint(&self, path: &str) -> Result<Url, VerifierError> {
        self.base_url.join(path).map_err(|error| VerifierError::Transport(error.to_string()))
    }
}

#[async_trait::async_trait]
impl SeedVerifier for HttpSeedVerifier {
    async fn generate(&self, words: NumberOfSeedWords) -> Result<String, VerifierError> {
        let url = self.endpoint(NEW_SEED_PATH)?;
        debug!("requesting a fresh {words} word seed");

        let response = self
            .client
            .get(url)
            .query(&[("entropy", words.to_entropy_bits())])
            .send()
            .await
            .map_err(|error| VerifierError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifierError::UnexpectedStatus(status.as_u16()));
        }

        let body: NewSeedResponse = response
            .json()
            .await
            .map_err(|error| VerifierError::Transport(error.to_string()))?;

        Ok(body.seed)
    }

    async fn verify(&self, seed: &str) -> Result<(), VerifierError> {
        let url = self.endpoint(VERIFY_SEED_PATH)?;

        let response = self
            .client
            .post(url)
            .json(&VerifySeedRequest { seed })
            .send()
            .await
            .map_err(|error| VerifierError::Transport(error.to_string()))?;

        let status = response.status();
        match status {
            status if status.is_success() => Ok(()),

            // the one authoritative rejection of the seed text itself
            StatusCode::UNPROCESSABLE_ENTITY => {
                let message = response
                    .json::<ApiErrorBody>()
                    .await
                    .map(|body| body.error.message)
                    .unwrap_or_else(|_| "seed failed verification".to_string());

                Err(VerifierError::MalformedSeed(message))
            }

            status => Err(VerifierError::UnexpectedStatus(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_parse() {
        assert!(HttpSeedVerifier::try_from_url("http://127.0.0.1:6420").is_ok());
        assert!(HttpSeedVerifier::try_from_url("not a url").is_err());
    }

    #[test]
    fn endpoints_are_rooted_at_the_base() {
        let verifier = HttpSeedVerifier::try_from_url("http://127.0.0.1:6420/ignored").unwrap();

        let url = verifier.endpoint(VERIFY_SEED_PATH).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:6420/api/v2/wallet/seed/verify");
    }
}
