//! Asset fetching.
//!
//! Assets are fetched eagerly: `AssetFetcher::fetch` resolves the reference,
//! derives a stable file name, spawns the GET and returns immediately with a
//! [`PendingAsset`] handle. Callers collect handles while the page scan
//! continues and settle them as a batch at the very end of the run.
//!
//! There are no retries and no caching; duplicate references within one
//! extraction are fetched independently. Extraction is a one-shot,
//! user-initiated operation, so this keeps the fetch path trivial.

use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use crate::error::AssetError;
use crate::options::Options;

/// A fetched asset: derived file name plus raw response body.
#[derive(Debug, Clone)]
pub struct AssetPayload {
    /// File name derived from the last path segment of the resolved URI.
    pub name: String,
    /// Opaque binary body.
    pub data: Vec<u8>,
}

/// An asset fetch in flight: the derived name plus a future result.
///
/// `name` is `None` exactly when name derivation failed; such a handle is
/// already failed with [`AssetError::InvalidName`] and never touched the
/// network.
#[derive(Debug)]
pub struct PendingAsset {
    name: Option<String>,
    state: AssetState,
}

#[derive(Debug)]
enum AssetState {
    /// Terminal failure, known before (or instead of) any I/O.
    Failed(AssetError),
    /// Already-available payload; used by tests and fakes.
    Ready(AssetPayload),
    /// Spawned fetch task.
    InFlight(JoinHandle<std::result::Result<AssetPayload, AssetError>>),
}

/// A settled asset: the terminal outcome of one [`PendingAsset`].
#[derive(Debug)]
pub struct SettledAsset {
    /// Derived name, if one could be derived.
    pub name: Option<String>,
    /// Payload or the per-asset error.
    pub outcome: std::result::Result<AssetPayload, AssetError>,
}

impl PendingAsset {
    /// A handle that is already failed. No network I/O was or will be done.
    #[must_use]
    pub fn failed(name: Option<String>, error: AssetError) -> Self {
        Self {
            name,
            state: AssetState::Failed(error),
        }
    }

    /// A handle that is already resolved. Useful for fakes and tests.
    #[must_use]
    pub fn resolved(payload: AssetPayload) -> Self {
        Self {
            name: Some(payload.name.clone()),
            state: AssetState::Ready(payload),
        }
    }

    /// Derived file name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Wait for the fetch to finish, never panicking and never propagating
    /// an error past the settled value — batch awaits over these cannot
    /// short-circuit.
    pub async fn settle(self) -> SettledAsset {
        let outcome = match self.state {
            AssetState::Failed(error) => Err(error),
            AssetState::Ready(payload) => Ok(payload),
            AssetState::InFlight(handle) => match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(AssetError::Network(format!(
                    "fetch task aborted: {join_error}"
                ))),
            },
        };
        SettledAsset {
            name: self.name,
            outcome,
        }
    }
}

/// Resolves asset references against a base URI and fetches them.
pub struct AssetFetcher {
    client: reqwest::Client,
    base: Url,
}

impl AssetFetcher {
    /// Create a fetcher with a default HTTP client.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self::with_client(base, reqwest::Client::new())
    }

    /// Create a fetcher with a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(base: Url, client: reqwest::Client) -> Self {
        Self { client, base }
    }

    /// Create a fetcher whose client honors the given options.
    pub fn from_options(base: Url, options: &Options) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.request_timeout)
            .build()?;
        Ok(Self::with_client(base, client))
    }

    /// Base URI used for reference resolution.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a reference against the base URI, derive a file name, and
    /// start a non-blocking GET.
    ///
    /// When the resolved URI yields no usable final path segment, the
    /// returned handle is already failed with [`AssetError::InvalidName`]
    /// and no request is issued. Callers must not block on the handle
    /// right away; collect it and settle the whole batch later.
    #[must_use]
    pub fn fetch(&self, reference_uri: &str) -> PendingAsset {
        let resolved = match self.base.join(reference_uri.trim()) {
            Ok(resolved) => resolved,
            Err(_) => {
                return PendingAsset::failed(
                    None,
                    AssetError::InvalidName {
                        uri: reference_uri.to_string(),
                    },
                );
            }
        };

        let Some(name) = derive_asset_name(&resolved) else {
            return PendingAsset::failed(
                None,
                AssetError::InvalidName {
                    uri: resolved.to_string(),
                },
            );
        };

        debug!(uri = %resolved, name = %name, "fetching asset");

        let client = self.client.clone();
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let response = client
                .get(resolved)
                .send()
                .await
                .map_err(|e| AssetError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(AssetError::Http(status.as_u16()));
            }

            let data = response
                .bytes()
                .await
                .map_err(|e| AssetError::Network(e.to_string()))?;

            Ok(AssetPayload {
                name: task_name,
                data: data.to_vec(),
            })
        });

        PendingAsset {
            name: Some(name),
            state: AssetState::InFlight(handle),
        }
    }
}

/// Derive the asset file name: the final path segment of the resolved URI,
/// taken verbatim. Query and fragment never reach the path, so they cannot
/// leak into the name.
#[must_use]
pub fn derive_asset_name(uri: &Url) -> Option<String> {
    let segment = uri.path_segments()?.next_back()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
