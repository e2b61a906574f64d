//! Load orchestration: summary page, then every status list in order, with sample fallback.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use url::Url;

use crate::address;
use crate::core::client::constants::DEFAULT_MAX_PAGES;
use crate::core::{GardenClient, GardenError, Relay};

use super::normalize::Normalizer;
use super::raw::{RawItem, RawProfile, RawStatus, stats_to_raw};
use super::sample::SampleProvider;
use super::scrape::{self, ExtractionStrategy, ProfileSummary};
use super::{Profile, ProfileSource, Snapshot, StatusSlug};

/// Observable state of a [`ProfileLoader`].
///
/// `Loaded` and `Failed` describe the last finished load; a new load moves back through
/// `Loading`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded(ProfileSource),
    Failed(String),
}

/// What to do with lists already fetched when a later fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Any failure discards every remote result; the whole snapshot is the sample.
    #[default]
    AllOrNothing,
    /// Keep the summary and the lists fetched before the failure, take the rest from the
    /// sample. A failed summary fetch still falls back wholesale.
    MergeWithSample,
}

/// Per-call options for [`ProfileLoader::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip the upstream entirely and serve the sample.
    pub force_sample: bool,
}

impl LoadOptions {
    pub const fn sample() -> Self {
        Self { force_sample: true }
    }
}

/// Remote results gathered so far.
#[derive(Default)]
struct RemoteProgress {
    summary: Option<ProfileSummary>,
    statuses: Vec<RawStatus>,
}

/// Orchestrates relay, extraction, normalization and the sample fallback.
///
/// At most one load runs at a time; a load requested while another is in flight returns
/// `Ok(None)` without touching the network.
pub struct ProfileLoader<R> {
    relay: R,
    site: Url,
    strategy: ExtractionStrategy,
    normalizer: Normalizer,
    sample: SampleProvider,
    policy: FallbackPolicy,
    max_pages: u32,
    phase: Mutex<LoadPhase>,
}

impl ProfileLoader<GardenClient> {
    /// Loader fetching through `client`, addressing pages under the client's site root.
    pub fn from_client(client: GardenClient) -> Self {
        let site = client.base_site().clone();
        Self::new(client, site)
    }
}

impl<R: Relay> ProfileLoader<R> {
    /// Loader fetching through `relay`, addressing pages under `site`.
    pub fn new(relay: R, site: Url) -> Self {
        Self {
            relay,
            normalizer: Normalizer::new(site.clone()),
            site,
            strategy: ExtractionStrategy::default(),
            sample: SampleProvider::default(),
            policy: FallbackPolicy::default(),
            max_pages: DEFAULT_MAX_PAGES,
            phase: Mutex::new(LoadPhase::Idle),
        }
    }

    /// Replace the selector strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the sample provider.
    #[must_use]
    pub fn with_sample(mut self, sample: SampleProvider) -> Self {
        self.sample = sample;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cap on listing pages followed per status (at least 1).
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn phase(&self) -> LoadPhase {
        self.lock_phase().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.lock_phase() == LoadPhase::Loading
    }

    /// Load a fresh snapshot for `username`.
    ///
    /// Returns `Ok(None)` when another load is already running. Upstream failures are not
    /// returned: they switch the snapshot to the sample (see [`FallbackPolicy`]) and are
    /// reported in [`Snapshot::error`].
    ///
    /// # Errors
    ///
    /// Returns the upstream error when the sample is unavailable too, or
    /// `GardenError::SampleUnavailable` when the sample was requested explicitly and is
    /// missing.
    #[tracing::instrument(skip_all, err, fields(username = %username))]
    pub async fn load(
        &self,
        username: &str,
        options: LoadOptions,
    ) -> Result<Option<Snapshot>, GardenError> {
        let Some(mut guard) = PhaseGuard::begin(&self.phase) else {
            debug!("load already in flight; ignoring request");
            return Ok(None);
        };

        let result = self.run(username, options).await;
        guard.finish(match &result {
            Ok(snapshot) => LoadPhase::Loaded(snapshot.source),
            Err(e) => LoadPhase::Failed(e.to_string()),
        });
        result.map(Some)
    }

    async fn run(&self, username: &str, options: LoadOptions) -> Result<Snapshot, GardenError> {
        if options.force_sample {
            info!("sample requested explicitly");
            let profile = self.sample.load().await?;
            return Ok(Snapshot {
                profile,
                source: ProfileSource::Sample,
                error: None,
            });
        }

        let mut progress = RemoteProgress::default();
        let outcome = self.fetch_remote(username, &mut progress).await;
        match outcome {
            Ok(()) => {
                let summary = progress.summary.unwrap_or_default();
                let profile = self.assemble(username, summary, progress.statuses);
                info!(items = profile.total_items(), "loaded remote profile");
                Ok(Snapshot {
                    profile,
                    source: ProfileSource::Remote,
                    error: None,
                })
            }
            Err(error) => self.fall_back(username, error, progress).await,
        }
    }

    async fn fetch_remote(
        &self,
        username: &str,
        progress: &mut RemoteProgress,
    ) -> Result<(), GardenError> {
        let url = address::summary_address(&self.site, username)?;
        let resp = self.relay.fetch(&url).await?;
        progress.summary = Some(scrape::parse_summary_page(&resp.body, &self.strategy));

        for slug in StatusSlug::ALL {
            let items = self.fetch_status(username, slug).await?;
            progress.statuses.push(RawStatus {
                slug: Some(slug.as_str().to_string()),
                label: Some(slug.label().to_string()),
                items: Some(items),
            });
        }
        Ok(())
    }

    /// Follow listing pages until one has no next-page marker, adds nothing new, or the
    /// page cap is hit.
    async fn fetch_status(
        &self,
        username: &str,
        slug: StatusSlug,
    ) -> Result<Vec<RawItem>, GardenError> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for page in 1..=self.max_pages {
            let url = address::listing_address(&self.site, username, slug.remote_id(), page)?;
            let resp = self.relay.fetch(&url).await?;
            let parsed = scrape::parse_status_page(&resp.body, &self.strategy);

            let before = items.len();
            items.extend(
                parsed
                    .items
                    .into_iter()
                    .filter(|item| item.url.as_ref().is_none_or(|u| seen.insert(u.clone()))),
            );
            let added = items.len() - before;
            debug!(status = %slug, page, added, "fetched listing page");

            if added == 0 || !parsed.has_next {
                break;
            }
        }
        Ok(items)
    }

    fn assemble(&self, username: &str, summary: ProfileSummary, statuses: Vec<RawStatus>) -> Profile {
        let raw = RawProfile {
            username: Some(username.to_string()),
            avatar: summary.avatar,
            banner: summary.banner,
            bio: summary.bio,
            stats: Some(stats_to_raw(&summary.stats)),
            statuses: Some(statuses),
            last_updated: Some(chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()),
        };
        self.normalizer.normalize(&raw)
    }

    async fn fall_back(
        &self,
        username: &str,
        error: GardenError,
        progress: RemoteProgress,
    ) -> Result<Snapshot, GardenError> {
        warn!(
            error = %error,
            fetched_statuses = progress.statuses.len(),
            policy = ?self.policy,
            "remote load failed; falling back to sample"
        );

        let Some(sample) = self.sample.get_sample().await else {
            return Err(error);
        };

        match (self.policy, progress.summary) {
            (FallbackPolicy::MergeWithSample, Some(summary)) => {
                let mut statuses = progress.statuses;
                let fetched: HashSet<String> =
                    statuses.iter().filter_map(|s| s.slug.clone()).collect();
                statuses.extend(
                    sample
                        .statuses
                        .iter()
                        .filter(|s| !fetched.contains(s.slug.as_str()))
                        .map(RawStatus::from),
                );
                Ok(Snapshot {
                    profile: self.assemble(username, summary, statuses),
                    source: ProfileSource::Merged,
                    error: Some(error.to_string()),
                })
            }
            _ => Ok(Snapshot {
                profile: sample,
                source: ProfileSource::Sample,
                error: Some(error.to_string()),
            }),
        }
    }

    fn lock_phase(&self) -> MutexGuard<'_, LoadPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the `Loading` phase for one load and always leaves it on exit, including when the
/// load future is dropped half-way.
struct PhaseGuard<'a> {
    phase: &'a Mutex<LoadPhase>,
    outcome: Option<LoadPhase>,
}

impl<'a> PhaseGuard<'a> {
    fn begin(phase: &'a Mutex<LoadPhase>) -> Option<Self> {
        let mut current = phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == LoadPhase::Loading {
            return None;
        }
        *current = LoadPhase::Loading;
        Some(Self {
            phase,
            outcome: None,
        })
    }

    fn finish(&mut self, outcome: LoadPhase) {
        self.outcome = Some(outcome);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        let next = self.outcome.take().unwrap_or(LoadPhase::Idle);
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
