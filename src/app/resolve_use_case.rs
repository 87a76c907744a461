use chrono::Utc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::app::ports::DocumentStore;
use crate::catalog::DemoCatalog;
use crate::config::{ClassifierRules, ResolverConfig};
use crate::domain::{
    CanonicalHotel, ResolutionOutcome, ResolutionResult, SourceCategory, SourceTag,
};
use crate::observability::metrics;
use crate::sources::curated_demo::CuratedDemoSource;
use crate::sources::external_place::ExternalPlaceSource;
use crate::sources::persistent_store::PersistentStoreSource;
use crate::sources::sub_entities::SubEntityFetcher;
use crate::sources::{contain, HotelSource, SubEntity};
use crate::synthesizer::synthesize;

/// Use case for turning an opaque hotel id into a fully assembled result.
///
/// Classification picks the first source; the store is the general
/// fallback, and the demo catalog is the last resort after a store miss.
/// `resolve` never fails: every error is folded into the returned result.
pub struct HotelResolver {
    rules: ClassifierRules,
    demo: Arc<dyn HotelSource>,
    external: Arc<dyn HotelSource>,
    persistent: Arc<dyn HotelSource>,
    sub_entities: SubEntityFetcher,
}

impl HotelResolver {
    /// Wire the standard sources over `store`, with the built-in demo catalog
    pub fn new(store: Arc<dyn DocumentStore>, config: ResolverConfig) -> Self {
        Self::with_catalog(store, config, DemoCatalog::builtin())
    }

    pub fn with_catalog(store: Arc<dyn DocumentStore>, config: ResolverConfig, catalog: Arc<DemoCatalog>) -> Self {
        let persistent = PersistentStoreSource::new(store.clone(), config.collections.clone());
        let sub_entities = SubEntityFetcher::new(store, config.collections, config.review_limit);
        Self {
            rules: config.classifier,
            demo: Arc::new(CuratedDemoSource::new(catalog)),
            external: Arc::new(ExternalPlaceSource::default()),
            persistent: Arc::new(persistent),
            sub_entities,
        }
    }

    /// Replace any of the three sources, e.g. with test doubles
    pub fn with_sources(
        mut self,
        demo: Option<Arc<dyn HotelSource>>,
        external: Option<Arc<dyn HotelSource>>,
        persistent: Option<Arc<dyn HotelSource>>,
    ) -> Self {
        if let Some(demo) = demo {
            self.demo = demo;
        }
        if let Some(external) = external {
            self.external = external;
        }
        if let Some(persistent) = persistent {
            self.persistent = persistent;
        }
        self
    }

    pub fn classify(&self, id: &str) -> SourceCategory {
        self.rules.classify(id)
    }

    /// Resolve `id` to exactly one terminal outcome
    #[instrument(skip(self))]
    pub async fn resolve(&self, id: &str) -> ResolutionResult {
        let result = self.run(id).await;
        metrics::resolution::completed(result.outcome.as_str(), result.source_tag.as_str());
        if result.used_fallback_source {
            metrics::resolution::fallback_used();
        }
        info!(
            outcome = result.outcome.as_str(),
            source = result.source_tag.as_str(),
            failed = result.failed,
            reviews = result.reviews.len(),
            packages = result.cross_sell_packages.len(),
            "Resolution finished"
        );
        result
    }

    /// Like [`resolve`](Self::resolve), but abandons in-flight work once
    /// `cancel` fires. Callers cancel superseded requests instead of
    /// ignoring their late results.
    pub async fn resolve_with_cancel(&self, id: &str, cancel: &CancellationToken) -> ResolutionResult {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(id, "Resolution cancelled");
                metrics::resolution::completed(ResolutionOutcome::Cancelled.as_str(), SourceTag::None.as_str());
                ResolutionResult::empty(ResolutionOutcome::Cancelled)
            }
            result = self.resolve(id) => result,
        }
    }

    async fn run(&self, id: &str) -> ResolutionResult {
        let category = self.rules.classify(id);
        debug!(?category, "Classified id");

        let mut demo_attempted = false;
        match category {
            SourceCategory::CuratedDemo => {
                demo_attempted = true;
                if let Some(entity) = self.try_demo(id).await {
                    return with_synthesized_reviews(entity, SourceTag::Demo, ResolutionOutcome::Demo);
                }
                debug!("Demo catalog missed, trying the store");
            }
            SourceCategory::ExternalPlace => {
                // The store never holds external place ids, so it is not consulted
                return match self.external.fetch(id).await {
                    Ok(Some(entity)) => {
                        with_synthesized_reviews(entity, SourceTag::External, ResolutionOutcome::External)
                    }
                    Ok(None) => ResolutionResult {
                        source_tag: SourceTag::External,
                        ..ResolutionResult::empty(ResolutionOutcome::NotFound)
                    },
                    Err(e) => {
                        error!(error = %e, "External source failed");
                        metrics::resolution::transport_failed(self.external.source_tag().as_str());
                        ResolutionResult {
                            source_tag: SourceTag::External,
                            ..ResolutionResult::empty(ResolutionOutcome::Failed)
                        }
                    }
                };
            }
            SourceCategory::PersistentRecord => {}
        }

        let transport_failed = match self.persistent.fetch(id).await {
            Ok(Some(entity)) => return self.assemble_persistent(id, entity).await,
            Ok(None) => false,
            Err(e) => {
                error!(error = %e, "Store lookup failed");
                metrics::resolution::transport_failed(self.persistent.source_tag().as_str());
                true
            }
        };

        // Last resort: demo ids that arrived in a record-key shape
        if !demo_attempted {
            if let Some(entity) = self.try_demo(id).await {
                let mut result =
                    with_synthesized_reviews(entity, SourceTag::Demo, ResolutionOutcome::PersistentMissFallback);
                result.used_fallback_source = true;
                return result;
            }
        }

        if transport_failed {
            ResolutionResult::empty(ResolutionOutcome::Failed)
        } else {
            ResolutionResult::empty(ResolutionOutcome::NotFound)
        }
    }

    async fn try_demo(&self, id: &str) -> Option<CanonicalHotel> {
        match self.demo.fetch(id).await {
            Ok(entity) => entity,
            Err(e) => {
                warn!(error = %e, "Demo source failed");
                None
            }
        }
    }

    async fn assemble_persistent(&self, id: &str, entity: CanonicalHotel) -> ResolutionResult {
        let (reviews, packages) = tokio::join!(
            self.sub_entities.fetch_reviews(id),
            self.sub_entities.fetch_cross_sell(id),
        );
        ResolutionResult {
            entity: Some(entity),
            reviews: contain(SubEntity::Reviews, id, reviews),
            cross_sell_packages: contain(SubEntity::CrossSell, id, packages),
            source_tag: SourceTag::Persistent,
            failed: false,
            used_fallback_source: false,
            outcome: ResolutionOutcome::PersistentHit,
        }
    }
}

fn with_synthesized_reviews(entity: CanonicalHotel, source_tag: SourceTag, outcome: ResolutionOutcome) -> ResolutionResult {
    let reviews = synthesize(&entity.id, &entity.name, Utc::now());
    metrics::resolution::reviews_synthesized(reviews.len());
    ResolutionResult {
        entity: Some(entity),
        reviews,
        cross_sell_packages: Vec::new(),
        source_tag,
        failed: false,
        used_fallback_source: false,
        outcome,
    }
}
