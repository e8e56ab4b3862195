//! Catalog view - orchestrates fetch, store, filter and render.
//!
//! ```text
//! Loading ──ok──▶ Loaded ──control change──▶ Filtered ◀─┐
//!    │                                          └───────┘
//!    └──first load fails──▶ Error
//! ```
//!
//! Filtering and clearing never re-fetch; they re-read the store's current
//! snapshot. A failed reload keeps the previous snapshot on screen.

use crate::api::CatalogApi;
use crate::core::filter::{self, FilterCriteria};
use crate::core::store::{CatalogStore, LoadOutcome};
use crate::errors::{FetchError, Result};
use crate::render::{CatalogRenderer, CatalogSurface, HtmlSurface, LOAD_ERROR_MESSAGE};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Lifecycle state of the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting for the first catalog load
    Loading,
    /// Showing the full snapshot right after a load
    Loaded,
    /// Showing the snapshot narrowed by the current criteria
    Filtered,
    /// The first load failed; the table shows the error row
    Error,
}

/// The stock table with its filter controls and counters.
#[derive(Debug)]
pub struct CatalogView<A, S = HtmlSurface> {
    api: A,
    store: Arc<CatalogStore>,
    renderer: CatalogRenderer,
    surface: S,
    criteria: FilterCriteria,
    categories: Vec<String>,
    state: ViewState,
    last_error: Option<String>,
}

impl<A: CatalogApi, S: CatalogSurface> CatalogView<A, S> {
    /// Creates a view over an injected store. Nothing is fetched until
    /// [`initialize`](Self::initialize).
    pub fn new(api: A, store: Arc<CatalogStore>, renderer: CatalogRenderer, surface: S) -> Self {
        Self {
            api,
            store,
            renderer,
            surface,
            criteria: FilterCriteria::default(),
            categories: Vec::new(),
            state: ViewState::Loading,
            last_error: None,
        }
    }

    /// Loads the catalog and the category list concurrently and renders both.
    ///
    /// Fetch failures are handled here: a catalog failure shows the error row,
    /// a category failure leaves only the default category option.
    ///
    /// # Errors
    /// Returns an error only if rendering fails.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> Result<()> {
        self.state = ViewState::Loading;
        let store = Arc::clone(&self.store);
        let (catalog, categories) =
            tokio::join!(store.load(&self.api), self.api.fetch_categories());

        self.categories = categories.unwrap_or_else(|e| {
            warn!("Category list unavailable, keeping default option only: {}", e);
            Vec::new()
        });
        self.renderer
            .render_categories(&mut self.surface, &self.categories, &self.criteria.category)?;

        self.handle_load(catalog).await
    }

    /// Re-fetches the catalog. On failure the previous snapshot stays on screen.
    ///
    /// # Errors
    /// Returns an error only if rendering fails.
    #[instrument(skip(self))]
    pub async fn reload(&mut self) -> Result<()> {
        if self.state == ViewState::Error {
            self.state = ViewState::Loading;
        }
        let outcome = self.store.load(&self.api).await;
        self.handle_load(outcome).await
    }

    /// Replaces the criteria and re-renders from the current snapshot.
    ///
    /// # Errors
    /// Returns an error only if rendering fails.
    pub async fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<()> {
        self.criteria = criteria;
        if matches!(self.state, ViewState::Loading | ViewState::Error) {
            debug!("No catalog snapshot yet; filters will apply after the next load");
            return Ok(());
        }
        self.state = ViewState::Filtered;
        self.refresh().await
    }

    /// Resets every criterion and re-renders the full snapshot without fetching.
    ///
    /// # Errors
    /// Returns an error only if rendering fails.
    pub async fn clear_filters(&mut self) -> Result<()> {
        self.apply_filters(FilterCriteria::default()).await?;
        self.renderer
            .render_categories(&mut self.surface, &self.categories, "")
    }

    async fn handle_load(
        &mut self,
        outcome: std::result::Result<LoadOutcome, FetchError>,
    ) -> Result<()> {
        match outcome {
            Ok(LoadOutcome::Applied(snapshot)) => {
                self.last_error = None;
                if self.state != ViewState::Filtered {
                    self.state = ViewState::Loaded;
                }
                info!("Catalog view showing snapshot #{}", snapshot.token);
                self.refresh().await
            }
            Ok(LoadOutcome::Superseded { token, latest }) => {
                debug!("Load #{} superseded by #{}", token, latest);
                // The newer load may belong to another holder of the store.
                if !self.store.has_snapshot().await {
                    return Ok(());
                }
                if matches!(self.state, ViewState::Loading | ViewState::Error) {
                    self.state = ViewState::Loaded;
                }
                self.last_error = None;
                self.refresh().await
            }
            Err(e) => self.handle_load_failure(&e).await,
        }
    }

    async fn handle_load_failure(&mut self, error: &FetchError) -> Result<()> {
        self.last_error = Some(error.to_string());

        if self.store.has_snapshot().await {
            warn!("Catalog reload failed, keeping previous snapshot: {}", error);
            return self.refresh().await;
        }

        warn!("Initial catalog load failed: {}", error);
        self.state = ViewState::Error;
        self.renderer.render_error(&mut self.surface, LOAD_ERROR_MESSAGE)
    }

    async fn refresh(&mut self) -> Result<()> {
        let snapshot = self.store.current().await;
        let shown = filter::apply(&snapshot.records, &self.criteria);
        debug!(
            "Rendering {} of {} catalog records",
            shown.len(),
            snapshot.len()
        );
        self.renderer.render(&mut self.surface, &shown)?;
        self.renderer
            .render_summary(&mut self.surface, shown.len(), snapshot.len());
        Ok(())
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// Criteria currently applied.
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Categories offered by the category control.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Message of the most recent failed load, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The surface the view renders into.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The store backing this view.
    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }
}

impl<A: CatalogApi> CatalogView<A, HtmlSurface> {
    /// Renders the whole catalog page from the current fragments.
    ///
    /// # Errors
    /// Returns an error if the page template fails to render.
    pub async fn page(&self) -> Result<String> {
        let loaded_at = self.store.current().await.loaded_at;
        self.renderer
            .catalog_page(&self.surface, &self.criteria, loaded_at)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::filter::QuantityBand;
    use crate::test_utils::{
        FakeBackend, coffee_scenario, init_test_tracing, sample_catalog, test_record,
    };

    fn view_over(backend: FakeBackend) -> CatalogView<FakeBackend> {
        CatalogView::new(
            backend,
            Arc::new(CatalogStore::new()),
            CatalogRenderer::new("R$").unwrap(),
            HtmlSurface::default(),
        )
    }

    #[tokio::test]
    async fn test_initialize_renders_full_catalog_and_categories() -> Result<()> {
        init_test_tracing();
        let catalog = sample_catalog();
        let mut view = view_over(FakeBackend::with_catalog(catalog.clone()));
        assert_eq!(view.state(), ViewState::Loading);

        view.initialize().await?;

        assert_eq!(view.state(), ViewState::Loaded);
        assert_eq!(view.surface().row_count(), catalog.len());
        assert_eq!(view.surface().filtered_count, Some(catalog.len()));
        assert_eq!(view.surface().total_count, Some(catalog.len()));
        assert_eq!(view.categories().len(), 3);
        assert!(view.surface().category_options.contains("Bebidas"));
        assert_eq!(view.api.catalog_calls(), 1);
        assert_eq!(view.api.category_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_initial_failure_shows_error_row_and_leaves_counters_unset() -> Result<()> {
        init_test_tracing();
        let backend = FakeBackend::with_catalog(sample_catalog());
        backend.fail_catalog_with_status(500);
        let mut view = view_over(backend);

        view.initialize().await?;

        assert_eq!(view.state(), ViewState::Error);
        assert_eq!(view.surface().row_count(), 1);
        assert!(view.surface().table_body.contains(LOAD_ERROR_MESSAGE));
        assert!(view.surface().table_body.contains(r#"colspan="10""#));
        assert_eq!(view.surface().filtered_count, None);
        assert_eq!(view.surface().total_count, None);
        assert!(view.last_error().unwrap().contains("500"));

        // Filtering without a snapshot keeps the error row.
        view.apply_filters(FilterCriteria {
            name_query: "cafe".to_string(),
            ..FilterCriteria::default()
        })
        .await?;
        assert_eq!(view.state(), ViewState::Error);
        assert!(view.surface().table_body.contains(LOAD_ERROR_MESSAGE));
        Ok(())
    }

    #[tokio::test]
    async fn test_category_failure_does_not_block_catalog() -> Result<()> {
        let backend = FakeBackend::with_catalog(sample_catalog());
        backend.fail_categories_with_status(404);
        let mut view = view_over(backend);

        view.initialize().await?;

        assert_eq!(view.state(), ViewState::Loaded);
        assert_eq!(view.surface().row_count(), sample_catalog().len());
        assert!(view.categories().is_empty());
        assert_eq!(view.surface().category_options.matches("<option").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_filtering_never_refetches() -> Result<()> {
        let mut view = view_over(FakeBackend::with_catalog(coffee_scenario()));
        view.initialize().await?;

        view.apply_filters(FilterCriteria {
            name_query: "cafe".to_string(),
            ..FilterCriteria::default()
        })
        .await?;
        assert_eq!(view.state(), ViewState::Filtered);
        assert_eq!(view.surface().row_count(), 2);
        assert_eq!(view.surface().filtered_count, Some(2));
        assert_eq!(view.surface().total_count, Some(3));

        view.apply_filters(FilterCriteria {
            quantity_band: QuantityBand::High,
            ..FilterCriteria::default()
        })
        .await?;
        assert_eq!(view.surface().row_count(), 1);
        assert!(view.surface().table_body.contains("Açúcar"));

        assert_eq!(view.api.catalog_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_no_matches_shows_zero_of_total() -> Result<()> {
        let mut view = view_over(FakeBackend::with_catalog(coffee_scenario()));
        view.initialize().await?;

        view.apply_filters(FilterCriteria {
            name_query: "parafuso".to_string(),
            ..FilterCriteria::default()
        })
        .await?;

        assert_eq!(view.surface().row_count(), 0);
        assert!(view.surface().table_body.trim().is_empty());
        assert_eq!(view.surface().filtered_count, Some(0));
        assert_eq!(view.surface().total_count, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_filters_restores_full_set_without_fetch() -> Result<()> {
        let mut view = view_over(FakeBackend::with_catalog(sample_catalog()));
        view.initialize().await?;
        view.apply_filters(FilterCriteria {
            category: "Bebidas".to_string(),
            quantity_band: QuantityBand::Low,
            ..FilterCriteria::default()
        })
        .await?;
        assert!(view.surface().row_count() < sample_catalog().len());

        view.clear_filters().await?;

        assert_eq!(view.state(), ViewState::Filtered);
        assert!(view.criteria().is_empty());
        assert_eq!(view.surface().row_count(), sample_catalog().len());
        assert!(!view.surface().category_options.contains(" selected"));
        assert_eq!(view.api.catalog_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() -> Result<()> {
        init_test_tracing();
        let mut view = view_over(FakeBackend::with_catalog(sample_catalog()));
        view.initialize().await?;
        view.apply_filters(FilterCriteria {
            quantity_band: QuantityBand::Medium,
            ..FilterCriteria::default()
        })
        .await?;
        let shown_before = view.surface().row_count();

        view.api.fail_catalog_with_status(503);
        view.reload().await?;

        assert_eq!(view.state(), ViewState::Filtered);
        assert_eq!(view.surface().row_count(), shown_before);
        assert_eq!(view.surface().total_count, Some(sample_catalog().len()));
        assert!(view.last_error().is_some());
        assert_eq!(view.api.catalog_calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_reload_after_initial_failure_recovers() -> Result<()> {
        let backend = FakeBackend::with_catalog(coffee_scenario());
        backend.fail_catalog_with_status(502);
        let mut view = view_over(backend);
        view.initialize().await?;
        assert_eq!(view.state(), ViewState::Error);

        view.api.set_catalog(coffee_scenario());
        view.reload().await?;

        assert_eq!(view.state(), ViewState::Loaded);
        assert_eq!(view.surface().row_count(), 3);
        assert!(view.last_error().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_superseded_load_renders_snapshot_from_shared_store() -> Result<()> {
        init_test_tracing();
        let store = Arc::new(CatalogStore::new());
        let slow = FakeBackend::with_catalog(vec![test_record(1, "Antigo", 5)]);
        let gate = slow.hold_catalog();
        let mut stale_view = CatalogView::new(
            slow,
            Arc::clone(&store),
            CatalogRenderer::new("R$").unwrap(),
            HtmlSurface::default(),
        );
        let mut fresh_view = CatalogView::new(
            FakeBackend::with_catalog(vec![test_record(2, "Novo", 50), test_record(3, "Sal", 8)]),
            Arc::clone(&store),
            CatalogRenderer::new("R$").unwrap(),
            HtmlSurface::default(),
        );

        let (stale, fresh) = tokio::join!(stale_view.reload(), async {
            let outcome = fresh_view.reload().await;
            gate.release();
            outcome
        });
        stale?;
        fresh?;

        assert_eq!(stale_view.state(), ViewState::Loaded);
        assert_eq!(stale_view.surface().row_count(), 2);
        assert!(stale_view.surface().table_body.contains("Novo"));
        assert!(!stale_view.surface().table_body.contains("Antigo"));
        assert_eq!(stale_view.surface().total_count, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_page_reflects_view() -> Result<()> {
        let mut view = view_over(FakeBackend::with_catalog(coffee_scenario()));
        view.initialize().await?;
        view.apply_filters(FilterCriteria {
            name_query: "açúcar".to_string(),
            ..FilterCriteria::default()
        })
        .await?;

        let page = view.page().await?;
        assert!(page.contains(r#"<span id="contagemFiltrada">1</span>"#));
        assert!(page.contains(r#"<span id="contagemTotal">3</span>"#));
        assert!(page.contains("Atualizado em"));
        Ok(())
    }
}
