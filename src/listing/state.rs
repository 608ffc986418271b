//! Product listing view model.
//!
//! Holds what the product grid needs: the full catalog, the category list,
//! the active filters and the derived list actually shown. The displayed
//! list is recomputed on every change to the products or the filters.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogError, Product};
use crate::filter::{apply_filters, FilterSpec};
use crate::schedule::Debouncer;
use crate::toast::{ToastNotifier, ToastSpec};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again.";
pub const LOAD_FAILED_TOAST: &str = "Failed to load products";

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ListingStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

#[derive(Debug, Default)]
struct ListingState {
    status: ListingStatus,
    products: Vec<Product>,
    categories: Vec<String>,
    filters: FilterSpec,
    /// Raw search box contents; lags into `filters.search_query` after the debounce.
    search_input: String,
    displayed: Vec<Product>,
}

impl ListingState {
    fn refresh(&mut self) {
        self.displayed = apply_filters(&self.products, &self.filters);
    }
}

/// Restores the status a load started from if the load is dropped before
/// the catalog answers.
struct LoadGuard<'a> {
    state: &'a watch::Sender<ListingState>,
    previous: Option<ListingStatus>,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        debug!(status = ?previous, "listing load abandoned");
        self.state.send_if_modified(|state| {
            if state.status != ListingStatus::Loading {
                return false;
            }
            state.status = previous;
            true
        });
    }
}

/// Snapshot of the listing as rendered
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub status: ListingStatus,
    pub categories: Vec<String>,
    pub filters: FilterSpec,
    pub search_input: String,
    pub count: usize,
    pub products: Vec<Product>,
}

#[derive(Debug)]
pub struct ProductListing {
    state: Arc<watch::Sender<ListingState>>,
    search: Debouncer,
}

impl ProductListing {
    pub fn new(search_debounce: Duration) -> Self {
        let (state, _) = watch::channel(ListingState::default());
        Self {
            state: Arc::new(state),
            search: Debouncer::new(search_debounce),
        }
    }

    /// Fetches products and categories concurrently and rebuilds the grid.
    ///
    /// On failure nothing fetched is kept, the status carries a user-facing
    /// message and an error toast is raised.
    pub async fn load(
        &self,
        catalog: &impl Catalog,
        toasts: &ToastNotifier,
    ) -> Result<(), CatalogError> {
        let mut previous = ListingStatus::Loading;
        self.state
            .send_modify(|state| std::mem::swap(&mut state.status, &mut previous));
        let mut guard = LoadGuard {
            state: &self.state,
            previous: Some(previous),
        };

        let fetched = tokio::try_join!(catalog.list_products(), catalog.list_categories());
        guard.previous = None;

        match fetched {
            Ok((products, categories)) => {
                debug!(
                    n_products = products.len(),
                    n_categories = categories.len(),
                    "listing loaded"
                );
                self.state.send_modify(|state| {
                    state.products = products;
                    state.categories = categories;
                    state.status = ListingStatus::Ready;
                    state.refresh();
                });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load listing");
                self.state.send_modify(|state| {
                    state.status = ListingStatus::Failed {
                        message: LOAD_FAILED_MESSAGE.to_string(),
                    };
                });
                toasts.add_toast(ToastSpec::error(LOAD_FAILED_TOAST));
                Err(err)
            }
        }
    }

    /// Replaces every filter at once, including the search query.
    ///
    /// A pending debounced search is dropped so it cannot overwrite the new
    /// query later.
    pub fn set_filters(&self, filters: FilterSpec) {
        self.search.cancel();
        self.state.send_modify(|state| {
            state.search_input = filters.search_query.clone();
            state.filters = filters;
            state.refresh();
        });
    }

    /// Resets every filter to its default.
    pub fn clear_filters(&self) {
        self.set_filters(FilterSpec::default());
    }

    pub fn toggle_category(&self, category: &str, checked: bool) {
        self.state.send_modify(|state| {
            state.filters.toggle_category(category, checked);
            state.refresh();
        });
    }

    /// Records search box input and applies it once typing pauses.
    pub fn set_search_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.state
            .send_modify(|state| state.search_input = input.clone());

        let state = Arc::downgrade(&self.state);
        self.search.schedule(async move {
            if let Some(state) = state.upgrade() {
                debug!(query = %input, "applying search");
                state.send_modify(|state| {
                    state.filters.search_query = input;
                    state.refresh();
                });
            }
        });
    }

    /// True while a search input is waiting for the debounce to elapse.
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn filters(&self) -> FilterSpec {
        self.state.borrow().filters.clone()
    }

    pub fn displayed(&self) -> Vec<Product> {
        self.state.borrow().displayed.clone()
    }

    pub fn view(&self) -> ListingView {
        let state = self.state.borrow();
        ListingView {
            status: state.status.clone(),
            categories: state.categories.clone(),
            filters: state.filters.clone(),
            search_input: state.search_input.clone(),
            count: state.displayed.len(),
            products: state.displayed.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::catalog::fake::{product, FakeCatalog};
    use crate::filter::SortMode;
    use crate::toast::ToastVariant;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn catalog() -> FakeCatalog {
        FakeCatalog::new(vec![
            product(1, "Blue Shirt", 25.0, "men's clothing"),
            product(2, "Gold Ring", 160.0, "jewelery"),
            product(3, "SHIRTS Inc Tee", 9.5, "men's clothing"),
            product(4, "Monitor", 599.0, "electronics"),
        ])
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    fn toasts() -> ToastNotifier {
        ToastNotifier::new(Duration::from_millis(4000))
    }

    #[tokio::test]
    async fn load_populates_products_and_categories() {
        let listing = ProductListing::new(DEBOUNCE);
        let catalog = catalog();
        listing.load(&catalog, &toasts()).await.unwrap();

        let view = listing.view();
        assert_eq!(view.status, ListingStatus::Ready);
        assert_eq!(view.count, 4);
        assert_eq!(ids(&view.products), vec![1, 2, 3, 4]);
        assert_eq!(
            view.categories,
            vec!["men's clothing", "jewelery", "electronics"]
        );
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_reports_and_raises_a_toast() {
        let listing = ProductListing::new(DEBOUNCE);
        let toasts = toasts();

        let err = listing.load(&FakeCatalog::failing(), &toasts).await;
        assert!(err.is_err());

        let view = listing.view();
        assert_eq!(
            view.status,
            ListingStatus::Failed {
                message: LOAD_FAILED_MESSAGE.to_string()
            }
        );
        assert!(view.products.is_empty());

        let raised = toasts.toasts();
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].title, LOAD_FAILED_TOAST);
        assert_eq!(raised[0].variant, ToastVariant::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_load_restores_the_previous_status() {
        let listing = ProductListing::new(DEBOUNCE);
        let slow = FakeCatalog {
            latency: Duration::from_secs(5),
            ..catalog()
        };

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), listing.load(&slow, &toasts())).await;
        assert!(abandoned.is_err());
        assert_eq!(listing.view().status, ListingStatus::Idle);

        listing.load(&slow, &toasts()).await.unwrap();
        assert_eq!(listing.view().status, ListingStatus::Ready);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), listing.load(&slow, &toasts())).await;
        assert!(abandoned.is_err());
        let view = listing.view();
        assert_eq!(view.status, ListingStatus::Ready);
        assert_eq!(view.count, 4);
    }

    #[tokio::test]
    async fn filters_recompute_the_grid() {
        let listing = ProductListing::new(DEBOUNCE);
        listing.load(&catalog(), &toasts()).await.unwrap();

        listing.toggle_category("men's clothing", true);
        assert_eq!(ids(&listing.displayed()), vec![1, 3]);

        listing.set_filters(FilterSpec {
            max_price: 200.0,
            sort_by: SortMode::PriceDesc,
            ..Default::default()
        });
        assert_eq!(ids(&listing.displayed()), vec![2, 1, 3]);

        listing.clear_filters();
        assert_eq!(ids(&listing.displayed()), vec![1, 2, 3, 4]);
        assert_eq!(listing.filters(), FilterSpec::default());
    }

    #[tokio::test(start_paused = true)]
    async fn search_applies_after_typing_pauses() {
        let listing = ProductListing::new(DEBOUNCE);
        listing.load(&catalog(), &toasts()).await.unwrap();

        listing.set_search_input("s");
        tokio::time::sleep(Duration::from_millis(100)).await;
        listing.set_search_input("shirt");

        assert_eq!(listing.view().search_input, "shirt");
        assert_eq!(listing.filters().search_query, "");
        assert!(listing.search_pending());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(listing.filters().search_query, "");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(listing.filters().search_query, "shirt");
        assert_eq!(ids(&listing.displayed()), vec![1, 3]);
        assert!(!listing.search_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_filters_drops_a_pending_search() {
        let listing = ProductListing::new(DEBOUNCE);
        listing.load(&catalog(), &toasts()).await.unwrap();

        listing.set_search_input("ring");
        listing.clear_filters();
        tokio::time::sleep(Duration::from_millis(500)).await;

        let view = listing.view();
        assert_eq!(view.search_input, "");
        assert_eq!(view.filters.search_query, "");
        assert_eq!(view.count, 4);
    }
}
