use shavukha_common::error::CatalogError;
use shavukha_common::product::Catalog;

use crate::api::ShopApi;

/// Fetch the catalog into `catalog`. On failure the error is logged and the
/// previous catalog stays on screen.
pub async fn load_catalog<A: ShopApi>(api: &A, catalog: &mut Catalog) -> Result<(), CatalogError> {
    let result = api.fetch_catalog().await;
    apply_catalog_result(catalog, result)
}

/// Store a fetch result, for callers that cannot hold the catalog across the
/// request (reactive UI state).
pub fn apply_catalog_result(
    catalog: &mut Catalog,
    result: Result<Catalog, CatalogError>,
) -> Result<(), CatalogError> {
    match result {
        Ok(fresh) => {
            tracing::debug!("Received products: {:?}", fresh.section_counts());
            *catalog = fresh;
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error fetching products: {e}");
            Err(e)
        }
    }
}
