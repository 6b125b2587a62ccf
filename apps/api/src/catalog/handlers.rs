use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{categories, filter, page_buttons, paginate, PageButton, Window};
use crate::registry::TemplateMeta;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    #[serde(flatten)]
    pub window: Window<TemplateMeta>,
    pub categories: Vec<String>,
    pub page_buttons: Vec<PageButton>,
}

/// GET /api/v1/templates?category=&q=&page=&page_size=
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Json<CatalogResponse> {
    let all = state.registry.list();
    let subset: Vec<TemplateMeta> = filter(
        &all,
        params.category.as_deref().unwrap_or(""),
        params.q.as_deref().unwrap_or(""),
    )
    .into_iter()
    .cloned()
    .collect();

    let page_size = params.page_size.unwrap_or(state.config.catalog_page_size);
    let window = paginate(&subset, page_size, params.page.unwrap_or(1));
    let buttons = page_buttons(window.total_pages, window.page);
    tracing::debug!(
        matched = window.total_items,
        page = window.page,
        "Catalog query"
    );

    Json(CatalogResponse {
        window,
        categories: categories(&all),
        page_buttons: buttons,
    })
}
