use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

/// Страницы приложения; the active one is mirrored to `?page=` in the URL
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Catalog,
    AdminOrders,
    AdminBouquets,
    AdminCustomers,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Catalog => "Каталог",
            Page::AdminOrders => "Заказы",
            Page::AdminBouquets => "Букеты",
            Page::AdminCustomers => "Покупатели",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Catalog => "flower",
            Page::AdminOrders => "orders",
            Page::AdminBouquets => "flower",
            Page::AdminCustomers => "customers",
        }
    }

    pub fn is_admin(&self) -> bool {
        !matches!(self, Page::Catalog)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<Page>,
}

/// Page from a location search string; unknown values fall back to the catalog
pub fn page_from_search(search: &str) -> Page {
    serde_qs::from_str::<PageQuery>(search.trim_start_matches('?'))
        .ok()
        .and_then(|q| q.page)
        .unwrap_or_default()
}

/// `?page=...`, or an empty string for the catalog
pub fn search_for_page(page: Page) -> String {
    let query = PageQuery {
        page: page.is_admin().then_some(page),
    };
    match serde_qs::to_string(&query) {
        Ok(qs) if !qs.is_empty() => format!("?{}", qs),
        _ => String::new(),
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub page: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        self.page.set(page_from_search(&search));

        let this = *self;
        Effect::new(move |_| {
            let new_search = search_for_page(this.page.get());
            let Some(w) = window() else {
                return;
            };
            let location = w.location();
            let current_search = location.search().unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_search {
                let path = location.pathname().unwrap_or_default();
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&format!("{}{}", path, new_search)),
                    );
                }
            }
        });
    }

    pub fn navigate(&self, page: Page) {
        log::debug!("navigate: {:?}", page);
        self.page.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query() {
        assert_eq!(page_from_search(""), Page::Catalog);
        assert_eq!(page_from_search("?page=admin_orders"), Page::AdminOrders);
        assert_eq!(page_from_search("?page=admin_customers&x=1"), Page::AdminCustomers);
        assert_eq!(page_from_search("?page=unknown"), Page::Catalog);

        assert_eq!(search_for_page(Page::Catalog), "");
        assert_eq!(search_for_page(Page::AdminOrders), "?page=admin_orders");
        assert_eq!(page_from_search(&search_for_page(Page::AdminBouquets)), Page::AdminBouquets);
    }
}
