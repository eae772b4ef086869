use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::request::PageWindow;

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub total_pages: i32,
}

impl Pagination {
    pub fn new(window: PageWindow, total_items: i64) -> Self {
        Self {
            page: window.page,
            page_size: window.limit,
            total_items,
            total_pages: window.total_pages(total_items),
        }
    }
}
