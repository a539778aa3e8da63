mod models;
mod scraper;
mod scraper_error;

pub use models::InventoryPage;
pub use scraper::{collect_all_pages, run_inventory_scrape, InventoryScraper, PageSource, RetryPolicy};
pub use scraper_error::ScraperError;
