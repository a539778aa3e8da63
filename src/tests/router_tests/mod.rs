mod api_tests;
mod export_tests;
mod page_tests;
