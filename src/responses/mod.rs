pub mod errors;
pub mod html;
pub mod json;
pub mod redirect;
pub mod xlsx;

pub use errors::error_response;
pub use html::html_response;
pub use json::json_response;
pub use redirect::redirect_response;
pub use xlsx::xlsx_response;

// Route handlers return this.
pub use crate::errors::ResultResp;
