pub mod actions;
pub mod cache;
pub mod validation;

pub use actions::{authenticate, InvoiceActions, INVOICES_PATH};
pub use cache::RouteCache;
pub use validation::{validate_invoice_form, InvoiceFields, InvoiceForm};
