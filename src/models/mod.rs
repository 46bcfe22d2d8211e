pub mod invoice;
pub mod state;

pub use invoice::{InvoiceChanges, InvoiceStatus, NewInvoice};
pub use state::{ActionOutcome, ActionState, FieldErrors};
