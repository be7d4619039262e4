pub mod bill;
pub mod reserved;

pub use bill::{Bill, EmissionRow, ExtractedFields};
pub use reserved::{ExtractedInvoice, LpgRecord, PdfDocument};
