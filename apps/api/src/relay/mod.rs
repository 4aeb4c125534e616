// Upload/relay layer: takes the PDFs from the caller, hands them to the
// document service one step at a time and returns normalized results.

pub mod handlers;
pub mod upload;
