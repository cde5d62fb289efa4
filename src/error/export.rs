use thiserror::Error;

/// Failures while building a spreadsheet download.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to build the orders workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
