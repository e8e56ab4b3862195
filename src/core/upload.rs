//! Spreadsheet upload validation.
//!
//! The dashboard imports a sales and a stock spreadsheet. Both are checked
//! here before anything is sent: a file passes when either its extension or
//! its declared MIME type says CSV or Excel.

use crate::errors::{Error, Result};
use std::path::Path;

/// Accepted file name extensions, lower-case.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".csv", ".xls", ".xlsx"];

/// Accepted MIME types.
pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "text/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name without directories
    pub file_name: String,
    /// MIME type declared by whoever picked the file, if known
    pub content_type: Option<String>,
    /// Raw file bytes
    pub contents: Vec<u8>,
}

impl UploadFile {
    /// Reads a file from disk. The MIME type is left undeclared.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or has no file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidUpload {
                message: format!("{} is not a file", path.display()),
            })?;
        let contents = std::fs::read(path)?;
        Ok(Self {
            file_name,
            content_type: None,
            contents,
        })
    }

    /// Whether the extension or the declared MIME type is a spreadsheet format.
    #[must_use]
    pub fn is_spreadsheet(&self) -> bool {
        let name = self.file_name.to_lowercase();
        let extension_ok = ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
        let type_ok = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ALLOWED_MIME_TYPES.contains(&ct));
        extension_ok || type_ok
    }
}

/// The two spreadsheets the backend processes together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPair {
    /// Sales history (`vendas` part)
    pub sales: UploadFile,
    /// Current stock (`estoque` part)
    pub stock: UploadFile,
}

fn validate_file(file: &UploadFile, field_label: &str) -> Result<()> {
    if file.is_spreadsheet() {
        Ok(())
    } else {
        Err(Error::InvalidUpload {
            message: format!("O arquivo de {field_label} deve ser CSV ou Excel (.xls, .xlsx)."),
        })
    }
}

/// Checks that both files were picked and both are spreadsheets.
///
/// # Errors
/// Returns [`Error::InvalidUpload`] naming the first missing or rejected file.
pub fn validate_upload(sales: Option<UploadFile>, stock: Option<UploadFile>) -> Result<UploadPair> {
    let (Some(sales), Some(stock)) = (sales, stock) else {
        return Err(Error::InvalidUpload {
            message: "Por favor, selecione os dois arquivos (vendas e estoque).".to_string(),
        });
    };

    validate_file(&sales, "VENDAS")?;
    validate_file(&stock, "ESTOQUE")?;
    tracing::debug!(
        "Upload accepted: {} + {}",
        sales.file_name,
        stock.file_name
    );
    Ok(UploadPair { sales, stock })
}
