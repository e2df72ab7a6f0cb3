//! Handing finished exports to the user

use logo_core::ExportedFile;

/// Outcome of a delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Saved,
    /// The user closed the save dialog
    Dismissed,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("browser refused the download: {0}")]
    Browser(String),
}

/// Filter label and extension for the save dialog, `("PNG", "png")`
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn dialog_filter(filename: &str) -> Option<(String, &str)> {
    let (_, extension) = filename.rsplit_once('.')?;
    (!extension.is_empty()).then(|| (extension.to_uppercase(), extension))
}

/// Ask where to save the file and write it
#[cfg(not(target_arch = "wasm32"))]
pub fn deliver(file: &ExportedFile) -> Result<Delivery, DeliveryError> {
    let mut dialog = rfd::FileDialog::new().set_file_name(&file.filename);
    if let Some((label, extension)) = dialog_filter(&file.filename) {
        dialog = dialog.add_filter(label, &[extension]);
    }
    let Some(path) = dialog.save_file() else {
        return Ok(Delivery::Dismissed);
    };

    std::fs::write(&path, &file.bytes).map_err(|source| DeliveryError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("Saved {} ({} bytes) to {:?}", file.filename, file.bytes.len(), path);
    Ok(Delivery::Saved)
}

/// Object URL revoked when dropped, even if the click fails
#[cfg(target_arch = "wasm32")]
struct ObjectUrl(String);

#[cfg(target_arch = "wasm32")]
impl ObjectUrl {
    fn for_bytes(bytes: &[u8], mime: &str) -> Result<Self, DeliveryError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let properties = web_sys::BlobPropertyBag::new();
        properties.set_type(mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
            .map_err(browser_error)?;
        web_sys::Url::create_object_url_with_blob(&blob)
            .map(Self)
            .map_err(browser_error)
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_error(value: wasm_bindgen::JsValue) -> DeliveryError {
    DeliveryError::Browser(format!("{:?}", value))
}

/// Trigger a browser download of the file
#[cfg(target_arch = "wasm32")]
pub fn deliver(file: &ExportedFile) -> Result<Delivery, DeliveryError> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| DeliveryError::Browser("no document".into()))?;
    let url = ObjectUrl::for_bytes(&file.bytes, file.mime)?;

    let link: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(browser_error)?
        .dyn_into()
        .map_err(|element| browser_error(element.into()))?;
    link.set_href(&url.0);
    link.set_download(&file.filename);
    link.click();

    tracing::info!("Download of {} started", file.filename);
    Ok(Delivery::Saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_filter_from_extension() {
        assert_eq!(dialog_filter("brand-logo.png"), Some(("PNG".to_string(), "png")));
        assert_eq!(dialog_filter("clip.webm"), Some(("WEBM".to_string(), "webm")));
        assert_eq!(dialog_filter("noextension"), None);
        assert_eq!(dialog_filter("trailing."), None);
    }
}
