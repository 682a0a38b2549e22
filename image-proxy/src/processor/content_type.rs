use mime::Mime;

/// Content type advertised for an object, derived from its key's extension
///
/// The re-encoded bytes always keep the source format, so the extension is
/// trusted even when it disagrees with the actual content. Unknown or missing
/// extensions map to `application/octet-stream`.
#[must_use]
pub fn content_type_for_key(key: &str) -> Mime {
    let file_name = key.rsplit('/').next().unwrap_or(key);

    file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| mime_for_extension(&ext.to_ascii_lowercase()))
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

fn mime_for_extension(extension: &str) -> Option<Mime> {
    let essence = match extension {
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "css" => "text/css; charset=utf-8",
        "gif" => "image/gif",
        "htm" | "html" => "text/html; charset=utf-8",
        "ico" => "image/vnd.microsoft.icon",
        "jpe" | "jpeg" | "jpg" => "image/jpeg",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "wasm" => "application/wasm",
        "webp" => "image/webp",
        "xml" => "text/xml; charset=utf-8",
        _ => return None,
    };

    essence.parse().ok()
}
