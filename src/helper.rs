use std::{fs, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, error, trace};

use crate::{
    to_display_distance, to_display_temp, DistanceUnit, LogbookError, Result, TempUnit,
};

/// Formats a number the way a form field shows it: no trailing `.0`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Formats a stored meter value in the display unit, e.g. `98.4ft`.
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    format!(
        "{}{}",
        format_number(to_display_distance(meters, unit)),
        unit.symbol()
    )
}

/// Formats a stored Celsius value in the display unit, e.g. `75.2°F`.
pub fn format_temp(celsius: f64, unit: TempUnit) -> String {
    format!(
        "{}{}",
        format_number(to_display_temp(celsius, unit)),
        unit.symbol()
    )
}

fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Reads an image file and embeds it as a `data:` URL.
pub fn encode_photo(path: &Path) -> Result<String> {
    debug!("Encoding photo: {}", path.display());
    if !path.is_file() {
        return Err(LogbookError::FileNotFound {
            file_path: path.display().to_string(),
        });
    }

    let mime = mime_for_extension(path).ok_or_else(|| {
        LogbookError::invalid(
            "photos",
            path.display().to_string(),
            "not a supported image type",
        )
    })?;

    let bytes = fs::read(path).map_err(|e| {
        error!("Failed to read photo {}: {}", path.display(), e);
        LogbookError::Io(e)
    })?;
    trace!("Read {} bytes of {}", bytes.len(), mime);

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Encodes several photo files, preserving their order.
pub fn encode_photos<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>> {
    paths.iter().map(|p| encode_photo(p.as_ref())).collect()
}

/// Media type and decoded size of an embedded photo, if it is a well-formed
/// base64 data URL.
pub fn describe_photo(data_url: &str) -> Option<(String, usize)> {
    let rest = data_url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes.len()))
}
