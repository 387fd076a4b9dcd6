use url::Url;

/// Validate a required text field: must not be blank.
pub fn validate_required(value: &str, field_name: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{field_name} is required"));
    }
    None
}

/// Validate an image URL. Any absolute URL the parser accepts is fine,
/// whatever its scheme.
pub fn validate_image_url(value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(_) => None,
        Err(e) => Some(format!("Image URL is not a valid URL: {e}")),
    }
}

/// Validate a slide position.
pub fn validate_order_index(value: i32) -> Option<String> {
    if value < 0 {
        return Some("Order index must be a non-negative integer".to_string());
    }
    None
}
