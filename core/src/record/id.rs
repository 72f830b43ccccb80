use uuid::Uuid;

/// Identifier for a record that arrived without one.
///
/// Records with a url always get the same id (UUID v5 in the DNS namespace),
/// so re-surveying a source merges instead of duplicating.
pub fn derive_record_id(url: Option<&str>) -> String {
    match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => Uuid::new_v5(&Uuid::NAMESPACE_DNS, url.as_bytes()).to_string(),
        None => Uuid::new_v4().to_string(),
    }
}
