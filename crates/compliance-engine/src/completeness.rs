//! Required-document completeness checking
//!
//! Uploaded file names rarely match checklist labels exactly, so a checklist
//! entry counts as present when any uploaded display name contains it as a
//! case-insensitive substring. Callers needing stricter matching must supply
//! stricter names.

/// Checklist entries with no matching upload, in checklist order.
pub fn find_missing(uploaded_names: &[&str], required: &[String]) -> Vec<String> {
    let uploaded_lower: Vec<String> = uploaded_names.iter().map(|n| n.to_lowercase()).collect();

    required
        .iter()
        .filter(|req| {
            let req_lower = req.to_lowercase();
            !uploaded_lower.iter().any(|name| name.contains(&req_lower))
        })
        .cloned()
        .collect()
}
