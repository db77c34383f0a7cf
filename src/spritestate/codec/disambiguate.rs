//! Recover `(item, variant)` from a `Name_variant` hash value.
//!
//! Names and variants both use `_` as a separator, so a value like `Human_female_light` can
//! be read several ways. The search tries every split point from the left, shortest name
//! first, and takes the first split where some item of the group matches both the name and
//! (if the item declares variants) the variant. That order is the tie-break.

use crate::catalog::ItemMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub item_id: &'a str,
    pub meta: &'a ItemMetadata,
    /// The variant as spelled in the catalog. `None` for items without variants.
    pub variant: Option<&'a str>,
}

/// Find the item of `type_name` that `raw` names.
///
/// `candidates` is scanned in order for every split point; items whose `type_name` is not
/// `type_name` are skipped, so passing the whole catalog is allowed.
pub fn disambiguate<'a>(
    type_name: &str,
    raw: &str,
    candidates: &[(&'a str, &'a ItemMetadata)],
) -> Option<Match<'a>> {
    let parts: Vec<&str> = raw.split('_').collect();

    for split in 1..=parts.len() {
        let name = parts[..split].join("_").to_lowercase();
        let variant = parts[split..].join("_").to_lowercase();

        for &(item_id, meta) in candidates {
            if meta.type_name.as_deref() != Some(type_name) {
                continue;
            }
            if meta.hash_name().to_lowercase() != name {
                continue;
            }

            if meta.variants.is_empty() {
                return Some(Match {
                    item_id,
                    meta,
                    variant: None,
                });
            }
            if let Some(found) = meta.variants.iter().find(|v| v.to_lowercase() == variant) {
                return Some(Match {
                    item_id,
                    meta,
                    variant: Some(found.as_str()),
                });
            }
        }
    }

    None
}
