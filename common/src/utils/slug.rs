/// Turns a display name into an object id: lowercase ASCII, digits and single underscores.
///
/// `"Xiaomi Air Fresh"` becomes `"xiaomi_air_fresh"`. An empty result falls back to `"unnamed"`.
pub fn slugify(name: &str) -> String {
    let mut slug: String = String::with_capacity(name.len());
    let mut pending_sep: bool = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    if slug.is_empty() {
        return String::from("unnamed");
    }
    slug
}

/// Checks the `domain.object_id` shape of an entity id.
pub fn is_valid_entity_id(entity_id: &str) -> bool {
    let Some((domain, object_id)) = entity_id.split_once('.') else {
        return false;
    };
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    };
    valid_part(domain) && valid_part(object_id)
}
