// ---------------------------------------------------------------------------
// Outbound link generation
// ---------------------------------------------------------------------------

/// Build a maps-search URL for a shop, scoped to the configured city.
pub fn maps_search_url(display_name: &str, city: &str) -> String {
    let query = urlencoding::encode(&format!("{display_name} {city}")).into_owned();
    format!("https://www.google.com/maps/search/?api=1&query={query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_and_reserved_chars() {
        assert_eq!(
            maps_search_url("Jl. Malioboro", "Yogyakarta"),
            "https://www.google.com/maps/search/?api=1&query=Jl.%20Malioboro%20Yogyakarta"
        );
        let url = maps_search_url("Kopi & Teh", "Yogyakarta");
        assert!(url.ends_with("query=Kopi%20%26%20Teh%20Yogyakarta"));
    }
}
