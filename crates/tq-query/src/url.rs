//! Canonical request URL.

use crate::params::QueryParams;

/// Join `base_url` and `path`, then append `params` percent-encoded in
/// builder order. Used for display and as the result cache key.
#[must_use]
pub fn request_url(base_url: &str, path: &str, params: &QueryParams) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if params.is_empty() {
        format!("{base}/{path}")
    } else {
        format!("{base}/{path}?{}", params.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubled_slashes() {
        let params = QueryParams::new();
        assert_eq!(
            request_url("https://api-v3.mbta.com/", "/stops", &params),
            "https://api-v3.mbta.com/stops"
        );
    }

    #[test]
    fn appends_encoded_parameters() {
        let mut params = QueryParams::new();
        params.insert("include", "route");
        params.insert("filter[route_type]", "0,1");
        assert_eq!(
            request_url("https://api-v3.mbta.com", "/stops", &params),
            "https://api-v3.mbta.com/stops?include=route&filter%5Broute_type%5D=0%2C1"
        );
    }
}
