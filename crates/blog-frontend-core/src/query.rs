//! Query-string parameter lookup for `location.search`.

/// Value of `name` in `search` (e.g. `"?recipient=Jane+Doe"`), or `""`.
///
/// Only matches a key that starts the query or follows `&`. The value runs to
/// the next `&` or `#`; `+` decodes to a space and `%XX` sequences are
/// percent-decoded. A malformed escape leaves the `+`-replaced text as is.
#[must_use]
pub fn url_parameter(search: &str, name: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
        .map(|raw| {
            let spaced = raw.replace('+', " ");
            match urlencoding::decode(&spaced) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => spaced,
            }
        })
        .unwrap_or_default()
}
