//! URL helper functions

/// Join a path onto the site root
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/posts/hello") // -> "/blog/posts/hello"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Published path of a post, derived only from its slug
///
/// # Examples
/// ```ignore
/// post_url("/", "posts", "hello") // -> "/posts/hello"
/// ```
pub fn post_url(root: &str, route_prefix: &str, slug: &str) -> String {
    let prefix = route_prefix.trim_matches('/');
    url_for(root, &format!("{}/{}", prefix, slug))
}
