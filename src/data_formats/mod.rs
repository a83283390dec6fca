mod response;
mod wrapper;

pub use response::*;
pub use wrapper::*;

/// Number of characters of a post body shown in listings.
pub const TEASER_LENGTH: usize = 200;

/// Joins the media prefix and a stored image path into a public URL.
pub fn media_url(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
