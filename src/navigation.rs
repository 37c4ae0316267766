//! Console navigation
//!
//! Five static path patterns map one-to-one to views. Anything that does
//! not match resolves to the landing view; there is no dedicated 404 page.

use crate::models::SpacecraftId;
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

/// A navigable console location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Fleet,
    Spacecraft(SpacecraftId),
    Construction,
    Planets,
}

impl Route {
    /// Resolve a request path to a view
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            ["spacecrafts"] => Route::Fleet,
            ["spacecraft", id] if !id.is_empty() => {
                Route::Spacecraft(SpacecraftId::new(percent_decode_str(id).decode_utf8_lossy()))
            }
            ["construction"] => Route::Construction,
            ["planets"] => Route::Planets,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Fleet => "/spacecrafts".to_string(),
            Route::Spacecraft(id) => console_path(&["spacecraft", id.as_str()]),
            Route::Construction => "/construction".to_string(),
            Route::Planets => "/planets".to_string(),
        }
    }
}

/// Join `segments` into an absolute console path, percent-encoding each one
pub fn console_path(segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse("http://console.local/") else {
        return "/".to_string();
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolves_known_paths() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve("/spacecrafts"), Route::Fleet);
        assert_eq!(Route::resolve("/spacecrafts/"), Route::Fleet);
        assert_eq!(
            Route::resolve("/spacecraft/abc-123"),
            Route::Spacecraft(SpacecraftId::new("abc-123"))
        );
        assert_eq!(Route::resolve("/construction"), Route::Construction);
        assert_eq!(Route::resolve("/planets?x=1"), Route::Planets);
    }

    #[test]
    fn test_spacecraft_ids_are_encoded() {
        let route = Route::Spacecraft(SpacecraftId::new("a/b?c#d"));

        assert_eq!(route.path(), "/spacecraft/a%2Fb%3Fc%23d");
        assert_eq!(Route::resolve(&route.path()), route);
        assert_eq!(
            console_path(&["spacecrafts", "x y", "destroy"]),
            "/spacecrafts/x%20y/destroy"
        );
    }

    #[test]
    fn test_unmatched_paths_fall_back_to_home() {
        for path in ["", "/nowhere", "/spacecraft", "/spacecraft/a/b", "/planets/3", "/PLANETS"] {
            assert_eq!(Route::resolve(path), Route::Home, "path {:?}", path);
        }
    }

    #[test]
    fn test_path_round_trips_through_resolve() {
        let routes = [
            Route::Home,
            Route::Fleet,
            Route::Spacecraft(SpacecraftId::new("sc-9")),
            Route::Construction,
            Route::Planets,
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.path()), route);
        }
    }
}
