//! Static page table.
//!
//! Matching is forgiving in the usual router way: case-insensitive, a
//! trailing slash is ignored, and any query string or fragment is dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Upload a document and read its report.
    Home,
    /// Paginated list of past analyses.
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
}

pub const ROUTES: &[Route] = &[
    Route { path: "/", name: "Home", page: Page::Home },
    Route { path: "/history", name: "History", page: Page::History },
];

pub fn resolve(path: &str) -> Option<&'static Route> {
    let path = path.split(&['?', '#'][..]).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|r| r.path.eq_ignore_ascii_case(normalized))
}

pub fn find_by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

pub fn route_for(page: Page) -> &'static Route {
    match page {
        Page::Home => &ROUTES[0],
        Page::History => &ROUTES[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_both_pages() {
        assert_eq!(resolve("/").map(|r| r.page), Some(Page::Home));
        assert_eq!(resolve("/history").map(|r| r.page), Some(Page::History));
    }

    #[test]
    fn normalizes_paths() {
        assert_eq!(resolve("").map(|r| r.page), Some(Page::Home));
        assert_eq!(resolve("/History/").map(|r| r.page), Some(Page::History));
        assert_eq!(resolve("/history?page=2#top").map(|r| r.page), Some(Page::History));
        assert_eq!(resolve("/?tab=upload").map(|r| r.page), Some(Page::Home));
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert!(resolve("/history/abc").is_none());
        assert!(resolve("/settings").is_none());
    }

    #[test]
    fn lookups_agree() {
        for route in ROUTES {
            assert_eq!(route_for(route.page), route);
            assert_eq!(find_by_name(route.name), Some(route));
        }
        assert_eq!(find_by_name("history").map(|r| r.path), Some("/history"));
    }
}
