//! The navigation bar shared by all pages.

use maud::{Markup, html};

use crate::endpoints;

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

/// The navigation bar displayed at the top of every page.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be marked as
    /// active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::ROOT,
                title: "Acasa",
                is_current: active_endpoint == endpoints::ROOT,
            },
            Link {
                url: endpoints::RECORD_EXPENSE_VIEW,
                title: "Adauga bon",
                is_current: active_endpoint == endpoints::RECORD_EXPENSE_VIEW,
            },
            Link {
                url: endpoints::EXPENSES_VIEW,
                title: "Cheltuieli",
                is_current: active_endpoint == endpoints::EXPENSES_VIEW,
            },
            Link {
                url: endpoints::STORES_VIEW,
                title: "Magazine",
                is_current: active_endpoint == endpoints::STORES_VIEW,
            },
            Link {
                url: endpoints::REPORTS_VIEW,
                title: "Rapoarte",
                is_current: active_endpoint == endpoints::REPORTS_VIEW,
            },
        ];

        NavBar { links }
    }

    /// Render the navigation bar.
    pub fn into_html(self) -> Markup {
        html!(
            nav
            {
                @for link in self.links {
                    a
                        href=(link.url)
                        class=[link.is_current.then_some("current")]
                        aria-current=[link.is_current.then_some("page")]
                    {
                        (link.title)
                    }
                }
            }
        )
    }
}
