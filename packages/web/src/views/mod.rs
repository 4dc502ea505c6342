//! Server-rendered pages.
//!
//! Each page is a dioxus component rendered to a complete HTML document with
//! `dioxus-ssr`. Interactivity lives in the scripts under `/static/js`.

use dioxus::prelude::*;

mod layout;
pub use layout::Page;

mod login;
pub use login::LoginPage;

mod counter;
pub use counter::CounterPage;

mod callback;
pub use callback::CallbackPage;

fn render_document(element: Element) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus_ssr::render_element(element)
    )
}

/// Login page linking to the gateway.
pub fn login_page(auth_url: &str) -> String {
    render_document(rsx! {
        LoginPage { auth_url: auth_url.to_string() }
    })
}

/// Protected counter page.
pub fn counter_page(username: &str, score: i64) -> String {
    render_document(rsx! {
        CounterPage { username: username.to_string(), score: score }
    })
}

/// Shown in the login popup after a successful callback.
pub fn callback_page() -> String {
    render_document(rsx! {
        CallbackPage {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_links_gateway() {
        let html = login_page("http://gate/gate/auth?project_uuid=p1");

        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("project_uuid=p1"));
        assert!(html.contains("bg-login-btn"));
        assert!(html.contains("login.js"));
    }

    #[test]
    fn test_counter_page_escapes_username() {
        let html = counter_page("<b>eve</b>", -3);

        assert!(!html.contains("<b>eve</b>"));
        assert!(html.contains("-3"));
        assert!(html.contains("counter.js"));
    }

    #[test]
    fn test_stylesheet_is_not_escaped() {
        let html = login_page("http://gate/gate/auth?project_uuid=p1");
        let start = html.find("<style>").expect("style block");
        let end = html.find("</style>").expect("style block");
        let css = &html[start..end];

        assert!(css.contains("font-family"));
        assert!(!css.contains('&'), "{}", css);
    }

    #[test]
    fn test_callback_page() {
        assert!(callback_page().contains("callback.js"));
    }
}
