//! Login page with the BrownieGate sign-in button.

use dioxus::prelude::*;

use super::Page;

#[component]
pub fn LoginPage(auth_url: String) -> Element {
    rsx! {
        Page {
            title: "Sign in".to_string(),

            h1 {
                style: "margin-bottom: 0.5rem; font-weight: 700; font-size: 1.75rem;",
                "Counter"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem;",
                "Sign in to keep your score between visits."
            }

            // login.js opens this in a popup; without script it is a plain link.
            a {
                id: "bg-login-btn",
                class: "btn",
                href: "{auth_url}",
                "Sign in with BrownieGate"
            }

            script { src: "/static/js/login.js" }
        }
    }
}
