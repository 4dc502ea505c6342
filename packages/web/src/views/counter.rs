//! The protected counter page.

use dioxus::prelude::*;

use super::Page;

#[component]
pub fn CounterPage(username: String, score: i64) -> Element {
    rsx! {
        Page {
            title: "Counter".to_string(),

            div {
                style: "display: flex; align-items: center; gap: 0.75rem; margin-bottom: 2rem;",
                img {
                    id: "pfp",
                    alt: "",
                    width: "40",
                    height: "40",
                    style: "border-radius: 50%; background: #e9e9e7;",
                }
                span { id: "username", "{username}" }
            }

            div {
                style: "display: flex; align-items: center; gap: 1.5rem;",
                button { id: "decrement", class: "btn secondary", "−" }
                span {
                    id: "score",
                    style: "font-size: 3rem; font-weight: 700; min-width: 4ch; text-align: center;",
                    "{score}"
                }
                button { id: "increment", class: "btn", "+" }
            }

            p { id: "status", style: "min-height: 1.5rem; color: #787774;" }

            div {
                style: "display: flex; gap: 0.75rem;",
                button { id: "reset", class: "btn secondary", "Reset" }
                button { id: "logout", class: "btn secondary", "Log out" }
            }

            script { src: "/static/js/counter.js" }
        }
    }
}
