//! Chat Transcript Component

use leptos::*;
use medibook::chat::{ChatEntry, Sender};

use crate::state::PageState;

/// Messages appended below whatever the page already shows
#[component]
pub fn ChatTranscript(state: PageState) -> impl IntoView {
    view! {
        {move || {
            state
                .transcript
                .get()
                .into_iter()
                .map(|entry| view! { <ChatMessage entry=entry /> })
                .collect_view()
        }}
    }
}

#[component]
fn ChatMessage(entry: ChatEntry) -> impl IntoView {
    let bubble = match entry.sender {
        Sender::User => {
            "background: var(--primary-gradient); color: white; padding: var(--space-3); \
             border-radius: var(--radius-lg); margin-bottom: var(--space-3); \
             margin-left: var(--space-8); text-align: right;"
        }
        Sender::Bot => {
            "background: var(--bg-secondary); padding: var(--space-3); \
             border-radius: var(--radius-lg); margin-bottom: var(--space-3); \
             margin-right: var(--space-8);"
        }
    };
    let text_style = match entry.sender {
        Sender::User => "margin: 0; font-size: 0.875rem;",
        Sender::Bot => "margin: 0; color: var(--text-secondary); font-size: 0.875rem; line-height: 1.5;",
    };

    view! {
        <div class=entry.sender.css_class()>
            <div style=bubble>
                <p style=text_style>{entry.text}</p>
            </div>
        </div>
    }
}
