//! Toast Notification Component
//!
//! Renders the notifier's stack. Toasts are keyed by id so a phase change
//! restyles the existing node and its CSS transition plays.

use leptos::*;
use medibook::notify::{NotificationKind, Phase};

use crate::state::PageState;

/// Fixed container for every visible toast
#[component]
pub fn ToastStack(state: PageState) -> impl IntoView {
    view! {
        <div style="position: fixed; top: 100px; right: 20px; z-index: 10000;">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    view! {
                        <ToastMessage state=state id=toast.id kind=toast.kind message=toast.message />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ToastMessage(state: PageState, id: u64, kind: NotificationKind, message: String) -> impl IntoView {
    let background = match kind {
        NotificationKind::Success => "var(--success-color)",
        NotificationKind::Error => "var(--error-color)",
    };

    let style = move || {
        let phase = state
            .toasts
            .with(|toasts| toasts.iter().find(|t| t.id == id).map(|t| t.phase))
            .unwrap_or(Phase::Leaving);
        let (opacity, offset) = match phase {
            Phase::Visible => ("1", "0"),
            Phase::Entering | Phase::Leaving => ("0", "100%"),
        };
        format!(
            "background: {}; color: white; padding: var(--space-4) var(--space-6); \
             border-radius: var(--radius-lg); box-shadow: var(--shadow-xl); \
             margin-bottom: var(--space-3); opacity: {}; transform: translateX({}); \
             transition: all 0.3s ease;",
            background, opacity, offset
        )
    };

    view! {
        <div class=kind.css_class() style=style>
            {message}
        </div>
    }
}
