//! Chat Widget
//!
//! Binds `#chatbot-toggle` / `#chatbot-panel` to a [`ChatSession`] and
//! renders its transcript into `.chatbot-messages`.

use std::rc::Rc;
use std::time::Duration;

use leptos::*;
use medibook::chat::{ChatSession, PanelState};
use medibook::lifecycle::{Subscriptions, Subsystem, SubsystemError};
use medibook::scheduler::Scheduler;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::components::ChatTranscript;
use crate::dom;
use crate::state::PageState;

pub struct Chat {
    state: PageState,
    scheduler: Rc<dyn Scheduler>,
    reply_delay: Duration,
    seed: u64,
    subs: Subscriptions,
}

impl Chat {
    pub fn new(state: PageState, scheduler: Rc<dyn Scheduler>, reply_delay: Duration, seed: u64) -> Self {
        Self {
            state,
            scheduler,
            reply_delay,
            seed,
            subs: Subscriptions::new(),
        }
    }
}

fn show_panel(panel: &Element, state: PanelState) {
    dom::set_class(panel, "active", state.is_open());
}

impl Subsystem for Chat {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let toggle: Element = dom::require_id("chatbot-toggle")?;
        let panel: Element = dom::require_id("chatbot-panel")?;

        let messages = dom::query::<HtmlElement>(".chatbot-messages");
        let state = self.state;
        let scroll_target = messages.clone();
        let session = ChatSession::new(
            SmallRng::seed_from_u64(self.seed),
            Rc::clone(&self.scheduler),
            self.reply_delay,
        )
        .on_entry(move |entry| {
            state.push_entry(entry);
            if let Some(list) = scroll_target.clone() {
                // Scroll after the view has rendered the new entry
                let _ = dom::request_frame(move |_| list.set_scroll_top(list.scroll_height()));
            }
        });

        if let Some(list) = messages {
            mount_to(list, move || view! { <ChatTranscript state=state /> });
        }

        {
            let session = session.clone();
            let panel = panel.clone();
            dom::listen(&toggle, "click", &mut self.subs, move |_: Event| {
                show_panel(&panel, session.toggle());
            })?;
        }

        if let Some(close) = dom::find_id::<Element>("close-chat") {
            let session = session.clone();
            let panel = panel.clone();
            dom::listen(&close, "click", &mut self.subs, move |_: Event| {
                session.close();
                show_panel(&panel, session.panel());
            })?;
        }

        let input = dom::find_id::<HtmlInputElement>("chat-input");
        let submit = {
            let session = session.clone();
            let input = input.clone();
            Rc::new(move || {
                if let Some(input) = &input {
                    if session.send(&input.value()) {
                        input.set_value("");
                    }
                }
            })
        };

        if let Some(input) = &input {
            let submit = Rc::clone(&submit);
            dom::listen(input, "keypress", &mut self.subs, move |e: KeyboardEvent| {
                if e.key() == "Enter" {
                    submit();
                }
            })?;
        }

        if let Some(button) = dom::find_id::<Element>("send-message") {
            let submit = Rc::clone(&submit);
            dom::listen(&button, "click", &mut self.subs, move |_: Event| submit())?;
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.subs.clear();
    }
}
