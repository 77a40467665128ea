//! Count-up statistics for `[data-count]` elements

use std::rc::Rc;

use medibook::counter::{parse_target, CounterAnimation, COUNTER_INTERVAL, COUNTER_THRESHOLD};
use medibook::lifecycle::{Subsystem, SubsystemError};
use medibook::scheduler::Scheduler;
use web_sys::Element;

use crate::dom::{self, RevealObserver};

pub struct Counters {
    scheduler: Rc<dyn Scheduler>,
    observer: Option<RevealObserver>,
}

impl Counters {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            observer: None,
        }
    }
}

impl Subsystem for Counters {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let counters = dom::query_all("[data-count]");
        if counters.is_empty() {
            return Ok(());
        }

        let scheduler = Rc::clone(&self.scheduler);
        let observer = RevealObserver::new(COUNTER_THRESHOLD, "0px", move |el| {
            let target = el
                .get_attribute("data-count")
                .as_deref()
                .and_then(parse_target);
            match target {
                Some(target) => {
                    schedule_step(el.clone(), CounterAnimation::new(target), Rc::clone(&scheduler))
                }
                None => tracing::debug!("skipping counter without numeric data-count"),
            }
        })?;
        for el in &counters {
            observer.observe(el);
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

fn schedule_step(el: Element, mut animation: CounterAnimation, scheduler: Rc<dyn Scheduler>) {
    let next = Rc::clone(&scheduler);
    scheduler.schedule(
        COUNTER_INTERVAL,
        Box::new(move || {
            el.set_text_content(Some(&animation.tick()));
            if !animation.is_done() {
                schedule_step(el, animation, next);
            }
        }),
    );
}
