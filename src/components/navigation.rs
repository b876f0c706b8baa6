use dioxus::prelude::*;

use crate::components::app_view::AppView;

const NAV_HISTORY_LIMIT: usize = 64;

#[derive(Clone, Copy)]
pub struct Navigation {
    current_view: Signal<AppView>,
    history: Signal<Vec<AppView>>,
}

impl Navigation {
    pub fn new(current_view: Signal<AppView>, history: Signal<Vec<AppView>>) -> Self {
        Self {
            current_view,
            history,
        }
    }

    pub fn current_view(&self) -> AppView {
        (self.current_view)()
    }

    pub fn navigate_to(&self, target: AppView) {
        let mut current_view = self.current_view;
        let previous = current_view();
        if previous == target {
            return;
        }

        let mut history = self.history;
        let mut stack = history();
        stack.push(previous);
        if stack.len() > NAV_HISTORY_LIMIT {
            stack.remove(0);
        }
        history.set(stack);

        current_view.set(target);
    }

    pub fn can_go_back(&self) -> bool {
        let history = self.history;
        !history().is_empty()
    }

    pub fn go_back(&self) -> Option<AppView> {
        let mut history = self.history;
        let mut stack = history();
        let prev = stack.pop();
        history.set(stack);
        prev.map(|prev| {
            let mut current_view = self.current_view;
            current_view.set(prev.clone());
            prev
        })
    }
}
