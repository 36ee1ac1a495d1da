//! Test doubles shared by the workspace's test suites.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{HostPlatform, Popup};

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Show,
    Hide,
    SetText(String),
    OnClick,
    Popup(Popup),
}

/// Host that records every call instead of talking to a real client.
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Rc<RefCell<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn popups(&self) -> Vec<Popup> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::Popup(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_popup(&self) -> Option<Popup> {
        self.popups().pop()
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl HostPlatform for RecordingHost {
    fn show_main_button(&self) {
        self.record(HostCall::Show);
    }

    fn hide_main_button(&self) {
        self.record(HostCall::Hide);
    }

    fn set_main_button_text(&self, text: &str) {
        self.record(HostCall::SetText(text.to_string()));
    }

    fn on_main_button_click(&self, _handler: Box<dyn Fn()>) {
        self.record(HostCall::OnClick);
    }

    fn show_popup(&self, popup: &Popup) {
        self.record(HostCall::Popup(popup.clone()));
    }
}
