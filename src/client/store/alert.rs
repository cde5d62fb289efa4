use crate::model::notification::NotificationEvent;

const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

/// Toasts and the new-order banner currently on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertState {
    pub toasts: Vec<Toast>,
    pub banner: Option<NotificationEvent>,
    next_id: u64,
}

impl AlertState {
    pub fn push_toast(&mut self, title: impl Into<String>, body: impl Into<String>, is_error: bool) {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            title: title.into(),
            body: body.into(),
            is_error,
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    pub fn info(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.push_toast(title, body, false);
    }

    pub fn error(&mut self, body: impl Into<String>) {
        self.push_toast("Error", body, true);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}
