//! Transient notifications.
use crate::i18n::t;
use crate::scratch::ApiError;
use std::rc::Rc;
use yew::prelude::*;

/// Toasts kept on screen at once; older ones are dropped first.
pub const MAX_TOASTS: usize = 4;

/// How long a toast stays up before it dismisses itself.
pub const TOAST_TTL_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "toast--info",
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }

    /// Errors interrupt assistive technology; the rest wait their turn.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: AttrValue,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u32),
}

impl ToastAction {
    /// Error toast for a failed API call.
    #[must_use]
    pub fn failure(err: &ApiError) -> Self {
        let message = if err.is_unauthorized() {
            t("auth.expired")
        } else {
            err.to_string()
        };
        Self::Push(ToastKind::Error, message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u32,
    items: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Id the next pushed toast will receive.
    #[must_use]
    pub const fn next_id(&self) -> u32 {
        self.next_id
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        // Identical back-to-back failures collapse into one toast.
        if self
            .items
            .last()
            .is_some_and(|last| last.kind == kind && last.message.as_str() == message)
        {
            return;
        }
        self.items.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id = self.next_id.wrapping_add(1);
        let overflow = self.items.len().saturating_sub(MAX_TOASTS);
        self.items.drain(..overflow);
    }

    fn dismiss(&mut self, id: u32) {
        self.items.retain(|toast| toast.id != id);
    }
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => next.push(kind, message),
            ToastAction::Dismiss(id) => next.dismiss(id),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(queue: ToastQueue, action: ToastAction) -> ToastQueue {
        (*Rc::new(queue).reduce(action)).clone()
    }

    #[test]
    fn push_and_dismiss() {
        let queue = reduce(
            ToastQueue::default(),
            ToastAction::Push(ToastKind::Error, String::from("Insufficient balance")),
        );
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].id, 0);
        assert_eq!(queue.next_id(), 1);
        let queue = reduce(queue, ToastAction::Dismiss(0));
        assert!(queue.items().is_empty());
    }

    #[test]
    fn failed_calls_become_error_toasts() {
        let queue = reduce(
            ToastQueue::default(),
            ToastAction::failure(&ApiError::Rejected(String::from("insufficient balance"))),
        );
        let queue = reduce(queue, ToastAction::failure(&ApiError::Http { status: 500 }));
        let queue = reduce(queue, ToastAction::failure(&ApiError::Unauthorized));
        let messages: Vec<_> = queue.items().iter().map(|toast| toast.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "insufficient balance",
                "request failed with status 500",
                t("auth.expired").as_str(),
            ]
        );
        assert!(queue.items().iter().all(|toast| toast.kind == ToastKind::Error));
    }

    #[test]
    fn duplicates_collapse_and_oldest_drop() {
        let mut queue = ToastQueue::default();
        for _ in 0..3 {
            queue = reduce(queue, ToastAction::Push(ToastKind::Info, String::from("same")));
        }
        assert_eq!(queue.items().len(), 1);
        for n in 0..6 {
            queue = reduce(queue, ToastAction::Push(ToastKind::Info, format!("msg {n}")));
        }
        assert_eq!(queue.items().len(), MAX_TOASTS);
        assert_eq!(queue.items()[0].message, AttrValue::from("msg 2"));
    }
}
