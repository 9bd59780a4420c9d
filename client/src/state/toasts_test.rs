use login::notice::NoticeKind;

use super::*;

fn toast(title: &str) -> Toast {
    Toast {
        kind: NoticeKind::Success,
        title: title.to_owned(),
        description: String::new(),
        duration_ms: 5000,
        closable: true,
    }
}

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(toast("a"));
    let b = state.push(toast("b"));
    assert!(b > a);
    assert_eq!(state.entries().len(), 2);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(toast("a"));
    let b = state.push(toast("b"));

    assert!(state.dismiss(a));
    assert!(!state.dismiss(a));
    assert_eq!(state.entries().iter().map(|e| e.id).collect::<Vec<_>>(), vec![b]);
}

#[test]
fn stack_drops_oldest_beyond_limit() {
    let mut state = ToastState::default();
    for i in 0..MAX_VISIBLE_TOASTS + 2 {
        state.push(toast(&format!("t{i}")));
    }
    assert_eq!(state.entries().len(), MAX_VISIBLE_TOASTS);
    assert_eq!(state.entries()[0].toast.title, "t2");
}
