use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// The modal can be closed while a request is in flight; its callbacks are then
/// disposed and the completion is dropped.
pub fn report_changed(on_changed: Callback<()>) -> bool {
    on_changed.try_run(()).is_some()
}

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: Signal<String>,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Extra class for sizing (`modal--wide` for the checkout)
    #[prop(optional, into)]
    class: String,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape closes the modal; the listener lives as long as the modal does
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=format!("modal {}", class) on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_change_after_close_is_dropped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let owner = Owner::new();
        let on_changed = owner.with(|| {
            let calls = Arc::clone(&calls);
            Callback::new(move |_: ()| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        });

        assert!(report_changed(on_changed));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // modal closed: its scope is disposed together with the callback
        owner.cleanup();
        assert!(!report_changed(on_changed));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
