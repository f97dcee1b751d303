use std::fmt::Display;
use std::time::Duration;

use leptos::prelude::*;
use uuid::Uuid;

const MESSAGE_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    Success,
    Warning,
    Error,
}

impl MsgType {
    fn class(&self) -> &'static str {
        match self {
            MsgType::Success => "snackbar success",
            MsgType::Warning => "snackbar warning",
            MsgType::Error => "snackbar error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnackbarMsg {
    id: Uuid,
    msg_type: MsgType,
    content: String,
}

impl SnackbarMsg {
    fn new(msg_type: MsgType, content: String) -> Self {
        SnackbarMsg {
            id: Uuid::new_v4(),
            msg_type,
            content,
        }
    }
}

pub trait SnackbarContext {
    fn success(&self, msg: &str);
    fn error(&self, msg: &str, e: impl Display);
    fn warning(&self, msg: &str);
}

pub type Messages = WriteSignal<Vec<SnackbarMsg>>;

#[component]
pub fn Snackbar(children: ChildrenFn) -> impl IntoView {
    let (messages, set_messages) = signal(Vec::<SnackbarMsg>::new());

    provide_context(set_messages);

    view! {
        {children()}
        <div class="snackbar-stack vertical gap align-center">
            <For
                each=move || messages.get()
                key=|m: &SnackbarMsg| m.id
                let:child
            >
                <div
                    class=format!("rounded padded {}", child.msg_type.class())
                    on:click=move |_| set_messages.write().retain(|msg| msg.id != child.id)
                >
                    {child.content.clone()}
                </div>
            </For>
        </div>
    }
}

fn insert_message(snackbar: &Option<Messages>, msg: SnackbarMsg) {
    let Some(messages) = *snackbar else {
        return;
    };
    let id = msg.id;
    messages.write().push(msg);
    set_timeout(
        move || messages.write().retain(|msg| msg.id != id),
        MESSAGE_LIFETIME,
    );
}

impl SnackbarContext for Option<Messages> {
    fn success(&self, msg: &str) {
        insert_message(self, SnackbarMsg::new(MsgType::Success, msg.to_string()));
    }

    fn error(&self, msg: &str, e: impl Display) {
        insert_message(self, SnackbarMsg::new(MsgType::Error, format!("{msg}: {e}")));
    }

    fn warning(&self, msg: &str) {
        insert_message(self, SnackbarMsg::new(MsgType::Warning, msg.to_string()));
    }
}

pub fn use_snackbar() -> Option<Messages> {
    use_context::<Messages>()
}
