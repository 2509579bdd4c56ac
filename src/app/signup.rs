use leptos::{ev::SubmitEvent, prelude::*};

#[cfg(feature = "ssr")]
use crate::mailing_list::{validate_email, SignupError, MAILING_LIST};
use crate::mailing_list::{SignupForm, SignupStage, SubscribeOutcome};

#[server]
pub async fn signup_enabled() -> Result<bool, ServerFnError> {
    Ok(MAILING_LIST.is_some())
}

#[server]
pub async fn subscribe_email(email: String) -> Result<SubscribeOutcome, ServerFnError> {
    if !validate_email(&email) {
        return Ok(SubscribeOutcome::Rejected(SignupError::InvalidEmail));
    }
    let Some(list) = MAILING_LIST.as_ref() else {
        return Ok(SubscribeOutcome::Rejected(SignupError::NotConfigured));
    };
    Ok(match list.subscribe(email.trim()).await {
        Ok(()) => SubscribeOutcome::Subscribed,
        Err(e) => SubscribeOutcome::Rejected(e),
    })
}

/// Mailing list signup; renders nothing when the backend isn't configured.
#[component]
pub fn EmailSignup() -> impl IntoView {
    let enabled = Resource::new(|| (), |_| async { signup_enabled().await.unwrap_or(false) });

    view! {
        <Suspense>
            {move || Suspend::new(async move {
                enabled.await.then(|| view! { <SignupWidget /> })
            })}
        </Suspense>
    }
}

#[component]
fn SignupWidget() -> impl IntoView {
    let form = RwSignal::new(SignupForm::new());
    let email = RwSignal::new(String::new());
    let subscribe = Action::new(|address: &String| {
        let address = address.clone();
        async move { subscribe_email(address).await.map_err(|e| e.to_string()) }
    });

    Effect::new(move |_| {
        if let Some(result) = subscribe.value().get() {
            form.update(|f| f.resolve(result));
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let address = form.try_update(|f| f.submit(&email.get_untracked())).flatten();
        if let Some(address) = address {
            subscribe.dispatch(address);
        }
    };
    let stage = move || form.with(SignupForm::stage);
    let submitting = move || stage() == SignupStage::Submitting;

    view! {
        <div class="mt-6">
            <Show when=move || stage() == SignupStage::Collapsed>
                <button
                    class="text-sm underline decoration-1 underline-offset-4 hover:decoration-2 transition-all"
                    on:click=move |_| form.update(SignupForm::expand)
                >
                    "sign up for my email list :)"
                </button>
            </Show>
            <Show when=move || form.with(SignupForm::shows_form)>
                <form class="signup-form flex gap-2 items-start" on:submit=on_submit>
                    <div class="flex-1">
                        <input
                            type="email"
                            placeholder="your@email.com"
                            class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500 font-sans text-sm"
                            prop:value=move || email.get()
                            prop:disabled=move || !form.with(SignupForm::is_editable)
                            on:input=move |ev| {
                                email.set(event_target_value(&ev));
                                form.update(SignupForm::edit);
                            }
                        />
                        {move || {
                            form.with(|f| f.message().map(str::to_string))
                                .map(|message| {
                                    view! { <p class="text-red-500 text-xs mt-1 font-sans">{message}</p> }
                                })
                        }}
                    </div>
                    <button
                        type="submit"
                        class="px-4 py-2 bg-gray-800 text-white rounded-md hover:bg-gray-700 transition-colors disabled:opacity-50 font-sans text-sm"
                        prop:disabled=submitting
                    >
                        {move || if submitting() { "..." } else { "→" }}
                    </button>
                    <Show when=move || stage() == SignupStage::Failed>
                        <button
                            type="button"
                            class="text-sm underline"
                            on:click=move |_| form.update(SignupForm::retry)
                        >
                            "try again"
                        </button>
                    </Show>
                </form>
            </Show>
            <Show when=move || stage() == SignupStage::Subscribed>
                <div class="flex items-center gap-2 text-green-700">
                    <span class="text-xl">"✓"</span>
                    <span class="text-sm">"thank you for signing up!"</span>
                </div>
            </Show>
        </div>
    }
}
