use crate::api::use_api;
use crate::config::use_config;
use crate::forms::{FormController, FormOutcome, Notice, SignupFlow, run_submit};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use auth_portal_shared::SignupRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let delay = use_config().signup_redirect_delay;
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let form = RwSignal::new(FormController::default());

    let is_busy = move || form.with(FormController::is_busy);
    let notice = move || form.with(|f| f.notice().cloned());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let req = SignupRequest::new(
            username.get_untracked(),
            email.get_untracked(),
            password.get_untracked(),
        );
        let api = api.clone();
        spawn_local(async move {
            let outcome = run_submit(&form, SignupFlow::submit(&api, &req, delay)).await;
            if let Some(FormOutcome::Registered { redirect_after, .. }) = outcome {
                gloo_timers::future::sleep(redirect_after).await;
                // 等待期间离开了页面则不再跳转
                if form.is_disposed() {
                    return;
                }
                router.navigate(AppRoute::Login);
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Sign Up"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || notice().map(|notice| match notice {
                            Notice::Error(msg) => view! {
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{msg}</span>
                                </div>
                            }.into_any(),
                            Notice::Success(msg) => view! {
                                <div role="alert" class="alert alert-success text-sm py-2">
                                    <span>{msg}</span>
                                </div>
                            }.into_any(),
                        })}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                                disabled=is_busy
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                                disabled=is_busy
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                                disabled=is_busy
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-success" disabled=is_busy>
                                {move || if is_busy() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-sm">
                    "Already have an account? "
                    <Link to=AppRoute::Login class="link link-primary" disabled={Signal::derive(is_busy)}>"Login"</Link>
                </p>
            </div>
        </div>
    }
}
