use crate::api::use_api;
use crate::forms::{FormController, LoginFlow, Notice, run_submit};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use auth_portal_shared::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let form = RwSignal::new(FormController::default());

    let is_busy = move || form.with(FormController::is_busy);
    let error_msg = move || {
        form.with(|f| match f.notice() {
            Some(Notice::Error(msg)) => Some(msg.clone()),
            _ => None,
        })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let req = LoginRequest::new(username.get_untracked(), password.get_untracked());
        let api = api.clone();
        let session = session.clone();
        spawn_local(async move {
            let outcome = run_submit(&form, LoginFlow::submit(&api, &session, &req)).await;
            if let Some(route) = outcome.and_then(|o| o.next_route()) {
                router.navigate(route);
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Login"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username or Email"</span>
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
                            <button type="submit" class="btn btn-primary" disabled=is_busy>
                                {move || if is_busy() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-sm">
                    "Don't have an account? "
                    <Link to=AppRoute::Signup class="link link-primary" disabled={Signal::derive(is_busy)}>"Sign Up"</Link>
                </p>
            </div>
        </div>
    }
}
