use crate::api::use_api;
use crate::guard::{Guard, GuardState, ViewLifetime, run_bound};
use crate::session::use_session;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn PrivatePage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();

    let state = RwSignal::new(GuardState::Loading);

    // 挂载即校验，每次进入页面都重新走一遍
    match Guard::check(&session) {
        Err(redirect) => state.set(redirect),
        Ok(token) => {
            let store = session.clone();
            let (lifetime, task) = ViewLifetime::bind(async move {
                Guard::revalidate(&store, &api, &token).await
            });
            on_cleanup(move || lifetime.end());

            spawn_local(async move {
                if let Some(next) = run_bound(task).await {
                    state.set(next);
                }
            });
        }
    }

    // 需要跳转时替换当前 History 记录
    Effect::new(move |_| {
        if let Some(route) = state.with(GuardState::redirect_target) {
            router.redirect(route);
        }
    });

    let on_logout = move |_| {
        state.set(Guard::logout(&session));
    };

    move || match state.get() {
        GuardState::Loading | GuardState::Redirecting => view! {
            <p class="text-center mt-4">"Loading…"</p>
        }
        .into_any(),
        GuardState::Error(msg) => view! {
            <div role="alert" class="alert alert-error m-3">
                <span>{msg}</span>
            </div>
        }
        .into_any(),
        GuardState::Ready(user) => view! {
            <div class="container mx-auto py-4">
                <div class="flex justify-between items-center mb-3">
                    <h3 class="text-2xl font-bold">"Private Dashboard"</h3>
                    <button class="btn btn-outline btn-error btn-sm" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </div>

                <div class="card bg-base-100 shadow-sm">
                    <div class="card-body">
                        <p><strong>"ID: "</strong>{user.id}</p>
                        <p><strong>"Username: "</strong>{user.username}</p>
                        <p><strong>"Email: "</strong>{user.email}</p>
                    </div>
                </div>
            </div>
        }
        .into_any(),
    }
}
