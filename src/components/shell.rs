//! 页面外壳：布局与纯展示页面

use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

/// 所有页面共用的外层布局
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm">
                <div class="flex-1">
                    <Link to=AppRoute::Home class="btn btn-ghost text-xl">"Auth Portal"</Link>
                </div>
                <div class="flex-none gap-2">
                    <Link to=AppRoute::Demo class="btn btn-ghost btn-sm">"Demo"</Link>
                    <Link to=AppRoute::Private class="btn btn-ghost btn-sm">"Private"</Link>
                    <Link to=AppRoute::Login class="btn btn-primary btn-sm">"Login"</Link>
                </div>
            </div>
            <main>{children()}</main>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero py-16">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-4xl font-bold">"Welcome"</h1>
                    <p class="py-6">"Create an account or log in to see your private dashboard."</p>
                    <Link to=AppRoute::Signup class="btn btn-success">"Sign Up"</Link>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SinglePage(id: String) -> impl IntoView {
    view! {
        <div class="container mx-auto py-8">
            <h1 class="text-3xl font-bold">"Item " {id}</h1>
            <Link to=AppRoute::Home class="link link-primary">"Back home"</Link>
        </div>
    }
}

#[component]
pub fn DemoPage() -> impl IntoView {
    view! {
        <div class="container mx-auto py-8">
            <h1 class="text-3xl font-bold">"Demo"</h1>
            <ul class="menu bg-base-100 rounded-box mt-4">
                <li><Link to={AppRoute::Single { id: "1".to_string() }}>"Item 1"</Link></li>
                <li><Link to={AppRoute::Single { id: "2".to_string() }}>"Item 2"</Link></li>
            </ul>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! { <h1>"Not found!"</h1> }
}
