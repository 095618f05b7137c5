use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::config::{APP_LOGO_URL, APP_NAME};
use crate::probe_view::ProbeView;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Link rel="icon" href=APP_LOGO_URL/>

        <Router>
            <main class="container">
                <Routes>
                    <Route path="" view=ProbeView/>
                </Routes>
            </main>
        </Router>
    }
}
