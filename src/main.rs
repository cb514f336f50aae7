//! Favorite Roster entry point
//!
//! On the web, hydrates the persisted count and favorites from LocalStorage
//! and exposes them to the page script. Natively, runs against in-memory
//! storage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use favorite_roster::platform::LocalStorage;
    use favorite_roster::{Favorites, MemoryStorage, Settings, SlotStorage, UserCount, roster};

    type Backend = Rc<dyn SlotStorage>;

    /// App instance holding the persisted state
    struct App {
        settings: Settings,
        count: UserCount<Backend>,
        favorites: Favorites<Backend>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
        APP.with(|app| app.borrow_mut().as_mut().map(f))
    }

    /// Current requested user count
    #[wasm_bindgen]
    pub fn user_count() -> u32 {
        with_app(|app| app.count.get()).unwrap_or_default()
    }

    /// Apply the count input's text; returns false if it was not a number
    #[wasm_bindgen]
    pub fn set_user_count(text: &str) -> bool {
        with_app(|app| app.count.set_from_input(text)).unwrap_or(false)
    }

    /// URL for the current count
    #[wasm_bindgen]
    pub fn request_url() -> String {
        with_app(|app| roster::request_url(&app.settings, app.count.get())).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn is_favorite(email: &str) -> bool {
        with_app(|app| app.favorites.contains(email)).unwrap_or(false)
    }

    /// Star or unstar a user; returns whether it is now a favorite
    #[wasm_bindgen]
    pub fn toggle_favorite(email: &str) -> bool {
        with_app(|app| app.favorites.toggle(email)).unwrap_or(false)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Favorite Roster starting...");

        let backend: Backend = match LocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::error!("{}; favorites will not survive a reload", e);
                Rc::new(MemoryStorage::new())
            }
        };

        let settings = Settings::default();
        let count = UserCount::new(&settings, Rc::clone(&backend));
        let favorites = Favorites::new(&settings, Rc::clone(&backend));
        log::info!("Requesting {}", roster::request_url(&settings, count.get()));

        APP.with(|app| {
            *app.borrow_mut() = Some(App {
                settings,
                count,
                favorites,
            })
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use favorite_roster::{Favorites, MemoryStorage, Settings, UserCount, roster};

    env_logger::init();
    log::info!("Favorite Roster (native) starting...");
    log::info!("Native mode keeps state in memory - run with `trunk serve` for the web version");

    let storage = MemoryStorage::new();
    let settings = Settings::default();

    let mut count = UserCount::new(&settings, &storage);
    if let Some(arg) = std::env::args().nth(1) {
        count.set_from_input(&arg);
    }
    println!("{}", roster::request_url(&settings, count.get()));

    let mut favorites = Favorites::new(&settings, &storage);
    for email in std::env::args().skip(2) {
        let starred = favorites.toggle(&email);
        println!("{} {}", if starred { "★" } else { "☆" }, email);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
