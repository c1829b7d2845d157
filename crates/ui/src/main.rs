use gpui::*;
use gpui_component::notification::NotificationList;
use gpui_component::{Root, ThemeRegistry};
use tracing_subscriber::EnvFilter;

use ui::app::{
    ChatAppShell, NewChat, Quit, ShowChat, ShowContact, ShowFeatures, ShowPricing, ToggleSidebar,
    ToggleTheme, default_themes_path,
};
use ui::settings::{SettingsState, SettingsStore};

fn main() {
    let settings_store = SettingsStore::load();
    let startup_settings = settings_store.settings();

    // RUST_LOG wins over the configured filter.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&startup_settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        config = ?settings_store.config_path(),
        reply_delay_ms = startup_settings.reply_delay_ms,
        "starting gptchat"
    );

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_tokio_bridge::init(cx);

        // Required before any Root usage.
        gpui_component::init(cx);

        let settings_state = SettingsState::new(settings_store, cx);

        let watched_settings = settings_state.clone();
        if let Err(err) = ThemeRegistry::watch_dir(default_themes_path(), cx, move |cx| {
            let settings = watched_settings.read(cx).settings();
            settings.apply_theme(None, cx);
            tracing::info!("theme directory reloaded");
        }) {
            tracing::warn!("failed to watch themes directory: {}. using default themes", err);
            settings_state.read(cx).settings().apply_theme(None, cx);
        }

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-n", NewChat, None),
            KeyBinding::new("cmd-b", ToggleSidebar, None),
            KeyBinding::new("cmd-shift-t", ToggleTheme, None),
            KeyBinding::new("cmd-1", ShowChat, None),
            KeyBinding::new("cmd-2", ShowFeatures, None),
            KeyBinding::new("cmd-3", ShowPricing, None),
            KeyBinding::new("cmd-4", ShowContact, None),
        ]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(1280.), px(820.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(14.), px(14.))),
                        ..Default::default()
                    }),
                    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
                    window_decorations: Some(WindowDecorations::Client),
                    #[cfg(not(any(target_os = "linux", target_os = "freebsd")))]
                    window_decorations: None,
                    ..Default::default()
                };

                let window = cx.open_window(options, |window, cx| {
                    let notification_list = cx.new(|cx| NotificationList::new(window, cx));
                    let shell = cx.new(|cx| {
                        ChatAppShell::new(settings_state.clone(), notification_list, window, cx)
                    });
                    ChatAppShell::register_global_actions(&shell, cx);

                    cx.new(|cx| Root::new(shell, window, cx))
                });

                match window {
                    Ok(_) => cx.activate(true),
                    Err(error) => {
                        tracing::error!("failed to open main window: {error}");
                        cx.quit();
                    }
                }
            })
        })
        .detach();
    });
}
