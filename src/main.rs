//! Application entry point: double-press clipboard translation.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (written with defaults on first run) and apply
//!    `LLM_TRANSLATE_*` environment overrides.
//! 3. Create the [`tokio`] multi-thread runtime.
//! 4. Build the translation provider and the system clipboard.
//! 5. Create the result queue and the translation dispatcher.
//! 6. Spawn the hotkey listener thread and the trigger-handler thread.
//! 7. Spawn the console thread that turns stdin lines into popup actions.
//! 8. Run the popup consumer on the runtime until `:quit` or Ctrl+C.

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;

use clip_translate::{
    clipboard::{ClipboardPort, SystemClipboard},
    config::AppConfig,
    dispatch::{result_queue, TranslationDispatcher},
    hotkey::{parse_key, parse_modifier, Bindings, HotkeyListener, TriggerDebouncer, TriggerHandler},
    language::{new_shared_language_state, LanguageState},
    popup::{ConsoleRenderer, PopupConsumer, PopupStateMachine, UserAction},
    provider::build_provider,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hotkey_bindings(config: &AppConfig) -> Bindings {
    let hotkey = &config.hotkey;

    let trigger = parse_key(&hotkey.trigger_key).unwrap_or_else(|| {
        log::warn!("Unknown trigger key {:?}; using C", hotkey.trigger_key);
        rdev::Key::KeyC
    });

    let modifier = match hotkey.trigger_modifier.trim() {
        "" => None,
        name => {
            let parsed = parse_modifier(name);
            if parsed.is_none() {
                log::warn!("Unknown trigger modifier {name:?}; using the bare key");
            }
            parsed
        }
    };

    let switch_language = parse_key(&hotkey.switch_language_key);
    if switch_language.is_none() {
        log::warn!(
            "Unknown language-switch key {:?}; switching disabled",
            hotkey.switch_language_key
        );
    }

    Bindings {
        trigger,
        modifier,
        switch_language,
    }
}

/// Read stdin lines as popup actions.
///
/// `:close`, `:copy`, `:copy-original` and `:quit` are commands; any other
/// line retranslates.  EOF only ends console input, not the application.
fn run_console(actions: mpsc::UnboundedSender<UserAction>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("console: stdin read failed: {e}");
                break;
            }
        };
        let action = match line.trim() {
            ":quit" => UserAction::Quit,
            ":close" => UserAction::Close,
            ":copy" => UserAction::CopyTranslated,
            ":copy-original" => UserAction::CopyOriginal,
            _ => UserAction::Submit(line),
        };
        let quit = action == UserAction::Quit;
        if actions.send(action).is_err() || quit {
            return;
        }
    }
    log::info!("console: input closed; hotkeys stay active until Ctrl+C");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("clip-translate starting up");

    // 2. Configuration
    let mut config = AppConfig::load_or_create().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    config.apply_env_overrides(|key| std::env::var(key).ok());

    let languages = LanguageState::new(config.languages.targets.clone()).unwrap_or_else(|e| {
        log::warn!("{e}; using default targets");
        LanguageState::default()
    });
    log::info!("Target languages: {:?}", languages.targets());
    let languages = new_shared_language_state(languages);

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Provider and clipboard
    let provider = build_provider(&config.provider, &config.languages.default_source);
    let clipboard: Arc<dyn ClipboardPort> = Arc::new(SystemClipboard::new());

    // 5. Queue and dispatcher
    let (queue, results) = result_queue();
    let dispatcher = TranslationDispatcher::new(
        rt.handle().clone(),
        provider,
        Arc::clone(&clipboard),
        Arc::clone(&languages),
        queue.clone(),
    )
    .with_default_source(config.languages.default_source.clone());

    // 6. Hotkeys
    let (hotkey_tx, hotkey_rx) = mpsc::unbounded_channel();
    let _hotkey_listener = HotkeyListener::start(hotkey_bindings(&config), hotkey_tx)
        .context("failed to spawn hotkey listener thread")?;

    let debouncer = TriggerDebouncer::new(
        Arc::clone(&clipboard),
        Duration::from_millis(config.hotkey.double_press_ms),
    );
    let handler = TriggerHandler::new(debouncer, dispatcher.clone(), queue, languages);
    std::thread::Builder::new()
        .name("trigger-handler".into())
        .spawn(move || handler.run(hotkey_rx))
        .context("failed to spawn trigger-handler thread")?;

    // 7. Console input.  `action_tx` lives until `main` returns, so closing
    //    stdin does not end the consumer.
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let console_tx = action_tx.clone();
    std::thread::Builder::new()
        .name("console-input".into())
        .spawn(move || run_console(console_tx))
        .context("failed to spawn console thread")?;

    // 8. Popup consumer
    let machine = PopupStateMachine::new(Duration::from_millis(config.ui.info_duration_ms));
    let consumer = PopupConsumer::new(machine, ConsoleRenderer::stdout(), dispatcher, clipboard)
        .with_poll_interval(Duration::from_millis(config.ui.poll_interval_ms.max(1)));

    log::info!(
        "Ready: press {}{} twice to translate the clipboard",
        match config.hotkey.trigger_modifier.trim() {
            "" => String::new(),
            m => format!("{m}+"),
        },
        config.hotkey.trigger_key
    );

    rt.block_on(async {
        tokio::select! {
            _ = consumer.run(results, action_rx) => {}
            _ = tokio::signal::ctrl_c() => log::info!("Interrupted"),
        }
    });
    drop(action_tx);

    log::info!("clip-translate shutting down");
    Ok(())
}
